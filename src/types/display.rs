// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use alloc::borrow::ToOwned;
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::graph::TypeGraph;
use super::model::{FunctionDesc, ObjectDesc, PlaceholderId, TypeDesc};

/// Closed objects list at most this many field names.
const MAX_LISTED_FIELDS: usize = 8;

impl TypeGraph {
    /// Short human readable rendering of a type, for diagnostics.
    pub fn describe(&self, id: PlaceholderId) -> String {
        let mut visiting = BTreeSet::new();
        self.describe_id(id, &mut visiting)
    }

    pub fn describe_desc(&self, desc: &TypeDesc) -> String {
        let mut visiting = BTreeSet::new();
        self.describe_inner(desc, &mut visiting)
    }

    fn describe_id(&self, id: PlaceholderId, visiting: &mut BTreeSet<PlaceholderId>) -> String {
        if !visiting.insert(id) {
            return "...".to_owned();
        }
        let rendered = self.describe_inner(self.desc_of(id), visiting);
        visiting.remove(&id);
        rendered
    }

    fn describe_inner(&self, desc: &TypeDesc, visiting: &mut BTreeSet<PlaceholderId>) -> String {
        match desc {
            TypeDesc::Any => "any".to_owned(),
            TypeDesc::Primitive(kind) => kind.name().to_owned(),
            TypeDesc::Array(elem) => format!("array[{}]", self.describe_id(*elem, visiting)),
            TypeDesc::Function(func) => describe_function(func),
            TypeDesc::Object(obj) => describe_object(obj),
            TypeDesc::Unresolved => "unresolved".to_owned(),
        }
    }
}

fn describe_function(func: &FunctionDesc) -> String {
    if !func.all_params_known {
        return "function(...)".to_owned();
    }
    let params: Vec<String> = func
        .params
        .iter()
        .map(|p| {
            if p.is_optional() {
                format!("[{}]", p.name)
            } else {
                p.name.as_str().to_owned()
            }
        })
        .collect();
    format!("function({})", params.join(", "))
}

fn describe_object(obj: &ObjectDesc) -> String {
    let mut names: Vec<String> = obj
        .fields
        .keys()
        .take(MAX_LISTED_FIELDS)
        .cloned()
        .collect();
    if obj.fields.len() > MAX_LISTED_FIELDS {
        names.push(format!("+{} more", obj.fields.len() - MAX_LISTED_FIELDS));
    }
    if !obj.all_fields_known {
        names.push("...".to_owned());
    }
    if names.is_empty() {
        return "object{}".to_owned();
    }
    format!("object{{{}}}", names.join(", "))
}
