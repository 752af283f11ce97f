// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Field lookup and incremental construction of object types.

use alloc::borrow::ToOwned;

use log::trace;

use super::errors::{FieldError, GraphError};
use super::graph::TypeGraph;
use super::model::{ObjectDesc, PlaceholderId, TypeDesc};
use super::union::extend_unique;

/// Result of looking a name up in a single object descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldLookup<'a> {
    /// The field was declared, possibly at several definition sites.
    Declared(&'a [PlaceholderId]),
    /// The field was not declared but the object is open.
    Fallback(PlaceholderId),
    /// The field was not declared and the object is closed.
    Unknown,
}

impl ObjectDesc {
    pub fn lookup(&self, name: &str) -> FieldLookup<'_> {
        if let Some(candidates) = self.fields.get(name) {
            return FieldLookup::Declared(candidates);
        }
        if self.all_fields_known {
            FieldLookup::Unknown
        } else {
            FieldLookup::Fallback(self.unknown_field_type.unwrap_or(PlaceholderId::ANY))
        }
    }

    /// Adds a definition site for `name`. The object must still be open.
    pub fn declare_field(
        &mut self,
        name: &str,
        placeholder: PlaceholderId,
    ) -> Result<(), GraphError> {
        if self.all_fields_known {
            return Err(GraphError::DeclareOnClosedObject {
                field: name.to_owned(),
            });
        }
        let candidates = self.fields.entry(name.to_owned()).or_default();
        extend_unique(candidates, &[placeholder]);
        Ok(())
    }

    /// Marks the field set as exhaustive.
    pub fn close(&mut self) -> Result<(), GraphError> {
        if self.all_fields_known {
            return Err(GraphError::AlreadyClosed);
        }
        self.all_fields_known = true;
        self.unknown_field_type = None;
        Ok(())
    }
}

impl TypeGraph {
    /// Type of `object.name`.
    ///
    /// Declared fields yield the union of all their definition sites. An
    /// unresolved or `any` receiver yields `any`.
    pub fn field_type(
        &mut self,
        object: PlaceholderId,
        name: &str,
    ) -> Result<PlaceholderId, FieldError> {
        let candidates = match self.descriptor(object)? {
            TypeDesc::Any => return Ok(PlaceholderId::ANY),
            TypeDesc::Unresolved => {
                trace!("field `{name}` looked up on unresolved {object:?}");
                return Ok(PlaceholderId::ANY);
            }
            TypeDesc::Object(obj) => match obj.lookup(name) {
                FieldLookup::Declared(candidates) => candidates.to_vec(),
                FieldLookup::Fallback(fallback) => return Ok(fallback),
                FieldLookup::Unknown => return Err(FieldError::UnknownField(name.to_owned())),
            },
            TypeDesc::Primitive(_) | TypeDesc::Array(_) | TypeDesc::Function(_) => {
                return Err(FieldError::NotAnObject(self.describe(object)));
            }
        };

        Ok(self.union_all(&candidates))
    }

    /// Adds `placeholder` as a definition site of `name` on an open object.
    pub fn declare_field(
        &mut self,
        object: PlaceholderId,
        name: &str,
        placeholder: PlaceholderId,
    ) -> Result<(), GraphError> {
        self.descriptor(placeholder)?;
        match self.slot_mut(object)? {
            TypeDesc::Object(obj) => obj.declare_field(name, placeholder),
            _ => Err(GraphError::NotAnObject(object)),
        }
    }

    /// Marks an object's field set as exhaustive.
    pub fn close(&mut self, object: PlaceholderId) -> Result<(), GraphError> {
        match self.slot_mut(object)? {
            TypeDesc::Object(obj) => obj.close(),
            _ => Err(GraphError::NotAnObject(object)),
        }
    }
}
