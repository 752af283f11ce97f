// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::ast::Parameter;

/// Handle into a [`TypeGraph`](super::TypeGraph).
///
/// Two placeholders are distinct entities even when they resolve to the same
/// descriptor.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaceholderId(pub(crate) u32);

impl PlaceholderId {
    /// The standard library object. Always the first slot of a graph.
    pub const STDLIB: PlaceholderId = PlaceholderId(0);
    pub const ANY: PlaceholderId = PlaceholderId(1);
    pub const BOOLEAN: PlaceholderId = PlaceholderId(2);
    pub const NUMBER: PlaceholderId = PlaceholderId(3);
    pub const STRING: PlaceholderId = PlaceholderId(4);
    pub const NULL: PlaceholderId = PlaceholderId(5);
    pub const ANY_ARRAY: PlaceholderId = PlaceholderId(6);
    pub const NUMBER_ARRAY: PlaceholderId = PlaceholderId(7);
    pub const ANY_OBJECT: PlaceholderId = PlaceholderId(8);
    pub const ANY_FUNCTION: PlaceholderId = PlaceholderId(9);

    pub(crate) const WELL_KNOWN: u32 = 10;

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
    Null,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Null => "null",
        }
    }
}

/// The concrete shape a placeholder resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDesc {
    Any,
    Primitive(PrimitiveKind),
    /// Homogeneous array of the element placeholder.
    Array(PlaceholderId),
    Function(FunctionDesc),
    Object(ObjectDesc),
    /// Not bound yet. Never a final answer.
    Unresolved,
}

impl TypeDesc {
    pub fn boolean() -> Self {
        TypeDesc::Primitive(PrimitiveKind::Boolean)
    }

    pub fn number() -> Self {
        TypeDesc::Primitive(PrimitiveKind::Number)
    }

    pub fn string() -> Self {
        TypeDesc::Primitive(PrimitiveKind::String)
    }

    pub fn null() -> Self {
        TypeDesc::Primitive(PrimitiveKind::Null)
    }

    pub fn any_array() -> Self {
        TypeDesc::Array(PlaceholderId::ANY)
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, TypeDesc::Unresolved)
    }

    pub fn as_object(&self) -> Option<&ObjectDesc> {
        match self {
            TypeDesc::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDesc> {
        match self {
            TypeDesc::Function(func) => Some(func),
            _ => None,
        }
    }
}

/// Structural object type.
///
/// Each field maps to the placeholders of every definition site seen so far.
/// The candidate list never contains duplicates and keeps insertion order.
///
/// An open object built by the linter always carries a fallback. The only
/// open objects without one are unions of closed objects whose field sets
/// differ: no branch has an unlisted field, so in further unions they add
/// nothing for it, while a direct lookup still answers `any`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectDesc {
    pub(crate) all_fields_known: bool,
    pub(crate) unknown_field_type: Option<PlaceholderId>,
    pub(crate) fields: BTreeMap<String, Vec<PlaceholderId>>,
}

impl ObjectDesc {
    /// An open object whose unlisted fields have type `fallback`, or `any`
    /// when no fallback is given.
    pub fn open(fallback: Option<PlaceholderId>) -> Self {
        ObjectDesc {
            all_fields_known: false,
            unknown_field_type: Some(fallback.unwrap_or(PlaceholderId::ANY)),
            fields: BTreeMap::new(),
        }
    }

    /// A closed object with exactly one candidate per field.
    pub fn closed<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, PlaceholderId)>,
        N: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, id)| (name.into(), alloc::vec![id]))
            .collect();
        ObjectDesc {
            all_fields_known: true,
            unknown_field_type: None,
            fields,
        }
    }

    pub fn all_fields_known(&self) -> bool {
        self.all_fields_known
    }

    pub fn unknown_field_type(&self) -> Option<PlaceholderId> {
        self.unknown_field_type
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[PlaceholderId])> {
        self.fields
            .iter()
            .map(|(name, candidates)| (name.as_str(), candidates.as_slice()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn candidates(&self, name: &str) -> Option<&[PlaceholderId]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Signature of a callable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDesc {
    pub(crate) params: Vec<Parameter>,
    /// False for functions such as the result of `std.native`, whose
    /// parameters cannot be known statically.
    pub(crate) all_params_known: bool,
    pub(crate) return_type: PlaceholderId,
}

impl FunctionDesc {
    pub fn new(params: Vec<Parameter>, return_type: PlaceholderId) -> Self {
        FunctionDesc {
            params,
            all_params_known: true,
            return_type,
        }
    }

    pub fn with_unknown_params(return_type: PlaceholderId) -> Self {
        FunctionDesc {
            params: Vec::new(),
            all_params_known: false,
            return_type,
        }
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn all_params_known(&self) -> bool {
        self.all_params_known
    }

    pub fn required_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| !p.is_optional())
    }

    pub(crate) fn same_params(&self, other: &FunctionDesc) -> bool {
        self.all_params_known == other.all_params_known && self.params == other.params
    }
}
