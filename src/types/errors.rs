// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use alloc::string::String;
use thiserror::Error;

use super::model::PlaceholderId;

/// Violations of the graph construction protocol.
///
/// These indicate a bug in the caller's construction sequence. The current
/// run should be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("placeholder {id:?} does not exist (graph has {len} placeholders)")]
    NoSuchPlaceholder { id: PlaceholderId, len: usize },
    #[error("placeholder {0:?} cannot be resolved to an unresolved descriptor")]
    ResolveToUnresolved(PlaceholderId),
    #[error("placeholder {0:?} belongs to the frozen prelude and cannot be changed")]
    Frozen(PlaceholderId),
    #[error("placeholder {0:?} is not an object")]
    NotAnObject(PlaceholderId),
    #[error("cannot declare field `{field}` on closed object")]
    DeclareOnClosedObject { field: String },
    #[error("object is already closed")]
    AlreadyClosed,
}

/// Outcome of a field lookup that did not produce a type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The object is closed and does not list the field.
    #[error("unknown field `{0}`")]
    UnknownField(String),
    /// The looked-up value is not an object (nor `any`).
    #[error("value of type {0} has no fields")]
    NotAnObject(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Why a call does not fit a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArityError {
    #[error("missing argument `{0}`")]
    TooFewArguments(String),
    #[error("too many arguments: expected at most {expected}, got {given}")]
    TooManyArguments { expected: usize, given: usize },
    #[error("function has no parameter `{0}`")]
    UnknownKeyword(String),
    #[error("argument `{0}` already provided")]
    DuplicateArgument(String),
}
