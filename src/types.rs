// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structural type graph used by the Jsonnet linter.
//!
//! Jsonnet has no declared types, so the linter builds an approximate
//! structural type for every expression. Types live in a [`TypeGraph`]: an
//! append-only arena of placeholders, each either unresolved (a forward
//! reference) or resolved to a [`TypeDesc`]. Descriptors refer to other types
//! only through [`PlaceholderId`]s, which lets recursive objects and
//! incrementally widened field sets be expressed without owned cycles.
//!
//! The module is split across a couple of dedicated files:
//!
//! * `model.rs` contains the descriptor vocabulary.
//! * `graph.rs` owns the placeholder arena and its construction API.
//! * `union.rs` implements the total union algebra over descriptors.
//! * `object.rs` and `function.rs` hold the field lookup and arity checks.
//! * `equivalence.rs` and `display.rs` compare and render types.
//! * `stdlib/` builds the closed object type of the standard library.

mod display;
mod equivalence;
pub mod errors;
pub mod function;
pub mod graph;
pub mod model;
pub mod object;
pub mod stdlib;
mod union;

pub use errors::{ArityError, FieldError, GraphError};
pub use graph::TypeGraph;
pub use model::{FunctionDesc, ObjectDesc, PlaceholderId, PrimitiveKind, TypeDesc};
pub use object::FieldLookup;
