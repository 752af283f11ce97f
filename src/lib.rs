// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ast;
pub mod types;

#[cfg(feature = "arc")]
pub use alloc::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
pub use alloc::rc::Rc;

pub use types::{
    stdlib::{StdlibTable, StdlibTableError},
    ArityError, FieldError, FieldLookup, FunctionDesc, GraphError, ObjectDesc, PlaceholderId,
    PrimitiveKind, TypeDesc, TypeGraph,
};
