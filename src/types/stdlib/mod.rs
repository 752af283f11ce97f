// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Type of the `std` object.
//!
//! The catalog is a closed object: every member of the standard library is
//! known, so accessing anything else on `std` is an error the linter can
//! report. Signatures are coarse: whenever a builtin is
//! polymorphic or its result depends on the data (`parseJson`, `get`), the
//! table says `any` rather than risk rejecting a valid program.

mod catalog;
mod table;

use alloc::vec::Vec;

use log::debug;

use crate::ast::Parameter;
use crate::types::graph::TypeGraph;
use crate::types::model::{FunctionDesc, ObjectDesc, PlaceholderId, TypeDesc};

pub use catalog::StdlibKind;
pub use table::{StdlibEntry, StdlibParam, StdlibTable, StdlibTableError};

/// Allocates a placeholder for every entry of `table` and binds the stdlib
/// slot to the closed object listing them.
pub(crate) fn prepare_stdlib(graph: &mut TypeGraph, table: &StdlibTable) {
    let mut fields = Vec::with_capacity(table.len());

    for (name, entry) in table.entries() {
        let id = match entry {
            StdlibEntry::Value(kind) => kind.placeholder(),
            StdlibEntry::Function {
                params: Some(params),
                returns,
            } => {
                let params = params
                    .iter()
                    .map(|p| {
                        if p.optional {
                            Parameter::optional(p.name.as_str())
                        } else {
                            Parameter::required(p.name.as_str())
                        }
                    })
                    .collect();
                graph.new_func_type(returns.placeholder(), params)
            }
            StdlibEntry::Function {
                params: None,
                returns,
            } => graph.new_type(TypeDesc::Function(FunctionDesc::with_unknown_params(
                returns.placeholder(),
            ))),
        };
        fields.push((name, id));
    }

    debug!("prepared stdlib catalog with {} entries", fields.len());
    graph.fill(
        PlaceholderId::STDLIB,
        TypeDesc::Object(ObjectDesc::closed(fields)),
    );
}
