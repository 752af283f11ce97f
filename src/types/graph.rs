// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The placeholder arena.
//!
//! Placeholders are allocated while the linter walks the syntax tree and are
//! resolved once the corresponding sub-expressions have been typed. A
//! resolved placeholder is never replaced: resolving it again widens it with
//! [`TypeGraph::union`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::convert::TryFrom;

use log::{debug, trace};

use crate::ast::{Identifier, Parameter};

use super::errors::GraphError;
use super::model::{FunctionDesc, ObjectDesc, PlaceholderId, PrimitiveKind, TypeDesc};
use super::stdlib::{self, StdlibTable};
use super::union::CachedUnion;

/// Slots read by a union, with the revision each had at the time.
pub(super) type Reads = Vec<(PlaceholderId, u32)>;

/// Placeholder store for one linting run.
#[derive(Clone, Debug)]
pub struct TypeGraph {
    placeholders: Vec<TypeDesc>,
    /// Bumped whenever the matching placeholder is rewritten.
    revisions: Vec<u32>,
    /// Placeholders below this index were created with the graph and are
    /// read-only.
    frozen_len: usize,
    /// Results of `union_ids`, keyed by ordered operand pair. An entry stays
    /// valid while none of the slots it read has been rewritten.
    pub(super) union_cache: BTreeMap<(PlaceholderId, PlaceholderId), CachedUnion>,
    /// One frame per `union_ids` call in progress.
    pub(super) read_frames: Vec<Reads>,
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraph {
    /// Creates a graph seeded with the default standard library catalog.
    pub fn new() -> Self {
        Self::with_stdlib(StdlibTable::default_table())
    }

    /// Creates a graph seeded with a custom standard library catalog.
    pub fn with_stdlib(table: &StdlibTable) -> Self {
        let mut graph = Self::prelude();
        stdlib::prepare_stdlib(&mut graph, table);
        graph.frozen_len = graph.placeholders.len();
        graph
    }

    /// Well-known placeholders, in the order of the `PlaceholderId` constants.
    /// The stdlib slot stays unresolved until `prepare_stdlib` runs.
    fn prelude() -> Self {
        let placeholders = alloc::vec![
            TypeDesc::Unresolved,
            TypeDesc::Any,
            TypeDesc::Primitive(PrimitiveKind::Boolean),
            TypeDesc::Primitive(PrimitiveKind::Number),
            TypeDesc::Primitive(PrimitiveKind::String),
            TypeDesc::Primitive(PrimitiveKind::Null),
            TypeDesc::Array(PlaceholderId::ANY),
            TypeDesc::Array(PlaceholderId::NUMBER),
            TypeDesc::Object(ObjectDesc::open(Some(PlaceholderId::ANY))),
            TypeDesc::Function(FunctionDesc::with_unknown_params(PlaceholderId::ANY)),
        ];
        debug_assert_eq!(placeholders.len(), PlaceholderId::WELL_KNOWN as usize);

        TypeGraph {
            revisions: alloc::vec![0; placeholders.len()],
            placeholders,
            frozen_len: 0,
            union_cache: BTreeMap::new(),
            read_frames: Vec::new(),
        }
    }

    /// The closed object type bound to `std` in every file's top-level scope.
    pub fn stdlib_type(&self) -> PlaceholderId {
        PlaceholderId::STDLIB
    }

    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }

    /// Allocates an unresolved placeholder.
    pub fn new_placeholder(&mut self) -> PlaceholderId {
        self.push(TypeDesc::Unresolved)
    }

    /// Allocates a placeholder already bound to `desc`.
    pub fn new_type(&mut self, desc: TypeDesc) -> PlaceholderId {
        self.push(desc)
    }

    /// Allocates an open object under construction.
    pub fn new_object(&mut self, fallback: Option<PlaceholderId>) -> PlaceholderId {
        self.push(TypeDesc::Object(ObjectDesc::open(fallback)))
    }

    /// Allocates a closed object with one candidate per field.
    pub fn new_closed_object<I, N>(&mut self, fields: I) -> PlaceholderId
    where
        I: IntoIterator<Item = (N, PlaceholderId)>,
        N: Into<alloc::string::String>,
    {
        self.push(TypeDesc::Object(ObjectDesc::closed(fields)))
    }

    /// Allocates a function type whose parameters are all required.
    pub fn new_simple_func_type<I, N>(
        &mut self,
        return_type: PlaceholderId,
        params: I,
    ) -> PlaceholderId
    where
        I: IntoIterator<Item = N>,
        N: Into<Identifier>,
    {
        let params = params.into_iter().map(Parameter::required).collect();
        self.new_func_type(return_type, params)
    }

    /// Allocates a function type. Parameter order is preserved for positional
    /// arity checks.
    pub fn new_func_type(
        &mut self,
        return_type: PlaceholderId,
        params: Vec<Parameter>,
    ) -> PlaceholderId {
        self.push(TypeDesc::Function(FunctionDesc::new(params, return_type)))
    }

    pub(crate) fn push(&mut self, desc: TypeDesc) -> PlaceholderId {
        // Placeholder ids are u32; a single run never comes close to the limit.
        let id = PlaceholderId(u32::try_from(self.placeholders.len()).unwrap_or(u32::MAX));
        self.placeholders.push(desc);
        self.revisions.push(0);
        id
    }

    pub fn descriptor(&self, id: PlaceholderId) -> Result<&TypeDesc, GraphError> {
        self.placeholders
            .get(id.index())
            .ok_or(GraphError::NoSuchPlaceholder {
                id,
                len: self.placeholders.len(),
            })
    }

    /// Descriptor lookup for the graph algorithms. Ids that do not belong to
    /// this graph read as unresolved so the algebra stays total.
    pub(super) fn desc_of(&self, id: PlaceholderId) -> &TypeDesc {
        self.placeholders
            .get(id.index())
            .unwrap_or(&TypeDesc::Unresolved)
    }

    pub fn is_resolved(&self, id: PlaceholderId) -> bool {
        self.desc_of(id).is_resolved()
    }

    /// Binds `id` to `desc`, or widens it if it is already resolved.
    pub fn resolve(&mut self, id: PlaceholderId, desc: TypeDesc) -> Result<(), GraphError> {
        let existing = self.descriptor(id)?.clone();
        if !desc.is_resolved() {
            return Err(GraphError::ResolveToUnresolved(id));
        }
        self.ensure_mutable(id)?;

        let next = match existing {
            TypeDesc::Unresolved => {
                trace!("resolving {id:?}");
                desc
            }
            existing => {
                debug!("widening {id:?}");
                self.union(&existing, &desc)
            }
        };

        self.store(id, next);
        Ok(())
    }

    pub(super) fn ensure_mutable(&self, id: PlaceholderId) -> Result<(), GraphError> {
        self.descriptor(id)?;
        if id.index() < self.frozen_len {
            return Err(GraphError::Frozen(id));
        }
        Ok(())
    }

    /// Mutable access to an existing, non-frozen placeholder. Cached unions
    /// that read the slot become stale.
    pub(super) fn slot_mut(&mut self, id: PlaceholderId) -> Result<&mut TypeDesc, GraphError> {
        self.ensure_mutable(id)?;
        self.bump_revision(id);
        let len = self.placeholders.len();
        self.placeholders
            .get_mut(id.index())
            .ok_or(GraphError::NoSuchPlaceholder { id, len })
    }

    /// Writes a slot produced by the graph's own algorithms.
    pub(super) fn store(&mut self, id: PlaceholderId, desc: TypeDesc) {
        if let Some(slot) = self.placeholders.get_mut(id.index()) {
            *slot = desc;
            self.bump_revision(id);
        }
    }

    pub(super) fn revision(&self, id: PlaceholderId) -> u32 {
        self.revisions.get(id.index()).copied().unwrap_or(0)
    }

    fn bump_revision(&mut self, id: PlaceholderId) {
        if let Some(revision) = self.revisions.get_mut(id.index()) {
            *revision = revision.wrapping_add(1);
        }
    }

    /// Writes a freshly allocated slot. Nothing has read it yet, so its
    /// revision is left alone.
    pub(super) fn fill(&mut self, id: PlaceholderId, desc: TypeDesc) {
        if let Some(slot) = self.placeholders.get_mut(id.index()) {
            *slot = desc;
        }
    }

    /// Placeholders that are still unresolved. Anything reported here after
    /// a scope has been fully inferred is an engine bug.
    pub fn unresolved(&self) -> impl Iterator<Item = PlaceholderId> + '_ {
        self.placeholders
            .iter()
            .enumerate()
            .filter(|(_, desc)| !desc.is_resolved())
            .map(|(idx, _)| PlaceholderId(idx as u32))
    }
}
