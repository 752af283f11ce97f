// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Union of type descriptors.
//!
//! The algebra is total: whenever two shapes cannot be combined precisely the
//! result is `Any`. Nested types are combined through placeholders, and each
//! operand pair is combined at most once, so recursive types terminate.
//!
//! Combined pairs are memoised together with the revisions of every slot
//! the computation read, so repeating a lookup reuses the earlier result
//! until one of those slots is widened.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::graph::{Reads, TypeGraph};
use super::model::{FunctionDesc, ObjectDesc, PlaceholderId, TypeDesc};

#[derive(Clone, Debug)]
pub(crate) struct CachedUnion {
    result: PlaceholderId,
    reads: Reads,
}

impl TypeGraph {
    /// Least precise common description of `a` and `b`.
    pub fn union(&mut self, a: &TypeDesc, b: &TypeDesc) -> TypeDesc {
        use TypeDesc::*;

        match (a, b) {
            (Unresolved, _) | (_, Unresolved) => Any,
            (Any, _) | (_, Any) => Any,
            (Primitive(lhs), Primitive(rhs)) if lhs == rhs => Primitive(*lhs),
            (Array(lhs), Array(rhs)) => Array(self.union_ids(*lhs, *rhs)),
            (Function(lhs), Function(rhs)) if lhs.same_params(rhs) => {
                let return_type = self.union_ids(lhs.return_type, rhs.return_type);
                Function(FunctionDesc {
                    params: lhs.params.clone(),
                    all_params_known: lhs.all_params_known,
                    return_type,
                })
            }
            (Object(lhs), Object(rhs)) => Object(self.union_objects(lhs, rhs)),
            _ => Any,
        }
    }

    /// Union of two placeholders, as a placeholder.
    ///
    /// Returns one of the operands when the union adds nothing, otherwise a
    /// new placeholder. The result for a given pair is reused until one of
    /// the placeholders it was computed from is rewritten.
    pub fn union_ids(&mut self, a: PlaceholderId, b: PlaceholderId) -> PlaceholderId {
        if a == b {
            return a;
        }

        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(cached) = self.union_cache.get(&key) {
            if cached.reads.iter().all(|(id, rev)| self.revision(*id) == *rev) {
                if let Some(frame) = self.read_frames.last_mut() {
                    frame.extend_from_slice(&cached.reads);
                }
                return cached.result;
            }
        }

        let lhs = self.desc_of(a).clone();
        let rhs = self.desc_of(b).clone();
        let operands = alloc::vec![(a, self.revision(a)), (b, self.revision(b))];
        let shortcut = match (&lhs, &rhs) {
            (TypeDesc::Unresolved, _) | (_, TypeDesc::Unresolved) => Some(PlaceholderId::ANY),
            (TypeDesc::Any, _) => Some(a),
            (_, TypeDesc::Any) => Some(b),
            _ if lhs == rhs => Some(a),
            _ => None,
        };
        if let Some(result) = shortcut {
            self.note_reads(&operands);
            return result;
        }

        // Register the result before descending so that a cycle through
        // the same pair picks up this placeholder instead of recursing.
        let result = self.new_placeholder();
        self.union_cache.insert(
            key,
            CachedUnion {
                result,
                reads: operands.clone(),
            },
        );
        self.read_frames.push(operands);
        let desc = self.union(&lhs, &rhs);
        self.fill(result, desc);

        let mut reads = self.read_frames.pop().unwrap_or_default();
        reads.sort_unstable();
        reads.dedup();
        self.note_reads(&reads);
        self.union_cache.insert(key, CachedUnion { result, reads });
        result
    }

    fn note_reads(&mut self, reads: &[(PlaceholderId, u32)]) {
        if let Some(frame) = self.read_frames.last_mut() {
            frame.extend_from_slice(reads);
        }
    }

    /// Union of every placeholder in `ids`.
    pub fn union_all(&mut self, ids: &[PlaceholderId]) -> PlaceholderId {
        let mut iter = ids.iter().copied();
        let Some(first) = iter.next() else {
            return PlaceholderId::ANY;
        };
        iter.fold(first, |acc, id| self.union_ids(acc, id))
    }

    fn union_objects(&mut self, lhs: &ObjectDesc, rhs: &ObjectDesc) -> ObjectDesc {
        let mut fields: BTreeMap<_, Vec<PlaceholderId>> = BTreeMap::new();

        for (name, candidates) in lhs.fields.iter() {
            let mut merged = candidates.clone();
            match rhs.fields.get(name) {
                Some(other) => extend_unique(&mut merged, other),
                None => {
                    if let Some(fallback) = open_fallback(rhs) {
                        extend_unique(&mut merged, &[fallback]);
                    }
                }
            }
            fields.insert(name.clone(), merged);
        }

        for (name, candidates) in rhs.fields.iter() {
            if lhs.fields.contains_key(name) {
                continue;
            }
            let mut merged = candidates.clone();
            if let Some(fallback) = open_fallback(lhs) {
                extend_unique(&mut merged, &[fallback]);
            }
            fields.insert(name.clone(), merged);
        }

        let all_fields_known = lhs.all_fields_known
            && rhs.all_fields_known
            && lhs.fields.keys().eq(rhs.fields.keys());

        let unknown_field_type = if all_fields_known {
            None
        } else {
            match (lhs.all_fields_known, rhs.all_fields_known) {
                (true, true) => None,
                (false, true) => lhs.unknown_field_type,
                (true, false) => rhs.unknown_field_type,
                (false, false) => match (lhs.unknown_field_type, rhs.unknown_field_type) {
                    (None, None) => None,
                    (Some(a), Some(b)) => Some(self.union_ids(a, b)),
                    (Some(fallback), None) | (None, Some(fallback)) => Some(fallback),
                },
            }
        };

        ObjectDesc {
            all_fields_known,
            unknown_field_type,
            fields,
        }
    }
}

/// Fallback that `obj` contributes to fields it does not list.
///
/// Closed objects contribute nothing, and so do open objects without a
/// fallback, which only arise from unions of closed objects.
pub(super) fn open_fallback(obj: &ObjectDesc) -> Option<PlaceholderId> {
    if obj.all_fields_known {
        None
    } else {
        obj.unknown_field_type
    }
}

pub(super) fn extend_unique(target: &mut Vec<PlaceholderId>, extra: &[PlaceholderId]) {
    for id in extra {
        if !target.contains(id) {
            target.push(*id);
        }
    }
}
