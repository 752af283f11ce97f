// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structural equivalence of types.
//!
//! Pairs under comparison are assumed equal while their components are
//! compared, which makes the check terminate on recursive types.

use alloc::collections::BTreeSet;

use super::graph::TypeGraph;
use super::model::{ObjectDesc, PlaceholderId, TypeDesc};
use super::union::open_fallback;

type Assumptions = BTreeSet<(PlaceholderId, PlaceholderId)>;

impl TypeGraph {
    /// Whether `a` and `b` describe the same set of values.
    ///
    /// Candidate sets that differ are compared through their unions. Those
    /// unions are allocated in the graph like any other, which is why this
    /// takes `&mut self`; asking again reuses them.
    pub fn equivalent(&mut self, a: PlaceholderId, b: PlaceholderId) -> bool {
        let mut assumed = Assumptions::new();
        self.equivalent_ids(a, b, &mut assumed)
    }

    /// Like [`TypeGraph::equivalent`], for descriptors not stored in the graph.
    pub fn equivalent_desc(&mut self, a: &TypeDesc, b: &TypeDesc) -> bool {
        let mut assumed = Assumptions::new();
        self.equivalent_descs(a, b, &mut assumed)
    }

    fn equivalent_ids(
        &mut self,
        a: PlaceholderId,
        b: PlaceholderId,
        assumed: &mut Assumptions,
    ) -> bool {
        if a == b {
            return true;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !assumed.insert(key) {
            return true;
        }
        let lhs = self.desc_of(a).clone();
        let rhs = self.desc_of(b).clone();
        self.equivalent_descs(&lhs, &rhs, assumed)
    }

    fn equivalent_descs(&mut self, a: &TypeDesc, b: &TypeDesc, assumed: &mut Assumptions) -> bool {
        match (a, b) {
            (TypeDesc::Any, TypeDesc::Any) => true,
            (TypeDesc::Primitive(lhs), TypeDesc::Primitive(rhs)) => lhs == rhs,
            (TypeDesc::Array(lhs), TypeDesc::Array(rhs)) => {
                self.equivalent_ids(*lhs, *rhs, assumed)
            }
            (TypeDesc::Function(lhs), TypeDesc::Function(rhs)) => {
                lhs.same_params(rhs)
                    && self.equivalent_ids(lhs.return_type, rhs.return_type, assumed)
            }
            (TypeDesc::Object(lhs), TypeDesc::Object(rhs)) => {
                self.equivalent_objects(lhs, rhs, assumed)
            }
            _ => false,
        }
    }

    fn equivalent_objects(
        &mut self,
        lhs: &ObjectDesc,
        rhs: &ObjectDesc,
        assumed: &mut Assumptions,
    ) -> bool {
        if lhs.all_fields_known != rhs.all_fields_known
            || !lhs.fields.keys().eq(rhs.fields.keys())
        {
            return false;
        }

        for (name, left) in lhs.fields.iter() {
            let Some(right) = rhs.fields.get(name) else {
                return false;
            };
            if !self.equivalent_candidates(left, right, assumed) {
                return false;
            }
        }

        match (open_fallback(lhs), open_fallback(rhs)) {
            (None, None) => true,
            (Some(left), Some(right)) => self.equivalent_ids(left, right, assumed),
            _ => false,
        }
    }

    fn equivalent_candidates(
        &mut self,
        left: &[PlaceholderId],
        right: &[PlaceholderId],
        assumed: &mut Assumptions,
    ) -> bool {
        let same_set =
            left.iter().all(|id| right.contains(id)) && right.iter().all(|id| left.contains(id));
        if same_set {
            return true;
        }
        let left = self.union_all(left);
        let right = self.union_all(right);
        self.equivalent_ids(left, right, assumed)
    }
}
