// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use alloc::borrow::ToOwned;
use alloc::collections::BTreeSet;

use super::errors::ArityError;
use super::model::{FunctionDesc, PlaceholderId};

impl FunctionDesc {
    pub fn return_type(&self) -> PlaceholderId {
        self.return_type
    }

    /// Checks a call with `positional` positional arguments followed by the
    /// named arguments in `keywords`.
    ///
    /// Every required parameter must be covered exactly once, either by
    /// position or by name. Signatures with unknown parameters accept any
    /// call.
    pub fn check_arity<'a, K>(&self, positional: usize, keywords: K) -> Result<(), ArityError>
    where
        K: IntoIterator<Item = &'a str>,
    {
        if !self.all_params_known {
            return Ok(());
        }

        if positional > self.params.len() {
            return Err(ArityError::TooManyArguments {
                expected: self.params.len(),
                given: positional,
            });
        }

        let mut named = BTreeSet::new();
        for keyword in keywords {
            let Some(index) = self.params.iter().position(|p| p.name.as_str() == keyword) else {
                return Err(ArityError::UnknownKeyword(keyword.to_owned()));
            };
            if index < positional || !named.insert(keyword) {
                return Err(ArityError::DuplicateArgument(keyword.to_owned()));
            }
        }

        let missing = self
            .params
            .iter()
            .skip(positional)
            .find(|p| !p.is_optional() && !named.contains(p.name.as_str()));
        match missing {
            Some(param) => Err(ArityError::TooFewArguments(param.name.as_str().to_owned())),
            None => Ok(()),
        }
    }
}
