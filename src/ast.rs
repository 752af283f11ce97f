// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The slice of the Jsonnet syntax tree consumed by the type graph.
//!
//! Parsing happens elsewhere. The type graph only needs identifiers (used as
//! field and parameter names) and function parameters, which carry whether a
//! default value was written at the definition site.

use crate::Rc;
use alloc::string::String;
use core::fmt;
use core::ops::Deref;

/// An identifier token. Comparison is byte-exact with no normalization.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(Rc<str>);

impl Identifier {
    pub fn new(name: &str) -> Self {
        Identifier(Rc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier(Rc::from(name))
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A function parameter as written in the source.
///
/// Only the presence of a default matters for typing; the default expression
/// itself is never evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: Identifier,
    pub has_default: bool,
}

impl Parameter {
    pub fn required<N: Into<Identifier>>(name: N) -> Self {
        Parameter {
            name: name.into(),
            has_default: false,
        }
    }

    pub fn optional<N: Into<Identifier>>(name: N) -> Self {
        Parameter {
            name: name.into(),
            has_default: true,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.has_default
    }
}
