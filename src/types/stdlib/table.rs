// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use lazy_static::lazy_static;
use thiserror::Error;

use super::catalog::{BuiltinConfig, StdlibCatalog, StdlibGroupConfig, StdlibKind};

const DEFAULT_STDLIB_JSON: &str = include_str!("./stdlib.json");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StdlibTableError {
    #[error("failed to parse stdlib table: {0}")]
    Parse(String),
    #[error("duplicate stdlib entry `{0}` in table")]
    DuplicateBuiltin(String),
    #[error("stdlib entry `{builtin}` is invalid: {detail}")]
    InvalidEntry { builtin: String, detail: String },
    #[error("stdlib entry `{builtin}` declares parameter `{param}` twice")]
    DuplicateParameter { builtin: String, param: String },
    #[error("stdlib entry `{builtin}` declares required parameter `{param}` after an optional one")]
    RequiredAfterOptional { builtin: String, param: String },
}

impl From<serde_json::Error> for StdlibTableError {
    fn from(err: serde_json::Error) -> Self {
        StdlibTableError::Parse(format!("{err}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdlibParam {
    pub name: String,
    pub optional: bool,
}

/// Type of one member of the standard library object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdlibEntry {
    Value(StdlibKind),
    Function {
        /// `None` when the parameters cannot be known statically.
        params: Option<Vec<StdlibParam>>,
        returns: StdlibKind,
    },
}

impl StdlibEntry {
    fn from_config(cfg: BuiltinConfig) -> Result<Self, StdlibTableError> {
        let invalid = |detail: &str| StdlibTableError::InvalidEntry {
            builtin: cfg.name.clone(),
            detail: detail.to_owned(),
        };

        let is_function = cfg.params.is_some() || cfg.unknown_params || cfg.return_kind.is_some();
        match (cfg.value, is_function) {
            (Some(_), true) => Err(invalid("entry has both `value` and a signature")),
            (None, false) => Err(invalid("entry has neither `value` nor a signature")),
            (Some(kind), false) => Ok(StdlibEntry::Value(kind)),
            (None, true) => {
                let returns = cfg.return_kind.ok_or_else(|| invalid("missing `return`"))?;
                if cfg.unknown_params {
                    if cfg.params.is_some() {
                        return Err(invalid("`unknown_params` cannot be combined with `params`"));
                    }
                    return Ok(StdlibEntry::Function {
                        params: None,
                        returns,
                    });
                }
                let params = validate_params(&cfg.name, cfg.params.unwrap_or_default())?;
                Ok(StdlibEntry::Function {
                    params: Some(params),
                    returns,
                })
            }
        }
    }
}

fn validate_params(
    builtin: &str,
    params: Vec<super::catalog::ParamConfig>,
) -> Result<Vec<StdlibParam>, StdlibTableError> {
    let mut validated: Vec<StdlibParam> = Vec::with_capacity(params.len());
    for param in params {
        let (name, optional) = param.into_parts();
        if validated.iter().any(|p| p.name == name) {
            return Err(StdlibTableError::DuplicateParameter {
                builtin: builtin.to_owned(),
                param: name,
            });
        }
        if !optional && validated.iter().any(|p| p.optional) {
            return Err(StdlibTableError::RequiredAfterOptional {
                builtin: builtin.to_owned(),
                param: name,
            });
        }
        validated.push(StdlibParam { name, optional });
    }
    Ok(validated)
}

/// Parsed standard library catalog. Immutable once loaded, so a single table
/// can seed graphs on any number of threads.
#[derive(Debug, Clone, Default)]
pub struct StdlibTable {
    entries: BTreeMap<String, StdlibEntry>,
}

impl StdlibTable {
    pub fn from_json(json: &str) -> Result<Self, StdlibTableError> {
        let mut catalog: StdlibCatalog = serde_json::from_str(json)?;

        if !catalog.builtins.is_empty() {
            catalog.groups.push(StdlibGroupConfig {
                name: "default".to_owned(),
                builtins: catalog.builtins,
            });
            catalog.builtins = Vec::new();
        }

        let mut entries = BTreeMap::new();
        for group in catalog.groups.into_iter() {
            for builtin in group.builtins.into_iter() {
                let name = builtin.name.clone();
                let entry = StdlibEntry::from_config(builtin)?;
                if entries.insert(name.clone(), entry).is_some() {
                    return Err(StdlibTableError::DuplicateBuiltin(name));
                }
            }
        }

        Ok(StdlibTable { entries })
    }

    /// The catalog shipped with the crate, parsed on first use.
    pub fn default_table() -> &'static StdlibTable {
        &DEFAULT_TABLE
    }

    pub fn lookup(&self, name: &str) -> Option<&StdlibEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &StdlibEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

lazy_static! {
    static ref DEFAULT_TABLE: StdlibTable = StdlibTable::from_json(DEFAULT_STDLIB_JSON)
        .expect("failed to load default stdlib catalog");
}
