// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use crate::types::model::PlaceholderId;

#[derive(Debug, Deserialize, Default)]
pub(super) struct StdlibCatalog {
    #[serde(default)]
    pub(super) groups: Vec<StdlibGroupConfig>,
    #[serde(default)]
    pub(super) builtins: Vec<BuiltinConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct StdlibGroupConfig {
    #[allow(dead_code)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) builtins: Vec<BuiltinConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(super) struct BuiltinConfig {
    pub(super) name: String,
    #[serde(default)]
    pub(super) params: Option<Vec<ParamConfig>>,
    #[serde(default)]
    pub(super) unknown_params: bool,
    #[serde(default, rename = "return")]
    pub(super) return_kind: Option<StdlibKind>,
    #[serde(default)]
    pub(super) value: Option<StdlibKind>,
}

/// A parameter is either a bare name (required) or a detailed record.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub(super) enum ParamConfig {
    Required(String),
    Detailed(DetailedParamConfig),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(super) struct DetailedParamConfig {
    name: String,
    #[serde(default)]
    optional: bool,
}

impl ParamConfig {
    pub(super) fn into_parts(self) -> (String, bool) {
        match self {
            ParamConfig::Required(name) => (name, false),
            ParamConfig::Detailed(param) => (param.name, param.optional),
        }
    }
}

/// Coarse kinds available to catalog entries. Each maps onto one of the
/// well-known placeholders every graph starts with.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StdlibKind {
    Any,
    Boolean,
    Number,
    String,
    Null,
    AnyArray,
    NumberArray,
    AnyObject,
    AnyFunction,
}

impl StdlibKind {
    pub fn placeholder(self) -> PlaceholderId {
        match self {
            StdlibKind::Any => PlaceholderId::ANY,
            StdlibKind::Boolean => PlaceholderId::BOOLEAN,
            StdlibKind::Number => PlaceholderId::NUMBER,
            StdlibKind::String => PlaceholderId::STRING,
            StdlibKind::Null => PlaceholderId::NULL,
            StdlibKind::AnyArray => PlaceholderId::ANY_ARRAY,
            StdlibKind::NumberArray => PlaceholderId::NUMBER_ARRAY,
            StdlibKind::AnyObject => PlaceholderId::ANY_OBJECT,
            StdlibKind::AnyFunction => PlaceholderId::ANY_FUNCTION,
        }
    }
}
