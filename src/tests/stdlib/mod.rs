// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::types::stdlib::{StdlibEntry, StdlibKind, StdlibTable, StdlibTableError};
use crate::types::{ArityError, FieldError, PlaceholderId, TypeDesc, TypeGraph};

use alloc::{format, string::String, vec::Vec};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use test_generator::test_resources;

#[derive(Debug, Deserialize)]
struct StdlibYamlTest {
    cases: Vec<StdlibCase>,
}

#[derive(Debug, Deserialize)]
struct StdlibCase {
    note: String,
    builtin: String,
    /// `missing` when the name must not be part of the catalog.
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    returns: Option<String>,
    #[serde(default)]
    params: Option<Vec<String>>,
    #[serde(default)]
    calls: Vec<CallExpectation>,
}

#[derive(Debug, Deserialize)]
struct CallExpectation {
    #[serde(default)]
    positional: usize,
    #[serde(default)]
    keywords: Vec<String>,
    result: String,
}

fn arity_result_name(result: &core::result::Result<(), ArityError>) -> &'static str {
    match result {
        Ok(()) => "ok",
        Err(ArityError::TooFewArguments(_)) => "too_few_arguments",
        Err(ArityError::TooManyArguments { .. }) => "too_many_arguments",
        Err(ArityError::UnknownKeyword(_)) => "unknown_keyword",
        Err(ArityError::DuplicateArgument(_)) => "duplicate_argument",
    }
}

fn run_case(graph: &mut TypeGraph, case: &StdlibCase) -> Result<()> {
    let member = match graph.field_type(PlaceholderId::STDLIB, &case.builtin) {
        Ok(member) => member,
        Err(FieldError::UnknownField(_)) if case.kind.as_deref() == Some("missing") => {
            return Ok(());
        }
        Err(err) => bail!("lookup of `{}` failed: {err}", case.builtin),
    };

    if case.kind.as_deref() == Some("missing") {
        bail!("`{}` unexpectedly found in catalog", case.builtin);
    }

    let desc = graph.descriptor(member)?.clone();
    let rendered = graph.describe(member);
    if let Some(kind) = &case.kind {
        let actual = match &desc {
            TypeDesc::Function(_) => "function",
            TypeDesc::Object(_) => "object",
            TypeDesc::Array(_) => "array",
            TypeDesc::Primitive(kind) => kind.name(),
            TypeDesc::Any => "any",
            TypeDesc::Unresolved => "unresolved",
        };
        if actual != kind {
            bail!("expected {kind}, got {rendered}");
        }
    }

    let Some(func) = desc.as_function() else {
        if case.returns.is_some() || case.params.is_some() || !case.calls.is_empty() {
            bail!("`{}` is not a function: {rendered}", case.builtin);
        }
        return Ok(());
    };

    if let Some(returns) = &case.returns {
        let actual = graph.describe(func.return_type());
        if &actual != returns {
            bail!("expected return type {returns}, got {actual}");
        }
    }

    if let Some(params) = &case.params {
        let actual: Vec<String> = func
            .params()
            .iter()
            .map(|p| {
                if p.is_optional() {
                    format!("[{}]", p.name)
                } else {
                    p.name.as_str().into()
                }
            })
            .collect();
        if &actual != params {
            bail!("expected parameters {params:?}, got {actual:?}");
        }
    }

    for call in case.calls.iter() {
        let result = func.check_arity(call.positional, call.keywords.iter().map(String::as_str));
        let actual = arity_result_name(&result);
        if actual != call.result {
            bail!(
                "call with {} positional and keywords {:?}: expected {}, got {actual}",
                call.positional,
                call.keywords,
                call.result
            );
        }
    }

    Ok(())
}

fn yaml_test_impl(path: &str) -> Result<()> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read yaml test file {path}"))?;
    let test: StdlibYamlTest = serde_yaml::from_str(&yaml)
        .with_context(|| format!("failed to parse yaml test file {path}"))?;

    let mut graph = TypeGraph::new();
    for case in test.cases.iter() {
        run_case(&mut graph, case).with_context(|| format!("case `{}`", case.note))?;
    }

    Ok(())
}

#[test_resources("tests/stdlib/*.yaml")]
fn run(path: &str) {
    yaml_test_impl(path).unwrap();
}

#[test]
fn catalog_is_closed() -> Result<()> {
    let graph = TypeGraph::new();
    let stdlib = graph
        .descriptor(graph.stdlib_type())?
        .as_object()
        .context("stdlib is not an object")?;

    assert!(stdlib.all_fields_known());
    assert_eq!(stdlib.unknown_field_type(), None);
    assert_eq!(stdlib.len(), StdlibTable::default_table().len());
    assert_eq!(stdlib.len(), 113);
    for (name, candidates) in stdlib.fields() {
        assert_eq!(candidates.len(), 1, "{name}");
    }
    assert_eq!(graph.unresolved().count(), 0);
    Ok(())
}

#[test]
fn ext_var_takes_one_required_parameter() -> Result<()> {
    let mut graph = TypeGraph::new();
    let ext_var = graph.field_type(graph.stdlib_type(), "extVar")?;
    let func = graph
        .descriptor(ext_var)?
        .as_function()
        .context("extVar is not a function")?;

    assert_eq!(func.params().len(), 1);
    assert_eq!(func.required_params().count(), 1);
    assert_eq!(func.return_type(), PlaceholderId::ANY);
    Ok(())
}

#[test]
fn catalog_is_frozen() {
    let mut graph = TypeGraph::new();
    let number = graph.new_type(TypeDesc::number());
    assert!(graph.declare_field(PlaceholderId::STDLIB, "extra", number).is_err());
    assert!(graph.resolve(PlaceholderId::STDLIB, TypeDesc::Any).is_err());
    assert_eq!(
        graph.field_type(PlaceholderId::STDLIB, "extra"),
        Err(FieldError::UnknownField("extra".into()))
    );
}

#[test]
fn default_table_entries() {
    let table = StdlibTable::default_table();
    assert_eq!(table.lookup("thisFile"), Some(&StdlibEntry::Value(StdlibKind::String)));
    assert!(matches!(
        table.lookup("native"),
        Some(StdlibEntry::Function {
            returns: StdlibKind::AnyFunction,
            ..
        })
    ));
    assert!(matches!(
        table.lookup("get"),
        Some(StdlibEntry::Function {
            returns: StdlibKind::Any,
            ..
        })
    ));
    assert_eq!(table.lookup("nope"), None);
}

#[test]
fn custom_table_replaces_catalog() -> Result<()> {
    let table = StdlibTable::from_json(
        r#"{
            "builtins": [
                {"name": "answer", "value": "number"},
                {
                    "name": "greet",
                    "params": ["who", {"name": "greeting", "optional": true}],
                    "return": "string"
                },
                {"name": "call", "unknown_params": true, "return": "any"}
            ]
        }"#,
    )?;
    let mut graph = TypeGraph::with_stdlib(&table);

    assert_eq!(graph.field_type(graph.stdlib_type(), "answer")?, PlaceholderId::NUMBER);
    assert_eq!(
        graph.field_type(graph.stdlib_type(), "extVar"),
        Err(FieldError::UnknownField("extVar".into()))
    );

    let greet = graph.field_type(graph.stdlib_type(), "greet")?;
    assert_eq!(graph.describe(greet), "function(who, [greeting])");

    let call = graph.field_type(graph.stdlib_type(), "call")?;
    assert_eq!(graph.describe(call), "function(...)");
    Ok(())
}

#[test]
fn invalid_tables_are_rejected() {
    let cases = [
        (r#"{"builtins": ["#, "parse"),
        (
            r#"{"groups": [
                {"name": "a", "builtins": [{"name": "f", "value": "any"}]},
                {"name": "b", "builtins": [{"name": "f", "value": "number"}]}
            ]}"#,
            "duplicate",
        ),
        (
            r#"{"builtins": [{"name": "f", "value": "any", "return": "any"}]}"#,
            "invalid",
        ),
        (r#"{"builtins": [{"name": "f"}]}"#, "invalid"),
        (
            r#"{"builtins": [{"name": "f", "params": ["x"]}]}"#,
            "invalid",
        ),
        (
            r#"{"builtins": [{"name": "f", "params": ["x", "x"], "return": "any"}]}"#,
            "duplicate_param",
        ),
        (
            r#"{"builtins": [
                {"name": "f", "params": [{"name": "x", "optional": true}, "y"], "return": "any"}
            ]}"#,
            "required_after_optional",
        ),
        (
            r#"{"builtins": [{"name": "f", "value": "tuple"}]}"#,
            "parse",
        ),
        (
            r#"{"builtins": [
                {"name": "f", "params": [{"name": "keyF", "optinal": true}], "return": "any"}
            ]}"#,
            "parse",
        ),
    ];

    for (json, expected) in cases {
        let err = match StdlibTable::from_json(json) {
            Ok(_) => panic!("table accepted: {json}"),
            Err(err) => err,
        };
        let actual = match err {
            StdlibTableError::Parse(_) => "parse",
            StdlibTableError::DuplicateBuiltin(_) => "duplicate",
            StdlibTableError::InvalidEntry { .. } => "invalid",
            StdlibTableError::DuplicateParameter { .. } => "duplicate_param",
            StdlibTableError::RequiredAfterOptional { .. } => "required_after_optional",
        };
        assert_eq!(actual, expected, "{json}");
    }
}
