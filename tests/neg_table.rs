//! Negative table tests: every schema violation is reported before anything is written.

use std::fs;

use tokengen::{
    compiler::{IterationStamp, compile, generate},
    config::GenConfig,
    error::TableError,
    tokens::{Category, MAX_TOKENS, PayloadKind, TokenAlias, TokenDefinition, TokenTable},
};

fn def(name: &str, category: Category) -> TokenDefinition {
    TokenDefinition::owned(name.into(), category, PayloadKind::IdOnly)
}

fn config_in(dir: &std::path::Path) -> GenConfig {
    GenConfig {
        header_out: dir.join("include/TOKEN/token_data.h"),
        source_out: dir.join("src/TOKEN/token_data.c"),
        json_out: Some(dir.join("tokens.json")),
        stamp: Some(IterationStamp(0)),
    }
}

#[test]
fn unresolved_alias_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let table = TokenTable::new(
        vec![def("none", Category::Plain), def("address", Category::Operator)],
        vec![TokenAlias::owned("bit_and".into(), "ampersand".into())],
    );
    let err = generate(&table, &config_in(dir.path())).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("bit_and") && msg.contains("ampersand"), "{msg}");
    assert!(err.is_schema_error());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0, "no output expected");
}

#[test]
fn unresolved_alias_keeps_old_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    generate(&TokenTable::builtin(), &cfg).unwrap();
    let before = fs::read_to_string(&cfg.header_out).unwrap();

    let mut broken = TokenTable::builtin();
    broken.aliases.push(TokenAlias::owned("shl".into(), "lshift".into()));
    assert!(generate(&broken, &cfg).is_err());
    assert_eq!(fs::read_to_string(&cfg.header_out).unwrap(), before);
}

#[test]
fn duplicate_short_name() {
    let table = TokenTable::new(
        vec![def("word", Category::Word), def("word", Category::Word)],
        vec![],
    );
    match compile(&table) {
        Err(TableError::DuplicateShortName { name }) => assert_eq!(name, "word"),
        other => panic!("expected duplicate short name, got {other:?}"),
    }
}

#[test]
fn alias_shadowing_a_token() {
    let table = TokenTable::new(
        vec![def("word", Category::Word), def("none", Category::Plain)],
        vec![TokenAlias::owned("none".into(), "word".into())],
    );
    assert!(matches!(
        compile(&table),
        Err(TableError::AliasShadowsToken { .. })
    ));
}

#[test]
fn duplicate_alias() {
    let table = TokenTable::new(
        vec![def("word", Category::Word)],
        vec![
            TokenAlias::owned("ident".into(), "word".into()),
            TokenAlias::owned("ident".into(), "word".into()),
        ],
    );
    assert!(matches!(compile(&table), Err(TableError::DuplicateAlias { .. })));
}

#[test]
fn constants_differing_only_in_case() {
    let table = TokenTable::new(
        vec![def("POD", Category::Keyword), def("pod", Category::Keyword)],
        vec![],
    );
    match compile(&table) {
        Err(TableError::ConstantCollision { constant, .. }) => assert_eq!(constant, "TOKEN_POD"),
        other => panic!("expected constant collision, got {other:?}"),
    }
}

#[test]
fn names_that_are_not_c_identifiers() {
    for bad in ["", "bit-and", "two words", "caf\u{e9}"] {
        let table = TokenTable::new(vec![def(bad, Category::Operator)], vec![]);
        assert!(
            matches!(compile(&table), Err(TableError::InvalidShortName { .. })),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn too_many_tokens() {
    let defs = (0..=MAX_TOKENS).map(|i| def(&format!("t{i}"), Category::Operator)).collect();
    let table = TokenTable::new(defs, vec![]);
    assert!(matches!(compile(&table), Err(TableError::TooManyTokens { .. })));
}
