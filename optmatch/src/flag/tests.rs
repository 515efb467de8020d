//! Unit tests for typed flag presets.

use rstest::{fixture, rstest};

use super::{FlagKind, define_flag};
use crate::bindings::Bindings;
use crate::cursor::TokenStream;
use crate::error::DefinitionError;
use crate::registry::Registry;

struct Harness {
    registry: Registry,
    bindings: Bindings,
}

impl Harness {
    fn define(&mut self, kind: FlagKind, name: &str, initial: &str) -> String {
        define_flag(&mut self.registry, &mut self.bindings, kind, name, initial, &[])
            .expect("valid flag")
    }

    fn parse(&mut self, tokens: &[&str]) {
        self.registry
            .parse(&mut self.bindings, &TokenStream::new(tokens.iter().copied()))
            .expect("parse succeeds");
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        registry: Registry::new(),
        bindings: Bindings::new(),
    }
}

#[rstest]
#[case(&["--vb"], Some(true))]
#[case(&["--no-vb"], Some(false))]
#[case(&["--vb=0"], Some(false))]
#[case(&["--vb=true"], Some(true))]
#[case(&[], Some(false))]
fn boolean_flag_round_trip(
    mut harness: Harness,
    #[case] tokens: &[&str],
    #[case] expected: Option<bool>,
) {
    let name = harness.define(FlagKind::Boolean, "vb", "false");
    harness.parse(tokens);
    assert_eq!(harness.bindings.get_bool(&name), expected);
}

#[rstest]
fn boolean_flags_leave_following_tokens_alone(mut harness: Harness) {
    harness.define(FlagKind::Boolean, "vb", "0");
    harness.registry.add_positional("inputs", &[]).expect("identifier");
    harness.parse(&["--vb", "true"]);
    assert_eq!(harness.bindings.get_bool("vb"), Some(true));
    assert_eq!(harness.bindings.get_list("inputs"), Some(&["true".to_owned()][..]));
}

#[rstest]
#[case("-e --max-epochs", "max_epochs")]
#[case("max_epochs", "max_epochs")]
#[case("--rate", "rate")]
fn binding_names_follow_the_longest_alias(
    mut harness: Harness,
    #[case] spec: &str,
    #[case] binding: &str,
) {
    assert_eq!(harness.define(FlagKind::Integer, spec, "1"), binding);
}

#[rstest]
fn bare_names_get_a_dashed_long_alias(mut harness: Harness) {
    harness.define(FlagKind::Integer, "max_epochs", "10");
    harness.parse(&["--max-epochs", "4"]);
    assert_eq!(harness.bindings.get_int("max_epochs"), Some(4));
}

#[rstest]
fn typed_flags_validate_values(mut harness: Harness) {
    harness.define(FlagKind::Float, "rate", "0.1");
    let err = harness
        .registry
        .parse(&mut harness.bindings, &TokenStream::new(["--rate", "fast"]))
        .expect_err("not a float");
    assert!(err.to_string().contains("fast"));
    harness.parse(&["--rate=2.5e-1"]);
    assert_eq!(harness.bindings.get_float("rate"), Some(0.25));
}

#[rstest]
#[case(FlagKind::Integer, "ten")]
#[case(FlagKind::Float, "x")]
#[case(FlagKind::Boolean, "maybe")]
fn defaults_must_pass_their_own_check(
    mut harness: Harness,
    #[case] kind: FlagKind,
    #[case] initial: &str,
) {
    let err = define_flag(&mut harness.registry, &mut harness.bindings, kind, "f", initial, &[])
        .expect_err("invalid default");
    assert!(matches!(err, DefinitionError::InvalidDefault { .. }));
}

#[rstest]
fn defaults_are_documented_and_normalised(mut harness: Harness) {
    define_flag(
        &mut harness.registry,
        &mut harness.bindings,
        FlagKind::Boolean,
        "vb",
        "false",
        &["Verbose output."],
    )
    .expect("valid flag");
    assert_eq!(harness.bindings.get_str("vb"), Some("0"));
    let docs = harness.registry.doc_metadata();
    let flag = docs.first().expect("flag entry");
    assert_eq!(flag.doc, ["Verbose output.", "Default: false"]);
    assert_eq!(docs.get(1).map(|doc| doc.aliases.clone()), Some(vec!["--no-vb".to_owned()]));
}

#[rstest]
fn nested_definitions_shadow_and_restore(mut harness: Harness) {
    harness.define(FlagKind::Integer, "depth", "1");
    harness.parse(&["--depth", "2"]);
    let Harness { registry, bindings } = &mut harness;
    bindings.scoped(|inner| {
        define_flag(registry, inner, FlagKind::Integer, "depth", "5", &[]).expect("valid flag");
        assert_eq!(inner.get_int("depth"), Some(5));
        registry
            .parse(inner, &TokenStream::new(["--depth", "7"]))
            .expect("parse succeeds");
        assert_eq!(inner.get_int("depth"), Some(7));
    });
    assert_eq!(harness.bindings.get_int("depth"), Some(2));
    assert_eq!(harness.registry.len(), 1);
}

#[rstest]
fn flags_refuse_bindings_owned_by_plain_options(mut harness: Harness) {
    harness.registry.add_option("--vb", "vb", &[]).expect("valid option");
    let err = define_flag(
        &mut harness.registry,
        &mut harness.bindings,
        FlagKind::Boolean,
        "vb",
        "false",
        &[],
    )
    .expect_err("binding already in use");
    assert_eq!(err, DefinitionError::BindingInUse { binding: "vb".to_owned() });
    assert_eq!(harness.registry.len(), 1);
    assert_eq!(harness.bindings.get_str("vb"), None);
}

#[rstest]
fn flags_refuse_a_redefinition_with_another_kind(mut harness: Harness) {
    harness.define(FlagKind::Integer, "depth", "1");
    let err = define_flag(
        &mut harness.registry,
        &mut harness.bindings,
        FlagKind::Float,
        "depth",
        "0.5",
        &[],
    )
    .expect_err("kind differs");
    assert!(matches!(err, DefinitionError::BindingInUse { .. }));
    assert_eq!(harness.bindings.get_int("depth"), Some(1));
}

#[rstest]
fn negation_docs_list_every_alias(mut harness: Harness) {
    harness.define(FlagKind::Boolean, "-v, --verbose", "false");
    let docs = harness.registry.doc_metadata();
    let negation = docs.get(1).expect("negation entry");
    assert_eq!(negation.aliases, ["--no-verbose"]);
    assert_eq!(negation.doc, ["Unset -v, --verbose."]);
}
