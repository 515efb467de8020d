//! Unit tests for option records, sugar conversions, and help output.

use rstest::{fixture, rstest};
use test_helpers::ConfigDir;

use super::help::{leading_comment_block, program_usage, wrap};
use super::{DOC_TAG, MATCHER_TAG, Registry, TAKER_TAG, Taker, render_help};
use crate::bindings::Bindings;
use crate::cursor::TokenStream;
use crate::error::DefinitionError;
use crate::value::ValueSpec;

#[fixture]
fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .add_option("-t --train-file", "train_file", &["Training log to read."])
        .expect("valid option");
    registry
        .add_option(
            "--sum",
            Taker::append("sum", ValueSpec::integer(), 1, None).expect("identifier"),
            &["Numbers to add."],
        )
        .expect("valid option");
    registry.add_positional("inputs", &["Input files."]).expect("identifier");
    registry
}

#[rstest]
fn options_are_stored_as_tagged_records(registry: Registry) {
    let store = registry.store();
    assert_eq!(store.len(), 3);
    let first = store.iter().next().map(|(pos, _)| pos).expect("record");
    assert_eq!(
        store.get_attr(first, MATCHER_TAG),
        Some(&["-t".to_owned(), "--train-file".to_owned()][..])
    );
    assert_eq!(
        store.get_attr(first, TAKER_TAG),
        Some(&["assign train_file".to_owned()][..])
    );
    assert_eq!(
        store.get_attr(first, DOC_TAG),
        Some(&["Training log to read.".to_owned()][..])
    );
    assert_eq!(registry.label(first), Some("-t, --train-file"));
}

#[rstest]
fn positional_options_are_labelled_after_their_binding(registry: Registry) {
    let docs = registry.doc_metadata();
    let positional = docs.last().expect("positional entry");
    assert_eq!(positional.aliases, ["<inputs>"]);
    assert_eq!(positional.taker, "append inputs 1..=1");
}

#[rstest]
fn binds_reports_written_bindings(registry: Registry) {
    assert!(registry.binds("train_file"));
    assert!(registry.binds("inputs"));
    assert!(!registry.binds("epochs"));
}

#[rstest]
#[case("train-file")]
#[case("9lives")]
#[case("")]
fn bare_takers_must_be_identifiers(#[case] name: &str) {
    let err = Registry::new()
        .add_option("--x", name, &[])
        .expect_err("not an identifier");
    assert!(matches!(err, DefinitionError::InvalidBinding { .. }));
}

#[test]
fn alias_declarations_are_validated() {
    let err = Registry::new()
        .add_option("--x=1", "x", &[])
        .expect_err("inline value in alias");
    assert!(matches!(err, DefinitionError::InvalidAlias { .. }));
}

#[rstest]
fn help_aligns_descriptions(registry: Registry) {
    let text = render_help(&registry, Some("Usage: train [options]"));
    let expected = concat!(
        "Usage: train [options]\n",
        "\n",
        "  -t, --train-file        Training log to read.\n",
        "  --sum                   Numbers to add.\n",
        "  <inputs>                Input files.\n",
    );
    assert_eq!(text, expected);
}

#[test]
fn long_labels_push_descriptions_down() {
    let mut registry = Registry::new();
    registry
        .add_option("--a-very-long-option-name-indeed", "long", &["Described below."])
        .expect("valid option");
    let text = render_help(&registry, None);
    assert_eq!(
        text,
        format!(
            "  --a-very-long-option-name-indeed\n{}Described below.\n",
            " ".repeat(26)
        )
    );
}

#[test]
fn descriptions_wrap_within_the_line() {
    let mut registry = Registry::new();
    let doc = "word ".repeat(20);
    registry.add_option("--w", "w", &[doc.as_str()]).expect("valid option");
    let text = render_help(&registry, None);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.len() <= 80));
    assert!(lines.get(1).is_some_and(|line| line.starts_with(&" ".repeat(26))));
}

#[rstest]
#[case("one two three", 7, vec!["one two", "three"])]
#[case("unbreakable-word here", 5, vec!["unbreakable-word", "here"])]
#[case("", 10, vec![""])]
fn wrap_is_greedy(#[case] text: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
    assert_eq!(wrap(text, width), expected);
}

#[rstest]
#[case("#!/bin/sh\n# Usage: train FILE\n#\n# Trains.\necho hi\n", Some("Usage: train FILE\n\nTrains."))]
#[case("# only comment", Some("only comment"))]
#[case("echo hi\n# late comment\n", None)]
#[case("#!/bin/sh\n", None)]
fn leading_comment_blocks(#[case] source: &str, #[case] expected: Option<&str>) {
    assert_eq!(leading_comment_block(source).as_deref(), expected);
}

#[test]
fn program_usage_reads_the_script_comment_block() {
    let dir = ConfigDir::new().expect("temp dir");
    let script = dir
        .write("train.sh", &["#!/bin/sh", "# Usage: train FILE", "exec trainer \"$@\""])
        .expect("write script");
    assert_eq!(program_usage(&script).as_deref(), Some("Usage: train FILE"));
}

#[test]
fn program_usage_skips_missing_and_binary_programs() {
    let dir = ConfigDir::new().expect("temp dir");
    assert_eq!(program_usage(&dir.path().join("absent")), None);
    let binary = dir.path().join("trainer");
    std::fs::write(&binary, [0x23, 0x20, 0xff, 0xfe, 0x0a]).expect("write binary");
    assert_eq!(program_usage(&binary), None);
}

#[test]
fn default_help_falls_back_to_the_invoking_program() {
    let mut registry = Registry::new();
    registry.add_help(None, None).expect("default aliases");
    let err = registry
        .parse(&mut Bindings::new(), &TokenStream::new(["--help"]))
        .expect_err("help requested");
    // The test harness binary is not text, so no usage block precedes it.
    assert_eq!(
        err.help_text(),
        Some("  -h, --help              Show this help and exit.\n")
    );
}
