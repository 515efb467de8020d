//! Tests for error classification through configuration wrappers.

use camino::Utf8PathBuf;
use rstest::rstest;

use super::{ErrorKind, MatchFailure, ParseError};
use crate::cursor::Cursor;

fn wrap(source: ParseError) -> ParseError {
    ParseError::Config {
        path: Utf8PathBuf::from("train.conf"),
        line_number: 3,
        line: "--bogus".to_owned(),
        source: Box::new(source),
    }
}

#[rstest]
#[case(
    ParseError::NoMatch { token: "--bogus".into(), position: Cursor::START },
    ErrorKind::Match(MatchFailure::None)
)]
#[case(
    ParseError::Ambiguous {
        token: "--tr".into(),
        candidates: vec!["--train".into(), "--trace".into()],
        position: Cursor::START,
    },
    ErrorKind::Match(MatchFailure::Multiple)
)]
#[case(
    ParseError::Take { option: "--sum".into(), detail: "run out of input".into(), position: Cursor::at_token(1) },
    ErrorKind::Take
)]
#[case(ParseError::Tokenize { line: "'open".into() }, ErrorKind::Input)]
fn kind_sees_through_config_wrappers(#[case] err: ParseError, #[case] expected: ErrorKind) {
    assert_eq!(err.kind(), expected);
    assert_eq!(wrap(err).kind(), expected);
}

#[test]
fn position_comes_from_innermost_error() {
    let err = wrap(ParseError::Take {
        option: "--sum".into(),
        detail: "run out of input".into(),
        position: Cursor::new(1, 4),
    });
    assert_eq!(err.position(), Some(Cursor::new(1, 4)));
    assert_eq!(ParseError::Tokenize { line: String::new() }.position(), None);
}

#[test]
fn help_requests_are_not_failures() {
    let err = wrap(ParseError::DisplayHelp { text: "usage".into() });
    assert!(err.is_display_request());
    assert_eq!(err.help_text(), Some("usage"));
    assert!(!ParseError::CyclicInclude { cycle: "a -> a".into() }.is_display_request());
}

#[test]
fn config_errors_name_file_and_line() {
    let err = wrap(ParseError::NoMatch {
        token: "--bogus".into(),
        position: Cursor::START,
    });
    assert_eq!(
        err.to_string(),
        "train.conf:3: --bogus: no option matches \"--bogus\" at position 0"
    );
}

#[test]
fn ambiguity_lists_candidates() {
    let err = ParseError::Ambiguous {
        token: "--tr".into(),
        candidates: vec!["--train".into(), "--trace".into()],
        position: Cursor::START,
    };
    assert_eq!(
        err.to_string(),
        "\"--tr\" at position 0 is ambiguous between --train, --trace"
    );
}
