//! Unit tests for matcher priorities and resulting cursors.

use rstest::rstest;

use super::{Matcher, Priority};
use crate::cursor::{Cursor, TokenStream};
use crate::value::Scanner;

fn evaluate(matcher: &Matcher, token: &str) -> (Priority, Cursor) {
    let tokens = TokenStream::new([token, "next"]);
    let mut scanner = Scanner::new(&tokens);
    let priority = matcher.evaluate(&mut scanner);
    (priority, scanner.cursor())
}

#[rstest]
#[case("--train-file", Priority::Exact, Cursor::at_token(1))]
#[case("--train", Priority::Prefix, Cursor::at_token(1))]
#[case("-t", Priority::Exact, Cursor::at_token(1))]
#[case("-tX", Priority::Single, Cursor::new(0, 2))]
#[case("--train-file=a.log", Priority::Exact, Cursor::new(0, 13))]
#[case("--tr=a.log", Priority::Prefix, Cursor::new(0, 5))]
#[case("--Train-file", Priority::None, Cursor::at_token(1))]
#[case("train", Priority::None, Cursor::at_token(1))]
#[case("-", Priority::None, Cursor::at_token(1))]
fn alias_tiers(#[case] token: &str, #[case] priority: Priority, #[case] cursor: Cursor) {
    let matcher = Matcher::aliases("-t --train-file").expect("valid aliases");
    let (found, at) = evaluate(&matcher, token);
    assert_eq!(found, priority);
    if found > Priority::None {
        assert_eq!(at, cursor);
    }
}

#[rstest]
#[case("train", Priority::Exact)]
#[case("tra", Priority::Prefix)]
#[case("t", Priority::Prefix)]
#[case("trains", Priority::None)]
#[case("-", Priority::None)]
fn command_style_aliases_accept_truncations(#[case] token: &str, #[case] priority: Priority) {
    let matcher = Matcher::aliases("train").expect("valid alias");
    let (found, cursor) = evaluate(&matcher, token);
    assert_eq!(found, priority);
    if found > Priority::None {
        assert_eq!(cursor, Cursor::at_token(1));
    }
}

#[test]
fn priorities_are_totally_ordered() {
    let mut tiers = vec![
        Priority::Exact,
        Priority::None,
        Priority::Prefix,
        Priority::Single,
        Priority::Position,
    ];
    tiers.sort();
    assert_eq!(
        tiers.iter().map(|tier| tier.rank()).collect::<Vec<_>>(),
        vec![0, 100, 1_000, 10_000, 100_000]
    );
}

#[rstest]
#[case("input.txt", Priority::Position)]
#[case("--input", Priority::None)]
#[case("-", Priority::Position)]
fn positional_matches_only_non_options(#[case] token: &str, #[case] expected: Priority) {
    let matcher = Matcher::positional(Priority::Position);
    let (found, cursor) = evaluate(&matcher, token);
    assert_eq!(found, expected);
    assert_eq!(cursor, Cursor::START);
}

#[test]
fn positional_declines_exhausted_stream() {
    let tokens = TokenStream::default();
    let mut scanner = Scanner::new(&tokens);
    assert_eq!(Matcher::positional(Priority::Position).evaluate(&mut scanner), Priority::None);
}

#[test]
fn custom_matcher_controls_priority_and_cursor() {
    let matcher = Matcher::custom("<number>", |scanner| {
        let start = scanner.cursor();
        match scanner.peek() {
            Some(token) if token.parse::<i64>().is_ok() => {
                scanner.seek(start.next_token());
                Priority::Exact
            }
            _ => Priority::None,
        }
    });
    assert_eq!(evaluate(&matcher, "-12"), (Priority::Exact, Cursor::at_token(1)));
    assert_eq!(evaluate(&matcher, "twelve").0, Priority::None);
    assert_eq!(matcher.labels(), ["<number>"]);
}
