//! Token streams and the cursor used to address positions inside them.
//!
//! A [`Cursor`] names a token by index and a byte offset within that token.
//! Offsets other than zero only appear after a bundled short flag (`-c0`) or
//! an inline assignment (`--opt=value`) has been matched, so that the value
//! can be read from the middle of the token.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Position within a [`TokenStream`].
///
/// Cursors order as `(index, offset)` tuples. The textual form is `index`
/// when the offset is zero and `index-offset` otherwise.
///
/// # Examples
///
/// ```
/// use optmatch::Cursor;
///
/// let cursor: Cursor = "3-2".parse().expect("valid cursor");
/// assert_eq!(cursor.split(), (3, 2));
/// assert_eq!(Cursor::at_token(4).to_string(), "4");
/// assert!(Cursor::new(3, 2) < Cursor::at_token(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    index: usize,
    offset: usize,
}

impl Cursor {
    /// Cursor addressing the start of the first token.
    pub const START: Self = Self::new(0, 0);

    /// Creates a cursor from a token index and a byte offset.
    #[must_use]
    pub const fn new(index: usize, offset: usize) -> Self {
        Self { index, offset }
    }

    /// Creates a cursor at the start of token `index`.
    #[must_use]
    pub const fn at_token(index: usize) -> Self {
        Self::new(index, 0)
    }

    /// Index of the addressed token.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Byte offset within the addressed token.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Returns the cursor as an `(index, offset)` pair.
    #[must_use]
    pub const fn split(self) -> (usize, usize) {
        (self.index, self.offset)
    }

    /// Whether the cursor sits on a token boundary.
    #[must_use]
    pub const fn is_token_start(self) -> bool {
        self.offset == 0
    }

    /// Cursor at the start of the following token.
    #[must_use]
    pub const fn next_token(self) -> Self {
        Self::at_token(self.index + 1)
    }

    /// Cursor `bytes` further into the current token.
    #[must_use]
    pub const fn advanced_by(self, bytes: usize) -> Self {
        Self::new(self.index, self.offset + bytes)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset == 0 {
            write!(f, "{}", self.index)
        } else {
            write!(f, "{}-{}", self.index, self.offset)
        }
    }
}

/// Failure to read a cursor from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cursor {input:?}: expected `index` or `index-offset`")]
pub struct CursorParseError {
    /// Text that failed to parse.
    pub input: String,
}

impl FromStr for Cursor {
    type Err = CursorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CursorParseError {
            input: s.to_owned(),
        };
        let (index_text, offset_text) = s
            .split_once('-')
            .map_or((s, None), |(index, offset)| (index, Some(offset)));
        let index = index_text.parse().map_err(|_| invalid())?;
        let offset = offset_text
            .map_or(Ok(0), str::parse::<usize>)
            .map_err(|_| invalid())?;
        Ok(Self::new(index, offset))
    }
}

/// Returns `true` when `token` has the shape of an option: one or more
/// dashes followed by a character that is neither a space nor `=`.
///
/// # Examples
///
/// ```
/// use optmatch::is_option_shaped;
///
/// assert!(is_option_shaped("-v"));
/// assert!(is_option_shaped("--train-file"));
/// assert!(!is_option_shaped("-"));
/// assert!(!is_option_shaped("-=x"));
/// assert!(!is_option_shaped("train.log"));
/// ```
#[must_use]
pub fn is_option_shaped(token: &str) -> bool {
    token
        .strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c != ' ' && c != '=')
}

/// Immutable sequence of tokens consumed by one parse invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
}

impl TokenStream {
    /// Builds a stream from any sequence of string-like tokens.
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a stream from the process arguments, skipping the program name.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    /// Splits one configuration line into tokens using shell word rules.
    ///
    /// Returns `None` when the line has unbalanced quoting.
    #[must_use]
    pub fn split_line(line: &str) -> Option<Self> {
        shlex::split(line).map(Self::new)
    }

    /// Number of tokens in the stream.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds no tokens.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// The tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        self.tokens.as_slice()
    }

    /// Iterates over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Text of the addressed token from the cursor's offset to its end.
    ///
    /// Returns `None` when the cursor lies past the last token or its offset
    /// is not a character boundary of the token.
    #[must_use]
    pub fn remainder(&self, cursor: Cursor) -> Option<&str> {
        self.get(cursor.index())?.get(cursor.offset()..)
    }

    /// Whether the cursor has moved past the final token.
    #[must_use]
    pub const fn is_exhausted(&self, cursor: Cursor) -> bool {
        cursor.index() >= self.tokens.len()
    }

    /// Whether the cursor points at the start of an option-shaped token.
    #[must_use]
    pub fn is_option_at(&self, cursor: Cursor) -> bool {
        cursor.is_token_start() && self.get(cursor.index()).is_some_and(is_option_shaped)
    }

    /// Whether the cursor sits at the very end of a token it has partly read.
    pub(crate) fn is_spent(&self, cursor: Cursor) -> bool {
        !cursor.is_token_start()
            && self
                .get(cursor.index())
                .is_some_and(|token| cursor.offset() >= token.len())
    }
}

impl<S: Into<String>> FromIterator<S> for TokenStream {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Cursor::START)]
    #[case("7", Cursor::at_token(7))]
    #[case("2-5", Cursor::new(2, 5))]
    fn parses_cursor_forms(#[case] text: &str, #[case] expected: Cursor) {
        assert_eq!(text.parse::<Cursor>(), Ok(expected));
        assert_eq!(expected.to_string(), text);
    }

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case("1-")]
    #[case("1-2-3")]
    #[case("-2")]
    fn rejects_malformed_cursors(#[case] text: &str) {
        let err = text.parse::<Cursor>().expect_err("cursor should be rejected");
        assert_eq!(err.input, text);
    }

    #[test]
    fn cursors_order_by_index_then_offset() {
        let mut cursors = vec![
            Cursor::at_token(2),
            Cursor::new(1, 3),
            Cursor::at_token(1),
            Cursor::new(0, 9),
        ];
        cursors.sort();
        assert_eq!(
            cursors,
            vec![
                Cursor::new(0, 9),
                Cursor::at_token(1),
                Cursor::new(1, 3),
                Cursor::at_token(2),
            ]
        );
    }

    #[rstest]
    #[case("--", true)]
    #[case("--=", true)]
    #[case("-x", true)]
    #[case("- x", false)]
    #[case("", false)]
    #[case("x-y", false)]
    fn recognises_option_shape(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_option_shaped(token), expected);
    }

    #[test]
    fn option_shape_requires_token_start() {
        let stream = TokenStream::new(["-c-v"]);
        assert!(stream.is_option_at(Cursor::START));
        assert!(!stream.is_option_at(Cursor::new(0, 2)));
    }

    #[test]
    fn remainder_reads_from_offset() {
        let stream = TokenStream::new(["--opt=value", "next"]);
        assert_eq!(stream.remainder(Cursor::new(0, 6)), Some("value"));
        assert_eq!(stream.remainder(Cursor::at_token(1)), Some("next"));
        assert_eq!(stream.remainder(Cursor::at_token(2)), None);
        assert!(stream.is_exhausted(Cursor::at_token(2)));
    }

    #[test]
    fn spent_cursor_detects_fully_read_token() {
        let stream = TokenStream::new(["--opt="]);
        assert!(stream.is_spent(Cursor::new(0, 6)));
        assert!(!stream.is_spent(Cursor::new(0, 5)));
        assert!(!stream.is_spent(Cursor::START));
    }

    #[test]
    fn split_line_follows_shell_words() {
        let stream = TokenStream::split_line("--train-file 'my train.log'").expect("balanced");
        assert_eq!(stream.as_slice(), ["--train-file", "my train.log"]);
        assert!(TokenStream::split_line("--name 'unbalanced").is_none());
    }
}
