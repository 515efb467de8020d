//! Alias-list matching with exact, prefix, and bundled short-flag tiers.

use crate::error::DefinitionError;
use crate::value::{Scanner, ValueSpec};

use super::Priority;

/// Set of alias tokens accepted by one option.
///
/// Declarations list aliases separated by whitespace, `,` or `|`, so
/// `"-t, --train-file"` and `"-t|--train-file"` are equivalent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasSet {
    aliases: Vec<String>,
}

impl AliasSet {
    /// Parses an alias declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::EmptyAliasList`] when the declaration names
    /// no alias and [`DefinitionError::InvalidAlias`] when an alias contains
    /// `=`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optmatch::AliasSet;
    ///
    /// let aliases = AliasSet::parse("-t, --train-file").expect("valid declaration");
    /// assert_eq!(aliases.as_slice(), ["-t", "--train-file"]);
    /// ```
    pub fn parse(declaration: &str) -> Result<Self, DefinitionError> {
        let aliases: Vec<String> = declaration
            .split(|c: char| c.is_whitespace() || c == ',' || c == '|')
            .filter(|alias| !alias.is_empty())
            .map(str::to_owned)
            .collect();
        if aliases.is_empty() {
            return Err(DefinitionError::EmptyAliasList {
                declaration: declaration.to_owned(),
            });
        }
        if let Some(alias) = aliases.iter().find(|alias| alias.contains('=')) {
            return Err(DefinitionError::InvalidAlias {
                alias: alias.clone(),
            });
        }
        Ok(Self { aliases })
    }

    /// The aliases in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.aliases
    }

    /// Longest alias, used to derive binding names.
    #[must_use]
    pub fn longest(&self) -> Option<&str> {
        self.aliases
            .iter()
            .max_by_key(|alias| alias.len())
            .map(String::as_str)
    }

    /// Whether `alias` is one of the declared aliases.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.iter().any(|candidate| candidate == alias)
    }

    /// Tests the token under the scanner's cursor against the aliases.
    ///
    /// Anything after an `=` is ignored for comparison; when it is present
    /// the cursor ends just past the `=` so the value can be read inline.
    pub(crate) fn evaluate(&self, scanner: &mut Scanner<'_>) -> Priority {
        let start = scanner.cursor();
        let Ok(token) = scanner.value(&ValueSpec::new()) else {
            return Priority::None;
        };
        let (name, inline) = token
            .split_once('=')
            .map_or((token.as_str(), None), |(head, _)| (head, Some(head.len() + 1)));
        let named = if self.contains(name) {
            Priority::Exact
        } else if is_truncation(name)
            && self.aliases.iter().any(|alias| alias.starts_with(name))
        {
            Priority::Prefix
        } else {
            Priority::None
        };
        if named > Priority::None {
            if let Some(skip) = inline {
                scanner.seek(start.advanced_by(skip));
            }
            return named;
        }
        self.aliases
            .iter()
            .find(|alias| is_short_flag(alias) && token.starts_with(alias.as_str()))
            .map_or(Priority::None, |alias| {
                scanner.seek(start.advanced_by(alias.len()));
                Priority::Single
            })
    }
}

/// Whether `name` can stand for a longer alias: anything but an empty
/// candidate or a lone dash.
fn is_truncation(name: &str) -> bool {
    !name.is_empty() && name != "-"
}

/// A single dash followed by exactly one character other than a dash.
fn is_short_flag(alias: &str) -> bool {
    let mut chars = alias.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('-'), Some(flag), None) if flag != '-'
    )
}
