//! Option registry: matcher, taker, and documentation triples.
//!
//! Every option is stored as one record in a [`RecordStore`] with the
//! attribute groups `:matcher` (its labels), `:taker` (a description of its
//! effect) and `:doc` (documentation lines). The executable matcher and
//! taker are kept alongside, keyed by the record's position. The registry
//! only grows; parsing reads it without mutation.

pub(crate) mod help;
mod taker;

pub use help::render_help;
pub use taker::{IntoTaker, TakeContext, Taker};

pub(crate) use taker::is_identifier;

use crate::error::DefinitionError;
use crate::flag::FlagKind;
use crate::matcher::{IntoMatcher, Matcher, Priority};
use crate::store::{Record, RecordPos, RecordStore};
use crate::value::ValueSpec;

/// Tag of the attribute holding an option's labels.
pub const MATCHER_TAG: &str = ":matcher";
/// Tag of the attribute describing an option's taker.
pub const TAKER_TAG: &str = ":taker";
/// Tag of the attribute holding an option's documentation lines.
pub const DOC_TAG: &str = ":doc";

/// Aliases used by [`Registry::add_help`] when none are given.
pub const DEFAULT_HELP_ALIASES: &str = "-h --help";

#[derive(Clone, Debug)]
pub(crate) struct OptionEntry {
    pub(crate) pos: RecordPos,
    pub(crate) label: String,
    pub(crate) matcher: Matcher,
    pub(crate) taker: Taker,
    /// Kind of the typed flag this option was defined as, if any.
    pub(crate) flag: Option<FlagKind>,
}

/// Ordered collection of option definitions.
///
/// # Examples
///
/// ```
/// use optmatch::{Bindings, Registry, TokenStream};
///
/// let mut registry = Registry::new();
/// registry
///     .add_option("-t --train-file", "train_file", &["Training log."])
///     .expect("valid option");
///
/// let mut bindings = Bindings::new();
/// registry
///     .parse(&mut bindings, &TokenStream::new(["--train", "train.log"]))
///     .expect("parse succeeds");
/// assert_eq!(bindings.get_str("train_file"), Some("train.log"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    store: RecordStore,
    entries: Vec<OptionEntry>,
}

impl Registry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option.
    ///
    /// An alias declaration such as `"-t --train-file"` stands for an alias
    /// matcher and a bare identifier such as `"train_file"` for a taker
    /// assigning one value to that binding.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when either half is malformed.
    pub fn add_option(
        &mut self,
        matcher: impl IntoMatcher,
        taker: impl IntoTaker,
        doc: &[&str],
    ) -> Result<RecordPos, DefinitionError> {
        let resolved = matcher.into_matcher()?;
        Ok(self.insert(resolved, taker.into_taker()?, doc, None))
    }

    /// Registers a positional catch-all appending each non-option token to
    /// `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidBinding`] when `binding` is not an
    /// identifier.
    pub fn add_positional(
        &mut self,
        binding: &str,
        doc: &[&str],
    ) -> Result<RecordPos, DefinitionError> {
        let taker = Taker::append(binding, ValueSpec::new(), 1, Some(1))?;
        Ok(self.insert(Matcher::positional(Priority::Position), taker, doc, None))
    }

    /// Registers a help option.
    ///
    /// `aliases` defaults to [`DEFAULT_HELP_ALIASES`]. Without `usage` the
    /// leading `#` comment block of the invoking program is used, if it has
    /// one.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when `aliases` is malformed.
    pub fn add_help(
        &mut self,
        aliases: Option<&str>,
        usage: Option<&str>,
    ) -> Result<RecordPos, DefinitionError> {
        let matcher = Matcher::aliases(aliases.unwrap_or(DEFAULT_HELP_ALIASES))?;
        let text = usage
            .map(str::to_owned)
            .or_else(help::invoking_program_usage);
        Ok(self.insert(
            matcher,
            Taker::Help { usage: text },
            &["Show this help and exit."],
            None,
        ))
    }

    /// Registers an option reading a path and parsing that file as
    /// configuration lines.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when `aliases` is malformed.
    pub fn add_include(
        &mut self,
        aliases: &str,
        doc: &[&str],
    ) -> Result<RecordPos, DefinitionError> {
        let matcher = Matcher::aliases(aliases)?;
        let taker = Taker::Include {
            spec: ValueSpec::new(),
        };
        Ok(self.insert(matcher, taker, doc, None))
    }

    /// Registers an option belonging to a typed flag of `kind`.
    pub(crate) fn add_flag_option(
        &mut self,
        aliases: &str,
        taker: Taker,
        doc: &[&str],
        kind: FlagKind,
    ) -> Result<RecordPos, DefinitionError> {
        let matcher = Matcher::aliases(aliases)?;
        Ok(self.insert(matcher, taker, doc, Some(kind)))
    }

    fn insert(
        &mut self,
        matcher: Matcher,
        taker: Taker,
        doc: &[&str],
        flag: Option<FlagKind>,
    ) -> RecordPos {
        let labels = entry_labels(&matcher, &taker);
        let record = Record::new()
            .with(MATCHER_TAG, labels.iter().cloned())
            .with(TAKER_TAG, [taker.describe()])
            .with(DOC_TAG, doc.iter().copied());
        let pos = self.store.append(record);
        tracing::trace!(option = %labels.join(", "), taker = %taker.describe(), "registered option");
        self.entries.push(OptionEntry {
            pos,
            label: labels.join(", "),
            matcher,
            taker,
            flag,
        });
        pos
    }

    /// Whether an option writing `binding` is registered.
    #[must_use]
    pub fn binds(&self, binding: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.taker.binding() == Some(binding))
    }

    /// Kind of the typed flag writing `binding`, if one was defined.
    pub(crate) fn flag_kind(&self, binding: &str) -> Option<FlagKind> {
        self.entries
            .iter()
            .filter(|entry| entry.taker.binding() == Some(binding))
            .find_map(|entry| entry.flag)
    }

    /// Records describing the registered options.
    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Label of the option stored at `pos`.
    #[must_use]
    pub fn label(&self, pos: RecordPos) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.pos == pos)
            .map(|entry| entry.label.as_str())
    }

    /// Number of registered options.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no option is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }
}

/// Labels for the `:matcher` attribute. Positional options are labelled
/// after their binding.
fn entry_labels(matcher: &Matcher, taker: &Taker) -> Vec<String> {
    let labels = matcher.labels();
    if !labels.is_empty() {
        return labels;
    }
    vec![format!("<{}>", taker.binding().unwrap_or("positional"))]
}

#[cfg(test)]
mod tests;
