//! Façade owning a registry and its bindings.

use camino::Utf8Path;
use figment::Figment;
use serde::de::DeserializeOwned;

use crate::bindings::Bindings;
use crate::cursor::TokenStream;
use crate::driver::report;
use crate::error::{DefinitionError, ParseResult};
use crate::flag::{FlagKind, define_flag};
use crate::matcher::IntoMatcher;
use crate::registry::{IntoTaker, Registry, render_help};
use crate::store::RecordPos;

/// Option registry and bound state for one program.
///
/// # Examples
///
/// ```
/// use optmatch::{Cli, FlagKind, TokenStream};
///
/// let mut cli = Cli::new();
/// cli.add_option("--train-file", "train_file", &["Training log."])
///     .expect("valid option");
/// cli.define_flag(FlagKind::Integer, "epochs", "10", &["Passes over the data."])
///     .expect("valid flag");
///
/// cli.parse(&TokenStream::new(["--epochs=3", "--train-file", "a.log"]))
///     .expect("parse succeeds");
/// assert_eq!(cli.bindings().get_int("epochs"), Some(3));
/// assert_eq!(cli.bindings().get_str("train_file"), Some("a.log"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Cli {
    registry: Registry,
    bindings: Bindings,
}

impl Cli {
    /// Empty command line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`Registry::add_option`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when the matcher or taker is malformed.
    pub fn add_option(
        &mut self,
        matcher: impl IntoMatcher,
        taker: impl IntoTaker,
        doc: &[&str],
    ) -> Result<RecordPos, DefinitionError> {
        self.registry.add_option(matcher, taker, doc)
    }

    /// See [`Registry::add_positional`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when `binding` is not an identifier.
    pub fn add_positional(
        &mut self,
        binding: &str,
        doc: &[&str],
    ) -> Result<RecordPos, DefinitionError> {
        self.registry.add_positional(binding, doc)
    }

    /// See [`Registry::add_help`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when `aliases` is malformed.
    pub fn add_help(
        &mut self,
        aliases: Option<&str>,
        usage: Option<&str>,
    ) -> Result<RecordPos, DefinitionError> {
        self.registry.add_help(aliases, usage)
    }

    /// See [`Registry::add_include`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when `aliases` is malformed.
    pub fn add_include(
        &mut self,
        aliases: &str,
        doc: &[&str],
    ) -> Result<RecordPos, DefinitionError> {
        self.registry.add_include(aliases, doc)
    }

    /// See [`define_flag`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when the flag is malformed.
    pub fn define_flag(
        &mut self,
        kind: FlagKind,
        name: &str,
        initial: &str,
        doc: &[&str],
    ) -> Result<String, DefinitionError> {
        define_flag(&mut self.registry, &mut self.bindings, kind, name, initial, doc)
    }

    /// Parses `tokens` into the owned bindings.
    ///
    /// # Errors
    ///
    /// See [`Registry::parse`].
    pub fn parse(&mut self, tokens: &TokenStream) -> ParseResult<()> {
        self.registry.parse(&mut self.bindings, tokens)
    }

    /// Parses `tokens`, exiting the process on failure.
    ///
    /// Help requests print to standard output and exit with
    /// [`HELP_EXIT`](crate::HELP_EXIT); other failures print a report
    /// marking the offending token and exit with
    /// [`PARSE_FAILURE_EXIT`](crate::PARSE_FAILURE_EXIT).
    pub fn parse_all(&mut self, tokens: &TokenStream) {
        let Err(err) = self.parse(tokens) else {
            return;
        };
        std::process::exit(report(&err, tokens));
    }

    /// See [`Registry::parse_file`].
    ///
    /// # Errors
    ///
    /// Returns the first failing line wrapped with its location.
    pub fn parse_file(&mut self, path: impl AsRef<Utf8Path>) -> ParseResult<()> {
        self.registry.parse_file(&mut self.bindings, path)
    }

    /// See [`Registry::parse_line`].
    ///
    /// # Errors
    ///
    /// Returns the tokenizing or parse failure.
    pub fn parse_line(&mut self, line: &str) -> ParseResult<()> {
        self.registry.parse_line(&mut self.bindings, line)
    }

    /// Runs `f` in an inner binding scope. Flags defined inside shadow the
    /// outer bindings until `f` returns.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.bindings.push_scope();
        let result = f(self);
        self.bindings.pop_scope();
        result
    }

    /// Deserializes the bindings into `T` through `figment`.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] when the bindings do not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, figment::Error> {
        Figment::new().merge(self.bindings.clone()).extract()
    }

    /// Help text for every registered option.
    #[must_use]
    pub fn help(&self, usage: Option<&str>) -> String {
        render_help(&self.registry, usage)
    }

    /// The registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The bindings.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}
