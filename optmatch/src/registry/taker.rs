//! Takers: what an option does once its matcher has won.

use std::fmt;
use std::sync::Arc;

use camino::Utf8Path;

use crate::bindings::Bindings;
use crate::cursor::{Cursor, TokenStream};
use crate::driver::{self, IncludeStack};
use crate::error::{DefinitionError, ParseError, ParseResult, TakeError};
use crate::value::{Scanner, ValueError, ValueSpec};

use super::{Registry, help};

type TakeFn = dyn Fn(&mut TakeContext<'_>) -> Result<(), TakeError> + Send + Sync;

/// Effect of an option after it has been selected.
#[derive(Clone)]
#[non_exhaustive]
pub enum Taker {
    /// Read one value and assign it to a binding.
    AssignOne {
        /// Binding receiving the value.
        binding: String,
        /// How the value is read.
        spec: ValueSpec,
    },
    /// Read between `min` and `max` values and append each to a binding.
    AppendMany {
        /// Binding receiving the values.
        binding: String,
        /// How each value is read.
        spec: ValueSpec,
        /// Fewest values accepted.
        min: usize,
        /// Most values read; `None` reads until a value is refused.
        max: Option<usize>,
    },
    /// Assign a fixed value without reading input.
    Set {
        /// Binding receiving the value.
        binding: String,
        /// Value assigned.
        value: String,
    },
    /// Read a path and parse that file with the shared bindings.
    Include {
        /// How the path is read.
        spec: ValueSpec,
    },
    /// Render the option summary and request that it be displayed.
    Help {
        /// Usage text shown above the option summary.
        usage: Option<String>,
    },
    /// Caller-supplied taker.
    Custom {
        /// Name recorded in the option's `:taker` attribute.
        name: String,
        /// The taker itself.
        take: Arc<TakeFn>,
    },
}

impl Taker {
    /// Taker assigning one unchecked value to `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidBinding`] when `binding` is not an
    /// identifier.
    pub fn assign(binding: &str) -> Result<Self, DefinitionError> {
        Self::assign_with(binding, ValueSpec::new())
    }

    /// Taker assigning one value read through `spec` to `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidBinding`] when `binding` is not an
    /// identifier.
    pub fn assign_with(binding: &str, spec: ValueSpec) -> Result<Self, DefinitionError> {
        Ok(Self::AssignOne {
            binding: identifier(binding)?,
            spec,
        })
    }

    /// Taker appending between `min` and `max` values to `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidBinding`] when `binding` is not an
    /// identifier.
    pub fn append(
        binding: &str,
        spec: ValueSpec,
        min: usize,
        max: Option<usize>,
    ) -> Result<Self, DefinitionError> {
        Ok(Self::AppendMany {
            binding: identifier(binding)?,
            spec,
            min,
            max,
        })
    }

    /// Taker assigning `value` to `binding` without reading input.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidBinding`] when `binding` is not an
    /// identifier.
    pub fn set(binding: &str, value: impl Into<String>) -> Result<Self, DefinitionError> {
        Ok(Self::Set {
            binding: identifier(binding)?,
            value: value.into(),
        })
    }

    /// Wraps a closure as a named custom taker.
    #[must_use]
    pub fn custom<N, F>(name: N, take: F) -> Self
    where
        N: Into<String>,
        F: Fn(&mut TakeContext<'_>) -> Result<(), TakeError> + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            take: Arc::new(take),
        }
    }

    /// Binding written by the taker, when it has exactly one.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        match self {
            Self::AssignOne { binding, .. }
            | Self::AppendMany { binding, .. }
            | Self::Set { binding, .. } => Some(binding),
            Self::Include { .. } | Self::Help { .. } | Self::Custom { .. } => None,
        }
    }

    /// Short description stored in the option's `:taker` attribute.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::AssignOne { binding, .. } => format!("assign {binding}"),
            Self::AppendMany {
                binding, min, max, ..
            } => max.map_or_else(
                || format!("append {binding} {min}.."),
                |limit| format!("append {binding} {min}..={limit}"),
            ),
            Self::Set { binding, value } => format!("set {binding}={value}"),
            Self::Include { .. } => "include".to_owned(),
            Self::Help { .. } => "help".to_owned(),
            Self::Custom { name, .. } => name.clone(),
        }
    }

    pub(crate) fn take(&self, cx: &mut TakeContext<'_>) -> Result<(), TakeError> {
        match self {
            Self::AssignOne { binding, spec } => {
                let value = cx.value(spec)?;
                cx.bindings.assign(binding, value);
            }
            Self::AppendMany {
                binding,
                spec,
                min,
                max,
            } => {
                let values = cx
                    .scanner
                    .value_times(*min, *max, |scanner| scanner.value(spec))?;
                for value in values {
                    cx.bindings.append(binding, value);
                }
            }
            Self::Set { binding, value } => cx.bindings.assign(binding, value.clone()),
            Self::Include { spec } => {
                let path = cx.value(spec)?;
                cx.include(&path)?;
            }
            Self::Help { usage } => {
                let text = help::render_help(cx.registry, usage.as_deref());
                return Err(ParseError::DisplayHelp { text }.into());
            }
            Self::Custom { take, .. } => take(cx)?,
        }
        Ok(())
    }
}

impl fmt::Debug for Taker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Taker").field(&self.describe()).finish()
    }
}

/// Conversion into a [`Taker`], accepting a bare binding name as sugar
/// for [`Taker::assign`].
pub trait IntoTaker {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::InvalidBinding`] when a binding name is
    /// not an identifier.
    fn into_taker(self) -> Result<Taker, DefinitionError>;
}

impl IntoTaker for Taker {
    fn into_taker(self) -> Result<Taker, DefinitionError> {
        Ok(self)
    }
}

impl IntoTaker for &str {
    fn into_taker(self) -> Result<Taker, DefinitionError> {
        Taker::assign(self)
    }
}

impl IntoTaker for String {
    fn into_taker(self) -> Result<Taker, DefinitionError> {
        Taker::assign(&self)
    }
}

/// Whether `name` is an identifier: an ASCII letter or `_` followed by
/// letters, digits, or `_`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn identifier(name: &str) -> Result<String, DefinitionError> {
    if is_identifier(name) {
        Ok(name.to_owned())
    } else {
        Err(DefinitionError::InvalidBinding {
            name: name.to_owned(),
        })
    }
}

/// State handed to a taker: the scanner positioned where the matcher left
/// it, the shared bindings, and the registry.
pub struct TakeContext<'a> {
    pub(crate) scanner: Scanner<'a>,
    pub(crate) bindings: &'a mut Bindings,
    pub(crate) registry: &'a Registry,
    pub(crate) includes: &'a mut IncludeStack,
}

impl<'a> TakeContext<'a> {
    /// Scanner over the tokens of the running parse.
    pub const fn scanner(&mut self) -> &mut Scanner<'a> {
        &mut self.scanner
    }

    /// Current cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.scanner.cursor()
    }

    /// Reads one value at the cursor.
    ///
    /// # Errors
    ///
    /// Propagates [`Scanner::value`] failures.
    pub fn value(&mut self, spec: &ValueSpec) -> Result<String, ValueError> {
        self.scanner.value(spec)
    }

    /// Shared bindings.
    pub const fn bindings(&mut self) -> &mut Bindings {
        &mut *self.bindings
    }

    /// Registry driving the parse.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        self.registry
    }

    /// Runs an independent parse of `tokens` with the same registry and
    /// bindings.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Nested`] wrapping the nested parse's failure
    /// together with `tokens`.
    pub fn parse_nested(&mut self, tokens: &TokenStream) -> ParseResult<()> {
        driver::run(self.registry, self.bindings, self.includes, tokens).map_err(|source| {
            ParseError::Nested {
                tokens: tokens.clone(),
                source: Box::new(source),
            }
        })
    }

    /// Parses the configuration file at `path` with the shared bindings.
    ///
    /// Relative paths resolve against the directory of the file currently
    /// being parsed, if any.
    ///
    /// # Errors
    ///
    /// Returns the file's parse failure, including include cycles.
    pub fn include(&mut self, path: &str) -> ParseResult<()> {
        let resolved = self.includes.resolve(Utf8Path::new(path));
        driver::run_file(self.registry, self.bindings, self.includes, &resolved)
    }
}
