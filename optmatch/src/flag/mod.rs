//! Typed flag presets over the registry and the value engine.
//!
//! A flag is an option with a preset check, a bound variable declared in
//! the current binding scope, and a documented default. Boolean flags read
//! an optional attached value, so `--vb` means true, `--vb=false` means
//! false, and a companion `--no-vb` option forces false.

use std::fmt;

use serde::Serialize;

use crate::bindings::Bindings;
use crate::cursor::Cursor;
use crate::error::DefinitionError;
use crate::matcher::AliasSet;
use crate::registry::{Registry, Taker, is_identifier};
use crate::value::ValueSpec;

/// Value type of a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// Any string.
    String,
    /// A decimal integer with an optional sign.
    Integer,
    /// A decimal floating-point number.
    Float,
    /// A boolean, stored as `"1"` or `"0"`.
    Boolean,
}

impl FlagKind {
    /// Lowercase name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// Value spec used by the flag's taker.
    #[must_use]
    pub fn spec(self) -> ValueSpec {
        match self {
            Self::String => ValueSpec::new(),
            Self::Integer => ValueSpec::integer(),
            Self::Float => ValueSpec::float(),
            Self::Boolean => ValueSpec::boolean(),
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Defines a typed flag and returns the name of its binding.
///
/// `name` is either an alias declaration starting with a dash, whose
/// longest alias names the binding (`"-e --max-epochs"` binds
/// `max_epochs`), or a bare binding name from which a `--name` alias is
/// built. The binding is declared in the current scope of `bindings` with
/// `initial` as its value; the option itself is registered only once per
/// registry, so re-running a definition in a nested scope just shadows the
/// binding.
///
/// # Errors
///
/// Returns a [`DefinitionError`] when the aliases or the derived binding
/// name are malformed, when `initial` fails the flag's own check, or
/// [`DefinitionError::BindingInUse`] when the binding is already written by
/// an option other than a flag of the same kind.
///
/// # Examples
///
/// ```
/// use optmatch::{Bindings, FlagKind, Registry, TokenStream, define_flag};
///
/// let mut registry = Registry::new();
/// let mut bindings = Bindings::new();
/// let name = define_flag(&mut registry, &mut bindings, FlagKind::Boolean, "vb", "false", &[])
///     .expect("valid flag");
///
/// registry
///     .parse(&mut bindings, &TokenStream::new(["--vb"]))
///     .expect("parse succeeds");
/// assert_eq!(bindings.get_bool(&name), Some(true));
/// ```
pub fn define_flag(
    registry: &mut Registry,
    bindings: &mut Bindings,
    kind: FlagKind,
    name: &str,
    initial: &str,
    doc: &[&str],
) -> Result<String, DefinitionError> {
    let (declaration, binding) = flag_names(name)?;
    let normalised = kind
        .spec()
        .validate(initial.to_owned(), Cursor::START)
        .map_err(|_| DefinitionError::InvalidDefault {
            flag: binding.clone(),
            value: initial.to_owned(),
            kind: kind.name().to_owned(),
        })?;
    if registry.flag_kind(&binding) == Some(kind) {
        bindings.declare(&binding, &normalised, Some(kind));
        return Ok(binding);
    }
    if registry.binds(&binding) {
        return Err(DefinitionError::BindingInUse { binding });
    }
    let aliases = AliasSet::parse(&declaration)?;
    let default_line = format!("Default: {initial}");
    let mut lines: Vec<&str> = doc.to_vec();
    lines.push(&default_line);
    registry.add_flag_option(
        &declaration,
        Taker::assign_with(&binding, kind.spec())?,
        &lines,
        kind,
    )?;
    if kind == FlagKind::Boolean {
        let negation = format!("--no-{}", binding.replace('_', "-"));
        let negation_doc = format!("Unset {}.", aliases.as_slice().join(", "));
        registry.add_flag_option(&negation, Taker::set(&binding, "0")?, &[&negation_doc], kind)?;
    }
    bindings.declare(&binding, &normalised, Some(kind));
    Ok(binding)
}

/// Alias declaration and binding name for a flag definition.
fn flag_names(name: &str) -> Result<(String, String), DefinitionError> {
    let binding = if name.starts_with('-') {
        let aliases = AliasSet::parse(name)?;
        aliases
            .longest()
            .unwrap_or_default()
            .trim_start_matches('-')
            .replace('-', "_")
    } else {
        name.to_owned()
    };
    if !is_identifier(&binding) {
        return Err(DefinitionError::InvalidBinding { name: binding });
    }
    let declaration = if name.starts_with('-') {
        name.to_owned()
    } else {
        format!("--{}", binding.replace('_', "-"))
    };
    Ok((declaration, binding))
}

#[cfg(test)]
mod tests;
