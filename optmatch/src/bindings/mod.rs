//! Bound output variables shared by takers, flags, and nested parses.
//!
//! Takers never reach variables by name reflection: every parse threads one
//! [`Bindings`] table through the driver, and takers read and write it
//! through the context they are handed. Dynamic scoping is modelled with
//! explicit frames. Declaring a name inside a frame shadows the outer entry
//! until the frame is popped, when the outer entry is restored.

mod provider;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde::ser::Serializer;

use crate::cursor::Cursor;
use crate::flag::FlagKind;
use crate::value::Check;

/// Value held by a binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// A single value, as assigned by `AssignOne` takers and flags.
    Scalar(String),
    /// Values accumulated by `AppendMany` takers.
    List(Vec<String>),
}

impl BoundValue {
    /// The scalar value, if this is not a list.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// The values as a slice; a scalar reads as a one-element list.
    #[must_use]
    pub fn as_list(&self) -> &[String] {
        match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Binding {
    pub(crate) value: BoundValue,
    pub(crate) default: Option<String>,
    pub(crate) kind: Option<FlagKind>,
}

impl Binding {
    const fn untyped(value: BoundValue) -> Self {
        Self {
            value,
            default: None,
            kind: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Frame {
    declared: BTreeSet<String>,
    shadowed: Vec<(String, Option<Binding>)>,
}

/// Table of bound variables.
///
/// # Examples
///
/// ```
/// use optmatch::Bindings;
///
/// let mut bindings = Bindings::new();
/// bindings.declare("verbose", "0", None);
/// bindings.scoped(|inner| {
///     inner.declare("verbose", "1", None);
///     assert_eq!(inner.get_str("verbose"), Some("1"));
/// });
/// assert_eq!(bindings.get_str("verbose"), Some("0"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: BTreeMap<String, Binding>,
    frames: Vec<Frame>,
}

impl Bindings {
    /// Empty table with only the root scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` in the current scope with `initial` as its value and
    /// recorded default.
    ///
    /// Declaring a name already declared in the current scope re-assigns it.
    /// Declaring it in an inner scope shadows the outer binding until the
    /// scope exits.
    pub fn declare(&mut self, name: &str, initial: &str, kind: Option<FlagKind>) {
        let binding = Binding {
            value: BoundValue::Scalar(initial.to_owned()),
            default: Some(initial.to_owned()),
            kind,
        };
        let shadowed = self.values.insert(name.to_owned(), binding);
        if let Some(frame) = self.frames.last_mut()
            && frame.declared.insert(name.to_owned())
        {
            frame.shadowed.push((name.to_owned(), shadowed));
        }
    }

    /// Sets `name` to a single value, keeping any recorded default and kind.
    pub fn assign(&mut self, name: &str, value: impl Into<String>) {
        let scalar = BoundValue::Scalar(value.into());
        match self.values.entry(name.to_owned()) {
            Entry::Occupied(mut entry) => entry.get_mut().value = scalar,
            Entry::Vacant(entry) => {
                entry.insert(Binding::untyped(scalar));
            }
        }
    }

    /// Appends `value` to the list bound to `name`.
    ///
    /// A scalar binding becomes a list starting with its current value.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let item = value.into();
        let binding = match self.values.entry(name.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(Binding::untyped(BoundValue::List(vec![item])));
                return;
            }
        };
        match &mut binding.value {
            BoundValue::List(values) => values.push(item),
            BoundValue::Scalar(current) => {
                let first = std::mem::take(current);
                binding.value = BoundValue::List(vec![first, item]);
            }
        }
    }

    /// Runs `f` in a fresh inner scope, restoring shadowed bindings after.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_scope();
        let result = f(self);
        self.pop_scope();
        result
    }

    pub(crate) fn push_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    pub(crate) fn pop_scope(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        for (name, previous) in frame.shadowed.into_iter().rev() {
            let Some(binding) = previous else {
                self.values.remove(&name);
                continue;
            };
            self.values.insert(name, binding);
        }
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.values.get(name).map(|binding| &binding.value)
    }

    /// Scalar value bound to `name`.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(BoundValue::as_scalar)
    }

    /// Values bound to `name`, reading a scalar as a one-element list.
    #[must_use]
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(BoundValue::as_list)
    }

    /// Scalar value bound to `name`, parsed as an integer.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get_str(name).and_then(|value| value.parse().ok())
    }

    /// Scalar value bound to `name`, parsed as a float.
    #[must_use]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get_str(name).and_then(|value| value.parse().ok())
    }

    /// Scalar value bound to `name`, read with the boolean spellings of
    /// [`Check::Bool`].
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get_str(name).and_then(parse_bool)
    }

    /// Default recorded when `name` was declared.
    #[must_use]
    pub fn default_of(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|binding| binding.default.as_deref())
    }

    /// Flag kind recorded when `name` was declared.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<FlagKind> {
        self.values.get(name).and_then(|binding| binding.kind)
    }

    /// Bound names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.values
            .iter()
            .map(|(name, binding)| (name.as_str(), &binding.value))
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    Check::Bool
        .apply(value.to_owned(), Cursor::START)
        .ok()
        .map(|normalised| normalised == "1")
}

impl Serialize for Bindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
