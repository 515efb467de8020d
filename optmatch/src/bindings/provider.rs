//! Exposes bound variables to `figment` so they merge into typed
//! configuration structs.
//!
//! Typed flags export typed values. Untyped scalars export as strings and
//! lists as arrays, their elements typed the same way.

use figment::{
    Metadata, Profile, Provider,
    error::Error,
    value::{Dict, Map, Value},
};

use super::{Binding, BoundValue, Bindings, parse_bool};
use crate::flag::FlagKind;

fn typed(name: &str, raw: &str, kind: Option<FlagKind>) -> Result<Value, Error> {
    let invalid = || {
        Error::from(format!(
            "binding `{name}` holds {raw:?}, which is not a valid {}",
            kind.map_or("value", FlagKind::name)
        ))
    };
    match kind {
        None | Some(FlagKind::String) => Ok(Value::from(raw.to_owned())),
        Some(FlagKind::Integer) => raw.parse::<i64>().map(Value::from).map_err(|_| invalid()),
        Some(FlagKind::Float) => raw.parse::<f64>().map(Value::from).map_err(|_| invalid()),
        Some(FlagKind::Boolean) => parse_bool(raw).map(Value::from).ok_or_else(invalid),
    }
}

fn export(name: &str, binding: &Binding) -> Result<Value, Error> {
    match &binding.value {
        BoundValue::Scalar(raw) => typed(name, raw, binding.kind),
        BoundValue::List(values) => values
            .iter()
            .map(|raw| typed(name, raw, binding.kind))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::from),
    }
}

impl Provider for Bindings {
    fn metadata(&self) -> Metadata {
        Metadata::named("command-line bindings")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (name, binding) in &self.values {
            dict.insert(name.clone(), export(name, binding)?);
        }
        Ok(Profile::Default.collect(dict))
    }
}
