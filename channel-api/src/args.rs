//! Argument extraction from the method-call map
//!
//! Channel calls carry a JSON object of named arguments. Extraction failures
//! become `InvalidArgument` core errors so they surface through the same
//! taxonomy as every other failure.

use bank_core::{Error, Result};
use serde_json::{Map, Value};

/// Typed view over a call's argument map.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Args<'a> {
    /// Wrap a call's argument value.
    ///
    /// `null` (or absent) arguments behave like an empty map, matching a
    /// transport that passes no argument object; any other non-object value
    /// is malformed.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { map: Some(map) }),
            Value::Null => Ok(Self { map: None }),
            other => Err(Error::InvalidArgument(format!(
                "arguments must be an object, got {}",
                type_name(other)
            ))),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }

    /// Required non-empty string argument.
    pub fn string(&self, key: &str) -> Result<&'a str> {
        match self.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s),
            Some(Value::String(_)) => {
                Err(Error::InvalidArgument(format!("{} must not be empty", key)))
            }
            Some(other) => Err(Error::InvalidArgument(format!(
                "{} must be a string, got {}",
                key,
                type_name(other)
            ))),
            None => Err(Error::InvalidArgument(format!("{} required", key))),
        }
    }

    /// Required integer argument.
    pub fn integer(&self, key: &str) -> Result<i64> {
        match self.get(key) {
            Some(value) => integer_value(key, value),
            None => Err(Error::InvalidArgument(format!("{} required", key))),
        }
    }

    /// Optional integer argument.
    pub fn integer_opt(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => integer_value(key, value).map(Some),
        }
    }
}

fn integer_value(key: &str, value: &Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| {
        Error::InvalidArgument(format!(
            "{} must be an integer, got {}",
            key,
            type_name(value)
        ))
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
