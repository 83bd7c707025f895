//! Plugin parameters.
//!
//! The host passes generator configuration as a single comma-separated string
//! (`paths=source_relative,lang=rust,verbose`). The graph does not interpret
//! it; downstream consumers read it through the typed getters below.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::ParameterError;

/// Ordered `key=value` configuration handed to downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: IndexMap<String, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw parameter string.
    ///
    /// Segments are split on `,` and trimmed; empty segments are ignored. A
    /// segment without `=` is a bare key with an empty value. Later keys
    /// overwrite earlier ones but keep their original position.
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::new();
        for segment in raw.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (segment, ""),
            };
            if !key.is_empty() {
                params.set(key, value);
            }
        }
        params
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw value of a key.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str(key).unwrap_or(default)
    }

    /// Boolean value of a key. A bare key counts as `true`; a missing key is
    /// `Ok(None)`.
    pub fn bool(&self, key: &str) -> Result<Option<bool>, ParameterError> {
        let Some(value) = self.str(key) else {
            return Ok(None);
        };
        match value.to_ascii_lowercase().as_str() {
            "" | "true" | "t" | "1" => Ok(Some(true)),
            "false" | "f" | "0" => Ok(Some(false)),
            _ => Err(invalid(key, "bool", value)),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ParameterError> {
        Ok(self.bool(key)?.unwrap_or(default))
    }

    pub fn int(&self, key: &str) -> Result<Option<i64>, ParameterError> {
        self.parsed(key, "int")
    }

    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, ParameterError> {
        Ok(self.int(key)?.unwrap_or(default))
    }

    pub fn uint(&self, key: &str) -> Result<Option<u64>, ParameterError> {
        self.parsed(key, "uint")
    }

    pub fn float(&self, key: &str) -> Result<Option<f64>, ParameterError> {
        self.parsed(key, "float")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn parsed<T: FromStr>(&self, key: &str, kind: &'static str) -> Result<Option<T>, ParameterError> {
        self.str(key)
            .map(|value| value.parse().map_err(|_| invalid(key, kind, value)))
            .transpose()
    }
}

fn invalid(key: &str, kind: &'static str, value: &str) -> ParameterError {
    ParameterError::InvalidValue {
        key: key.to_string(),
        kind,
        value: value.to_string(),
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if value.is_empty() {
                write!(f, "{key}")?;
            } else {
                write!(f, "{key}={value}")?;
            }
        }
        Ok(())
    }
}
