//! Answer record built up across a profile's question phase

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single recorded answer: a confirm result or a selected choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Choice(String),
}

impl AnswerValue {
    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Choice(_) => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Choice(value.to_string())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Choice(s) => write!(f, "{}", s),
        }
    }
}

/// Mapping from answer key to value.
///
/// `merge` has value semantics: it returns a new record and leaves the
/// receiver untouched, so a record handed out earlier never changes under the
/// holder's feet. Keys are kept sorted, which keeps serialized render contexts
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with a single key set
    pub fn with(&self, key: &str, value: impl Into<AnswerValue>) -> Self {
        let mut next = self.clone();
        next.values.insert(key.to_string(), value.into());
        next
    }

    /// Return a copy with every key of `partial` overlaid (last write wins)
    pub fn merge(&self, partial: &AnswerRecord) -> Self {
        let mut next = self.clone();
        for (key, value) in &partial.values {
            next.values.insert(key.clone(), value.clone());
        }
        next
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&AnswerValue> {
        self.values
            .get(key)
            .ok_or_else(|| ScaffoldError::UnknownAnswerKey {
                key: key.to_string(),
            })
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)?.as_bool().ok_or_else(|| ScaffoldError::AnswerType {
            key: key.to_string(),
            expected: "boolean",
        })
    }

    pub fn get_choice(&self, key: &str) -> Result<&str> {
        self.get(key)?
            .as_choice()
            .ok_or_else(|| ScaffoldError::AnswerType {
                key: key.to_string(),
                expected: "choice",
            })
    }

    /// Read an optional boolean key, using `fallback` when it was never written
    pub fn bool_or(&self, key: &str, fallback: bool) -> Result<bool> {
        if self.contains(key) {
            self.get_bool(key)
        } else {
            Ok(fallback)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
