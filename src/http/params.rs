//! Request parameters for VK API methods
//!
//! VK methods take a flat set of named parameters. Optional values that are
//! `None` are simply left out, lists are joined with commas.

use crate::types::{flag, join_fields};
use std::fmt::Display;

/// Ordered set of named parameters for one API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key.into(), value.to_string());
        self
    }

    /// Set a parameter only when a value is present
    #[must_use]
    pub fn set_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Set a `0`/`1` flag
    #[must_use]
    pub fn flag(self, key: impl Into<String>, value: bool) -> Self {
        self.set(key, flag(value))
    }

    /// Set a comma-joined list, skipped when the list is empty
    #[must_use]
    pub fn list<S: AsRef<str>>(self, key: impl Into<String>, values: &[S]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.set(key, join_fields(values))
        }
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a parameter is set
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }
}
