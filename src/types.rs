//! Common types used throughout vk-harvest
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Localization Language
// ============================================================================

/// Language VK localizes names and labels into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    Uk,
    Be,
    En,
    Es,
    Fi,
    De,
    It,
}

impl Lang {
    /// Value sent in the `lang` request parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Uk => "uk",
            Lang::Be => "be",
            Lang::En => "en",
            Lang::Es => "es",
            Lang::Fi => "fi",
            Lang::De => "de",
            Lang::It => "it",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Lang::Ru),
            "uk" => Ok(Lang::Uk),
            "be" => Ok(Lang::Be),
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            "fi" => Ok(Lang::Fi),
            "de" => Ok(Lang::De),
            "it" => Ok(Lang::It),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

// ============================================================================
// Object References
// ============================================================================

/// A user or community, addressed by numeric id or by screen name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectRef {
    /// Numeric id; communities are negative when used as an owner id
    Id(i64),
    /// Screen name such as `durov` or `public128394762`
    ScreenName(String),
}

impl ObjectRef {
    /// Same reference with a numeric id made positive.
    ///
    /// Wall owners are negative for communities, lookups expect the plain id.
    #[must_use]
    pub fn unsigned(&self) -> Self {
        match self {
            ObjectRef::Id(id) => ObjectRef::Id(id.abs()),
            ObjectRef::ScreenName(name) => ObjectRef::ScreenName(name.clone()),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Id(id) => write!(f, "{id}"),
            ObjectRef::ScreenName(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ObjectRef {
    fn from(id: i64) -> Self {
        ObjectRef::Id(id)
    }
}

impl From<&str> for ObjectRef {
    fn from(name: &str) -> Self {
        ObjectRef::ScreenName(name.to_string())
    }
}

impl From<String> for ObjectRef {
    fn from(name: String) -> Self {
        ObjectRef::ScreenName(name)
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Sort order for comment listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Join field selectors the way VK expects them (`bdate,city`)
pub fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a boolean flag as VK's `0`/`1`
pub fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
