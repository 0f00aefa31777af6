//! Country-name canonicalization applied before joining the NPC code table.

use std::collections::BTreeMap;

use crate::types::Value;

/// Names used in the events file mapped to the names used in the NPC code table.
pub const DEFAULT_COUNTRY_REPLACEMENTS: [(&str, &str); 5] = [
    ("UK", "Great Britain"),
    ("USA", "United States of America"),
    ("Korea", "Republic of Korea"),
    ("Russia", "Russian Federation"),
    ("China", "People's Republic of China"),
];

/// An explicit, enumerated country-name substitution table.
///
/// Lookups are exact: no case folding, no trimming. Names absent from the table pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryReplacements {
    names: BTreeMap<String, String>,
}

impl CountryReplacements {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// The canonical name for `name`.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Apply the table to a cell. Non-text cells are returned unchanged.
    pub fn apply(&self, value: &Value) -> Value {
        match value {
            Value::Utf8(s) => Value::Utf8(self.canonical(s).to_owned()),
            other => other.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CountryReplacements {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_REPLACEMENTS)
    }
}
