use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Date offered to a user whose stored relative range has been corrected.
pub const CORRECTED_DATE: &str = "yesterday";

/// Option keys and the message ids their labels are translated from, in display order.
pub const RESTRICTED_OPTIONS: [(&str, &str); 5] = [
    ("today", "General_Today"),
    ("yesterday", "General_Yesterday"),
    ("week", "General_CurrentWeek"),
    ("month", "General_CurrentMonth"),
    ("year", "General_CurrentYear"),
];

const RELATIVE_DATE_PREFIXES: [&str; 2] = ["prev", "last"];

/// Ordered mapping from date option key to display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateRangeCatalog {
    options: IndexMap<String, String>,
}

impl DateRangeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the five-key catalog, resolving each label with `translate`.
    ///
    /// A label that cannot be resolved falls back to its message id.
    pub fn restricted<F>(translate: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        RESTRICTED_OPTIONS
            .iter()
            .map(|(key, message_id)| {
                let label = translate(message_id).unwrap_or_else(|| (*message_id).to_string());
                ((*key).to_string(), label)
            })
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.options.insert(key.into(), label.into());
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// True when every key belongs to the restricted five-key set.
    pub fn is_restricted(&self) -> bool {
        self.keys()
            .all(|key| RESTRICTED_OPTIONS.iter().any(|(allowed, _)| *allowed == key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DateRangeCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Whether a stored date preference names a rolling range such as `previous30` or `last7`.
///
/// Only the `prev` and `last` prefixes are recognised, matched case-sensitively.
pub fn is_relative_date_token(date: &str) -> bool {
    RELATIVE_DATE_PREFIXES
        .iter()
        .any(|prefix| date.starts_with(prefix))
}
