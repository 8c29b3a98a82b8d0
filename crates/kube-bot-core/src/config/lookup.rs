//! Dotted-key lookup over the loaded configuration

use serde_json::Value;

use super::types::Config;

/// Keys whose values are never shown
const SECRET_KEYS: [&str; 1] = ["slack.token"];
const MASK: &str = "********";
const UNSET: &str = "<unset>";

/// Outcome of [`Config::lookup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup {
    /// The key names exactly one setting
    Exact { key: String, value: String },
    /// No exact match; these keys contain the query
    Candidates(Vec<(String, String)>),
    Missing,
}

impl Config {
    /// Every setting as a `(dotted.key, rendered value)` pair, sorted by key.
    /// Secrets are masked.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        if let Ok(value) = serde_json::to_value(self) {
            flatten("", &value, &mut entries);
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Look up a dotted key, falling back to every key containing `key`.
    /// Matching ignores case.
    #[must_use]
    pub fn lookup(&self, key: &str) -> KeyLookup {
        let needle = key.trim().to_lowercase();
        let entries = self.entries();
        if let Some((key, value)) = entries.iter().find(|(k, _)| *k == needle) {
            return KeyLookup::Exact {
                key: key.clone(),
                value: value.clone(),
            };
        }
        let candidates: Vec<(String, String)> = entries
            .into_iter()
            .filter(|(k, _)| !needle.is_empty() && k.contains(&needle))
            .collect();
        if candidates.is_empty() {
            KeyLookup::Missing
        } else {
            KeyLookup::Candidates(candidates)
        }
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    if let Value::Object(map) = value {
        for (name, child) in map {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            flatten(&key, child, out);
        }
        return;
    }
    let rendered = match value {
        Value::Null => UNSET.to_string(),
        _ if SECRET_KEYS.contains(&prefix) => MASK.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    out.push((prefix.to_string(), rendered));
}
