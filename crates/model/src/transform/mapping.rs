use crate::core::value::Value;
use crate::records::row::Row;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while parsing a translation document.
#[derive(Debug, Error)]
pub enum TranslationConfigError {
    /// The document is not valid JSON.
    #[error("Invalid translation JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top level must be an object of mapping keys.
    #[error("Translation document must be a JSON object keyed by mapping name")]
    DocumentShape,

    /// A mapping entry must be an object of column names.
    #[error("Translation mapping '{key}' must be an object keyed by column name")]
    MappingShape { key: String },

    /// A rule must be a two-element `[before, after]` array.
    #[error("Translation rule for '{key}.{column}' must be a [before, after] pair")]
    RuleShape { key: String, column: String },
}

/// A single value substitution: rows whose cell matches `before` are written
/// with `after` instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationRule {
    pub before: Value,
    pub after: Value,
}

/// Per-column substitution rules for one named mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslationMapping {
    rules: HashMap<String, Vec<TranslationRule>>,
}

impl TranslationMapping {
    pub fn new() -> Self {
        TranslationMapping {
            rules: HashMap::new(),
        }
    }

    pub fn add_rule(&mut self, column: &str, before: Value, after: Value) {
        self.rules
            .entry(column.to_string())
            .or_default()
            .push(TranslationRule { before, after });
    }

    pub fn rules_for(&self, column: &str) -> Option<&[TranslationRule]> {
        self.rules.get(column).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrites `row` in place. Each cell is checked against the rules for
    /// its column in declaration order; the first matching rule is applied
    /// and the remaining rules for that column are skipped.
    pub fn apply(&self, columns: &[String], row: &mut Row) {
        for (column, value) in columns.iter().zip(row.values.iter_mut()) {
            if let Some(rules) = self.rules.get(column) {
                for rule in rules {
                    if rule.before.matches(value) {
                        *value = rule.after.clone();
                        break;
                    }
                }
            }
        }
    }
}

/// All configured translation mappings, keyed by the name a job selects with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslationRegistry {
    mappings: HashMap<String, TranslationMapping>,
}

impl TranslationRegistry {
    pub fn new() -> Self {
        TranslationRegistry {
            mappings: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, mapping: TranslationMapping) {
        self.mappings.insert(key.to_string(), mapping);
    }

    pub fn mapping(&self, key: &str) -> Option<&TranslationMapping> {
        self.mappings.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Parses a registry from a JSON document of the shape
    /// `{ "mapping": { "column": [["before", "after"], ...] } }`.
    pub fn from_json(doc: &str) -> Result<Self, TranslationConfigError> {
        let parsed: serde_json::Value = serde_json::from_str(doc)?;
        let entries = match parsed.as_object() {
            Some(entries) => entries,
            None => return Err(TranslationConfigError::DocumentShape),
        };

        let mut registry = TranslationRegistry::new();
        for (key, columns) in entries {
            let columns = match columns.as_object() {
                Some(columns) => columns,
                None => {
                    return Err(TranslationConfigError::MappingShape { key: key.clone() });
                }
            };

            let mut mapping = TranslationMapping::new();
            for (column, rules) in columns {
                let rules = match rules.as_array() {
                    Some(rules) => rules,
                    None => {
                        return Err(TranslationConfigError::RuleShape {
                            key: key.clone(),
                            column: column.clone(),
                        });
                    }
                };

                for rule in rules {
                    let pair = rule.as_array().filter(|pair| pair.len() == 2);
                    let pair = match pair {
                        Some(pair) => pair,
                        None => {
                            return Err(TranslationConfigError::RuleShape {
                                key: key.clone(),
                                column: column.clone(),
                            });
                        }
                    };
                    mapping.add_rule(
                        column,
                        Value::from_json(&pair[0]),
                        Value::from_json(&pair[1]),
                    );
                }
            }
            registry.insert(key, mapping);
        }

        Ok(registry)
    }
}
