//! Provider signature tables.
//!
//! Both tables are JSON objects mapping a provider name to an array of
//! strings. Provider order is the order of keys in the file and is the
//! tie-break order used during detection.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureTable {
    entries: Vec<(String, Vec<String>)>,
}

impl SignatureTable {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("could not read `{}`: {}", path.display(), e))
        })?;

        let table = Self::from_json_str(&content).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("could not parse `{}`: {}", path.display(), msg))
            }
            other => other,
        })?;

        debug!(path = %path.display(), providers = table.len(), "loaded signature table");
        Ok(table)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| Error::Configuration(e.to_string()))?;

        let object = match value {
            Value::Object(object) => object,
            _ => return Err(Error::Configuration("expected a JSON object".to_string())),
        };

        let mut entries = Vec::with_capacity(object.len());
        for (provider, signatures) in object {
            let signatures = match signatures {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        other => Err(Error::Configuration(format!(
                            "provider `{}` has a non-string signature: {}",
                            provider, other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?,
                other => {
                    return Err(Error::Configuration(format!(
                        "provider `{}` must map to an array of strings, got {}",
                        provider, other
                    )))
                }
            };
            entries.push((provider, signatures));
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(provider, signatures)| (provider.as_str(), signatures.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Nameserver signatures compiled into one alternation pattern per provider.
#[derive(Debug, Clone)]
pub struct NameserverSignatures {
    patterns: Vec<(String, Regex)>,
}

impl NameserverSignatures {
    pub fn compile(table: &SignatureTable) -> Result<Self> {
        let mut patterns = Vec::with_capacity(table.len());

        for (provider, signatures) in table.iter() {
            // An empty alternation would match every input.
            if signatures.is_empty() {
                debug!(provider, "skipping provider without nameserver signatures");
                continue;
            }

            let regex = Regex::new(&signatures.join("|")).map_err(|e| {
                Error::Configuration(format!(
                    "invalid nameserver signature for `{}`: {}",
                    provider, e
                ))
            })?;
            patterns.push((provider.to_string(), regex));
        }

        Ok(Self { patterns })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let table = SignatureTable::load(path)?;
        Self::compile(&table).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("`{}`: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Returns the first provider whose pattern matches anywhere in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(haystack))
            .map(|(provider, _)| provider.as_str())
    }
}

/// Header keys per provider, lowercased for case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct HeaderSignatures {
    keys: Vec<(String, Vec<String>)>,
}

impl HeaderSignatures {
    pub fn new(table: &SignatureTable) -> Self {
        let keys = table
            .iter()
            .map(|(provider, keys)| {
                (
                    provider.to_string(),
                    keys.iter().map(|k| k.to_ascii_lowercase()).collect(),
                )
            })
            .collect();

        Self { keys }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(&SignatureTable::load(path)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.keys
            .iter()
            .map(|(provider, keys)| (provider.as_str(), keys.as_slice()))
    }
}
