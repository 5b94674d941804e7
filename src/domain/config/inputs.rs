// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::constants::UNDEFINED_PLACEHOLDER;
use crate::shared::error::{RecipeError, Result};
use std::path::Path;

/// Flat, ordered mapping of named configuration values.
///
/// Iteration order is insertion order. Custom and secret environment entries are emitted in
/// this order, so it must stay stable between runs for the output to be reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeInputs {
    entries: Vec<(String, String)>,
}

impl RecipeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    pub fn from_env() -> Self {
        std::env::vars().collect()
    }

    /// Load a TOML file holding a flat table of values.
    ///
    /// Strings, integers, floats and booleans are accepted; anything nested is rejected.
    pub async fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RecipeError::config_error(format!(
                "Failed to read values file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content.parse()?;
        let mut inputs = Self::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(RecipeError::config_error(format!(
                        "Value for '{}' must be a scalar, found {}",
                        key,
                        other.type_str()
                    )))
                }
            };
            inputs.set(key, value);
        }
        Ok(inputs)
    }

    /// Insert a value, replacing an existing entry in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Layer `other` on top of `self`; later values win.
    pub fn merge(&mut self, other: RecipeInputs) {
        for (key, value) in other.entries {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `key`, treating an empty string the same as a missing one.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Value of `key`, or the literal `undefined` placeholder when it is not configured.
    pub fn get_or_undefined(&self, key: &str) -> &str {
        match self.get(key) {
            Some(value) => value,
            None => {
                tracing::warn!(input = key, "required input is not set, rendering as '{}'", UNDEFINED_PLACEHOLDER);
                UNDEFINED_PLACEHOLDER
            }
        }
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get_non_empty(key).is_some()
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
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecipeInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut inputs = Self::new();
        for (k, v) in iter {
            inputs.set(k, v);
        }
        inputs
    }
}

/// Parse `-D KEY=VALUE` properties into an input mapping.
pub fn parse_properties(properties: &[String]) -> Result<RecipeInputs> {
    let mut inputs = RecipeInputs::new();

    for property in properties {
        let (key, value) = property.split_once('=').ok_or_else(|| {
            RecipeError::config_error(format!(
                "Invalid property format: '{}'. Expected 'KEY=VALUE'",
                property
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(RecipeError::config_error(format!(
                "Empty key in property: '{}'",
                property
            )));
        }

        inputs.set(key, value.trim());
    }

    Ok(inputs)
}
