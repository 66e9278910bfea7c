// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Read-only access to configuration variables, from the process environment
//! or from an in-memory map (tests, embedding).

use std::collections::HashMap;

/// A source of configuration values keyed by variable name.
pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// A boolean switch, spelled `true`/`false` or `1`/`0` (case-insensitive).
    fn flag(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        let Some(value) = self.get(key) else {
            return Ok(default_value);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(EnvError::InvalidBoolean {
                key: key.to_string(),
                value,
            }),
        }
    }

    fn get_or(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or_else(|| default_value.to_string())
    }

    /// Like [`Environment::get_or`], but a blank value is an error rather
    /// than silently accepted.
    fn get_non_empty(&self, key: &'static str, default_value: &str) -> Result<String, EnvError> {
        match self.get(key) {
            Some(value) if value.trim().is_empty() => Err(EnvError::InvalidValue {
                env_key: key,
                env_value: value,
                message: "Must not be empty".to_string(),
            }),
            Some(value) => Ok(value),
            None => Ok(default_value.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value}. Expected true/1 or false/0")]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid env value {env_value:?} for {env_key}: {message}")]
    InvalidValue {
        env_key: &'static str,
        env_value: String,
        message: String,
    },
}

/// The process environment.
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed values, for tests and embedding.
#[derive(Clone, Default, Debug)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        values.into_iter().collect()
    }
}
