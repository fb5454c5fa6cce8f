//! JSON backed configuration store.
//!
//! Values are loaded from one or more `.json` files whose top level is an
//! object. Every top level key may be defined only once across all files.
//! Lookups return a named [`ConfigValue`] so that errors can say which
//! setting was missing or malformed.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::validate::{Validate, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot load {file} (only .json)")]
    NotJson { file: String },

    #[error("cannot open {file}: {source}")]
    Io {
        file: String,
        source: std::io::Error,
    },

    #[error("cannot read JSON from {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },

    #[error("{file} is not a JSON object")]
    NotObject { file: String },

    #[error("{name} is already defined")]
    Duplicate { name: String },

    #[error("{name} is not configured")]
    NotConfigured { name: String },

    #[error("{name} value cannot be parsed: {source}")]
    Invalid {
        name: String,
        source: serde_json::Error,
    },

    #[error("{name} is invalid: {source}")]
    Rejected {
        name: String,
        source: ValidationError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    data: Map<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the top level keys of a JSON file into the store.
    ///
    /// On error the store is left unchanged.
    pub fn load_file(&mut self, file: impl AsRef<Path>) -> Result<&mut Self, ConfigError> {
        let file = file.as_ref();
        let name = file.display().to_string();
        if file.extension().map_or(true, |ext| ext != "json") {
            return Err(ConfigError::NotJson { file: name });
        }

        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            file: name.clone(),
            source,
        })?;
        let parsed: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            file: name.clone(),
            source,
        })?;
        let entries = match parsed {
            Value::Object(entries) => entries,
            _ => return Err(ConfigError::NotObject { file: name }),
        };

        if let Some(key) = entries.keys().find(|k| self.data.contains_key(*k)) {
            return Err(ConfigError::Duplicate { name: key.clone() });
        }
        debug!(file = %name, keys = entries.len(), "config loaded");
        self.data.extend(entries);
        Ok(self)
    }

    /// Sets a top level value, replacing any previous one.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.data.insert(name.to_owned(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> ConfigValue<'_> {
        ConfigValue {
            name: name.to_owned(),
            value: self.data.get(name),
        }
    }
}

/// A possibly missing configuration value together with its dotted name.
#[derive(Debug, Clone)]
pub struct ConfigValue<'a> {
    name: String,
    value: Option<&'a Value>,
}

impl<'a> ConfigValue<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn is_configured(&self) -> bool {
        self.value.is_some()
    }

    /// Looks up `name` inside this value, if it is an object.
    pub fn get(&self, name: &str) -> ConfigValue<'a> {
        ConfigValue {
            name: format!("{}.{}", self.name, name),
            value: self.value.and_then(|v| v.as_object()).and_then(|m| m.get(name)),
        }
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let value = self.value.ok_or_else(|| ConfigError::NotConfigured {
            name: self.name.clone(),
        })?;
        T::deserialize(value).map_err(|source| ConfigError::Invalid {
            name: self.name.clone(),
            source,
        })
    }

    /// Parses the value and runs its [`Validate`] rules.
    pub fn parse_validated<T: DeserializeOwned + Validate>(&self) -> Result<T, ConfigError> {
        let value: T = self.parse()?;
        value.validate().map_err(|source| ConfigError::Rejected {
            name: self.name.clone(),
            source,
        })?;
        Ok(value)
    }

    /// Like [`parse`](Self::parse), but falls back to `T::default()` when the
    /// value is absent.
    pub fn parse_or_default<T: DeserializeOwned + Default>(&self) -> Result<T, ConfigError> {
        if self.value.is_none() {
            return Ok(T::default());
        }
        self.parse()
    }
}

/// Settings of the HTTP host, read from the `"service"` key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub addr: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: String::from("127.0.0.1:3000"),
        }
    }
}

impl ServiceConfig {
    pub const KEY: &'static str = "service";

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.get(Self::KEY).parse_or_default()
    }
}
