//! Dispatcher configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```yaml
//! defaultMediaType: application/json
//! defaultCharset: utf-8
//! responseHeaders:
//!   x-stubbed: "true"
//! ```

use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("invalid response header {name}: {value}")]
    InvalidHeader { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchConfig {
    /// Media type used when a body reply doesn't name one
    pub default_media_type: String,
    /// Charset used when a body reply doesn't name one
    pub default_charset: String,
    /// Static headers added to every synthesized response
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub response_headers: BTreeMap<String, String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_media_type: "text/plain".to_string(),
            default_charset: "utf-8".to_string(),
            response_headers: BTreeMap::new(),
        }
    }
}

impl DispatchConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: DispatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DispatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_media_type.trim().is_empty() {
            return Err(ConfigError::Empty("defaultMediaType"));
        }
        if self.default_charset.trim().is_empty() {
            return Err(ConfigError::Empty("defaultCharset"));
        }
        self.header_map()?;
        Ok(())
    }

    /// `response_headers` as a `HeaderMap`; any unparsable entry is an error
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::with_capacity(self.response_headers.len());
        for (name, value) in &self.response_headers {
            let invalid = || ConfigError::InvalidHeader {
                name: name.clone(),
                value: value.clone(),
            };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}
