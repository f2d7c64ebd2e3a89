//! # Resolver Configuration
//!
//! Request tags, label names and logging behavior for the resolver. Every
//! field has a default, so an empty configuration is valid.
//!
//! Values can be layered from an optional file (any format the `config`
//! crate understands) and `METRIC_FIND_` prefixed environment variables,
//! e.g. `METRIC_FIND_LOG_FAILURES=false`.
//!
//! ```rust,no_run
//! use metric_find_query::config::ResolverConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResolverConfig::load(Some("config/metric_find.toml"))?;
//! assert!(!config.resource_type_label.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::constants::{request_tags, RESOURCE_TYPE_LABEL, SYSTEM_LABELS};
use crate::error::{ConfigResult, ConfigurationError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_PREFIX: &str = "METRIC_FIND";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub label_keys_request_tag: String,
    pub label_values_request_tag: String,
    pub resource_type_request_tag: String,
    /// Label read by resource type queries
    pub resource_type_label: String,
    /// Appended to every label key listing
    pub system_labels: Vec<String>,
    /// Emit an error log when a query fails and resolves to no options
    pub log_failures: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            label_keys_request_tag: request_tags::LABEL_KEYS.to_string(),
            label_values_request_tag: request_tags::LABEL_VALUES.to_string(),
            resource_type_request_tag: request_tags::RESOURCE_TYPES.to_string(),
            resource_type_label: RESOURCE_TYPE_LABEL.to_string(),
            system_labels: SYSTEM_LABELS.iter().map(|label| label.to_string()).collect(),
            log_failures: true,
        }
    }
}

impl ResolverConfig {
    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<impl AsRef<Path>>) -> ConfigResult<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            let path = path.as_ref();
            debug!("Loading resolver configuration from {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let config: ResolverConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("system_labels"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables only
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(None::<&Path>)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("label_keys_request_tag", &self.label_keys_request_tag),
            ("label_values_request_tag", &self.label_values_request_tag),
            ("resource_type_request_tag", &self.resource_type_request_tag),
            ("resource_type_label", &self.resource_type_label),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigurationError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    context: "must not be empty".to_string(),
                });
            }
        }

        if let Some(label) = self.system_labels.iter().find(|l| l.trim().is_empty()) {
            return Err(ConfigurationError::InvalidValue {
                field: "system_labels".to_string(),
                value: label.clone(),
                context: "system label names must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
