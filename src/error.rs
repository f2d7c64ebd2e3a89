//! Error types for metric find queries.
//!
//! Handlers propagate these with `?`; only the fail-soft boundary in
//! [`crate::resolver::MetricFindQuery::execute`] turns them into empty
//! results.

use thiserror::Error;

/// Failures reported by a [`crate::datasource::MonitoringDatasource`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasourceError {
    /// The request to the monitoring backend failed
    #[error("Monitoring request failed: {0}")]
    Request(String),

    /// The backend answered with a payload that could not be read
    #[error("Invalid monitoring response: {0}")]
    InvalidResponse(String),

    /// The backend could not be reached at all
    #[error("Monitoring backend unavailable: {0}")]
    Unavailable(String),
}

/// Failures while resolving a variable query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricFindQueryError {
    #[error(transparent)]
    Datasource(#[from] DatasourceError),

    /// No fetched descriptor has the requested metric type
    #[error("No metric descriptor found for metric type '{metric_type}'")]
    DescriptorNotFound { metric_type: String },
}

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },
}

impl From<::config::ConfigError> for ConfigurationError {
    fn from(error: ::config::ConfigError) -> Self {
        ConfigurationError::Load(error.to_string())
    }
}

impl MetricFindQueryError {
    pub fn descriptor_not_found(metric_type: impl Into<String>) -> Self {
        Self::DescriptorNotFound {
            metric_type: metric_type.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetricFindQueryError>;
pub type DatasourceResult<T> = std::result::Result<T, DatasourceError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_error_converts_transparently() {
        let error: MetricFindQueryError = DatasourceError::Unavailable("timeout".to_string()).into();
        assert_eq!(error.to_string(), "Monitoring backend unavailable: timeout");
    }

    #[test]
    fn test_descriptor_not_found_message() {
        let error = MetricFindQueryError::descriptor_not_found("custom.googleapis.com/missing");
        assert_eq!(
            error.to_string(),
            "No metric descriptor found for metric type 'custom.googleapis.com/missing'"
        );
    }
}
