//! # Query and Metadata Types
//!
//! The variable query descriptor persisted with a dashboard, the metadata
//! records fetched from the monitoring backend, and the option shape handed
//! back to the variable picker.

use crate::constants::{MetricKind, ValueType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which kind of metadata a variable query lists
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricFindQueryType {
    Projects,
    Services,
    MetricTypes,
    LabelKeys,
    LabelValues,
    ResourceTypes,
    Aligners,
    AlignmentPeriods,
    Aggregations,
    /// A tag this resolver does not know, kept verbatim for diagnostics
    Unknown(String),
}

impl MetricFindQueryType {
    pub fn as_str(&self) -> &str {
        match self {
            MetricFindQueryType::Projects => "projects",
            MetricFindQueryType::Services => "services",
            MetricFindQueryType::MetricTypes => "metricTypes",
            MetricFindQueryType::LabelKeys => "labelKeys",
            MetricFindQueryType::LabelValues => "labelValues",
            MetricFindQueryType::ResourceTypes => "resourceTypes",
            MetricFindQueryType::Aligners => "aligners",
            MetricFindQueryType::AlignmentPeriods => "alignmentPeriods",
            MetricFindQueryType::Aggregations => "aggregations",
            MetricFindQueryType::Unknown(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for MetricFindQueryType {
    fn from(tag: &str) -> Self {
        match tag {
            "projects" => MetricFindQueryType::Projects,
            "services" => MetricFindQueryType::Services,
            "metricTypes" => MetricFindQueryType::MetricTypes,
            "labelKeys" => MetricFindQueryType::LabelKeys,
            "labelValues" => MetricFindQueryType::LabelValues,
            "resourceTypes" => MetricFindQueryType::ResourceTypes,
            "aligners" => MetricFindQueryType::Aligners,
            "alignmentPeriods" => MetricFindQueryType::AlignmentPeriods,
            "aggregations" => MetricFindQueryType::Aggregations,
            other => MetricFindQueryType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for MetricFindQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MetricFindQueryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricFindQueryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(MetricFindQueryType::from(tag.as_str()))
    }
}

/// Variable query descriptor, as saved in the dashboard model
///
/// Every field except the type tag is optional. `selected_service`,
/// `selected_metric_type` and `label_key` may still hold template tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableQuery {
    pub selected_query_type: MetricFindQueryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_metric_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_key: Option<String>,
}

impl VariableQuery {
    pub fn new(query_type: MetricFindQueryType) -> Self {
        Self {
            selected_query_type: query_type,
            default_project: None,
            selected_service: None,
            selected_metric_type: None,
            label_key: None,
        }
    }

    pub fn with_default_project(mut self, project: impl Into<String>) -> Self {
        self.default_project = Some(project.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.selected_service = Some(service.into());
        self
    }

    pub fn with_metric_type(mut self, metric_type: impl Into<String>) -> Self {
        self.selected_metric_type = Some(metric_type.into());
        self
    }

    pub fn with_label_key(mut self, label_key: impl Into<String>) -> Self {
        self.label_key = Some(label_key.into());
        self
    }

    /// Selected service, treating an empty selection as absent
    pub fn service(&self) -> Option<&str> {
        non_empty(&self.selected_service)
    }

    /// Selected metric type, treating an empty selection as absent
    pub fn metric_type(&self) -> Option<&str> {
        non_empty(&self.selected_metric_type)
    }

    pub fn project(&self) -> Option<&str> {
        self.default_project.as_deref()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// A monitoring project the caller can query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub label: String,
    pub value: String,
}

/// Metadata describing one metric type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDescriptor {
    #[serde(rename = "type")]
    pub metric_type: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub service_short_name: String,
    #[serde(default)]
    pub value_type: Option<ValueType>,
    #[serde(default)]
    pub metric_kind: Option<MetricKind>,
}

impl MetricDescriptor {
    /// Fill in the fields the monitoring API leaves implicit
    ///
    /// `service` is the metric type up to the first `/` and
    /// `service_short_name` is the service up to the first `.`. An empty
    /// display name falls back to the metric type.
    pub fn normalize(mut self) -> Self {
        let service = self
            .metric_type
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();
        self.service_short_name = service.split('.').next().unwrap_or_default().to_string();
        self.service = service;
        if self.display_name.is_empty() {
            self.display_name = self.metric_type.clone();
        }
        self
    }
}

/// One selectable entry in a variable picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFindValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub expandable: bool,
}

impl MetricFindValue {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: Some(value.into()),
            expandable: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: None,
            expandable: true,
        }
    }
}

/// Metadata item before it has been shaped into a [`MetricFindValue`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOption {
    Plain(String),
    Structured(MetricFindValue),
}

impl From<String> for RawOption {
    fn from(value: String) -> Self {
        RawOption::Plain(value)
    }
}

impl From<&str> for RawOption {
    fn from(value: &str) -> Self {
        RawOption::Plain(value.to_string())
    }
}

impl From<MetricFindValue> for RawOption {
    fn from(value: MetricFindValue) -> Self {
        RawOption::Structured(value)
    }
}
