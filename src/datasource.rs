//! # Monitoring Datasource
//!
//! The capabilities the resolver needs from the host's monitoring client.
//! Implementations own transport, authentication and template
//! substitution; the resolver only decides what to ask for and how to
//! shape the answers.

use crate::error::DatasourceResult;
use crate::types::{MetricDescriptor, Project};
use async_trait::async_trait;
use indexmap::IndexMap;

/// Label name to the label's observed values, in the order the backend listed them
pub type LabelMap = IndexMap<String, Vec<String>>;

/// Trait for monitoring backends that can answer metadata queries
#[async_trait]
pub trait MonitoringDatasource: Send + Sync {
    /// List the projects visible to the caller
    async fn get_projects(&self) -> DatasourceResult<Vec<Project>>;

    /// List metric descriptors within a project
    ///
    /// Descriptors are expected to be normalized (see
    /// [`MetricDescriptor::normalize`]) so `service` and
    /// `service_short_name` are populated.
    async fn get_metric_types(&self, project: Option<&str>) -> DatasourceResult<Vec<MetricDescriptor>>;

    /// Fetch label names and their values for a metric type
    ///
    /// `metric_type` is passed exactly as selected and may still hold
    /// template tokens; implementations must interpolate it before sending
    /// the request. Labels are returned in the backend's order.
    ///
    /// # Arguments
    ///
    /// * `metric_type` - Metric type to inspect, possibly still templated
    /// * `request_tag` - Identifies the calling query to the backend
    /// * `project` - Optional project scope
    /// * `label_keys` - Optional restriction to these label names
    async fn get_labels(
        &self,
        metric_type: &str,
        request_tag: &str,
        project: Option<&str>,
        label_keys: Option<&[String]>,
    ) -> DatasourceResult<LabelMap>;

    /// Substitute template variables in `template`
    fn interpolate(&self, template: &str) -> String;

    /// Name used in diagnostics
    fn datasource_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
