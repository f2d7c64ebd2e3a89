//! Mock Datasource Implementation for Testing
//!
//! Serves canned monitoring metadata and records every backend call so tests
//! can assert which fetches a query made.

use async_trait::async_trait;
use metric_find_query::{
    DatasourceError, LabelMap, MetricDescriptor, MetricKind, MonitoringDatasource, Project,
    TemplateVariables, ValueType,
};
use std::sync::{Arc, Mutex};

/// A backend call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    GetProjects,
    GetMetricTypes {
        project: Option<String>,
    },
    GetLabels {
        metric_type: String,
        request_tag: String,
        project: Option<String>,
        label_keys: Option<Vec<String>>,
    },
}

#[derive(Debug, Default)]
struct MockDatasourceState {
    calls: Vec<RecordedCall>,
}

/// Mock monitoring backend
#[derive(Debug, Clone, Default)]
pub struct MockDatasource {
    projects: Vec<Project>,
    descriptors: Vec<MetricDescriptor>,
    labels: LabelMap,
    variables: TemplateVariables,
    failure: Option<DatasourceError>,
    state: Arc<Mutex<MockDatasourceState>>,
}

impl MockDatasource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, label: &str, value: &str) -> Self {
        self.projects.push(Project {
            label: label.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_descriptor(mut self, descriptor: MetricDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn with_label(mut self, name: &str, values: &[&str]) -> Self {
        self.labels.insert(
            name.to_string(),
            values.iter().map(|value| value.to_string()).collect(),
        );
        self
    }

    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        self.variables.set(name, value);
        self
    }

    /// Fail every backend call with `error`
    pub fn failing_with(mut self, error: DatasourceError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: RecordedCall) -> Result<(), DatasourceError> {
        self.state.lock().unwrap().calls.push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MonitoringDatasource for MockDatasource {
    async fn get_projects(&self) -> Result<Vec<Project>, DatasourceError> {
        self.record(RecordedCall::GetProjects)?;
        Ok(self.projects.clone())
    }

    async fn get_metric_types(
        &self,
        project: Option<&str>,
    ) -> Result<Vec<MetricDescriptor>, DatasourceError> {
        self.record(RecordedCall::GetMetricTypes {
            project: project.map(str::to_string),
        })?;
        Ok(self.descriptors.clone())
    }

    async fn get_labels(
        &self,
        metric_type: &str,
        request_tag: &str,
        project: Option<&str>,
        label_keys: Option<&[String]>,
    ) -> Result<LabelMap, DatasourceError> {
        self.record(RecordedCall::GetLabels {
            metric_type: metric_type.to_string(),
            request_tag: request_tag.to_string(),
            project: project.map(str::to_string),
            label_keys: label_keys.map(<[String]>::to_vec),
        })?;

        let mut labels = self.labels.clone();
        if let Some(keys) = label_keys {
            labels.retain(|name, _| keys.contains(name));
        }
        Ok(labels)
    }

    fn interpolate(&self, template: &str) -> String {
        self.variables.replace(template)
    }
}

/// Normalized descriptor for a metric type
pub fn descriptor(
    metric_type: &str,
    value_type: ValueType,
    metric_kind: MetricKind,
) -> MetricDescriptor {
    MetricDescriptor {
        metric_type: metric_type.to_string(),
        display_name: String::new(),
        service: String::new(),
        service_short_name: String::new(),
        value_type: Some(value_type),
        metric_kind: Some(metric_kind),
    }
    .normalize()
}
