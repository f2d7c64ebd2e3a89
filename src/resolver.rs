//! # Metric Find Query
//!
//! Resolves a [`VariableQuery`] into the options shown by a dashboard
//! variable picker.
//!
//! ## Overview
//!
//! Each query type maps to one handler. A handler checks that the fields it
//! needs are selected, fetches metadata from the [`MonitoringDatasource`],
//! and shapes the result into [`MetricFindValue`]s in the order the backend
//! returned them.
//!
//! ## Failure Handling
//!
//! [`MetricFindQuery::execute`] never fails: a missing selection yields no
//! options without touching the backend, and any fetch or lookup failure is
//! logged and also yields no options. Hosts that need to tell those cases
//! apart call [`MetricFindQuery::try_execute`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metric_find_query::{MetricFindQuery, MetricFindQueryType, MonitoringDatasource, VariableQuery};
//! use std::sync::Arc;
//!
//! # async fn example(datasource: Arc<dyn MonitoringDatasource>) {
//! let resolver = MetricFindQuery::new(datasource);
//! let query = VariableQuery::new(MetricFindQueryType::MetricTypes)
//!     .with_default_project("my-project")
//!     .with_service("$service");
//!
//! for option in resolver.execute(&query).await {
//!     println!("{} => {:?}", option.text, option.value);
//! }
//! # }
//! ```

use crate::config::ResolverConfig;
use crate::constants::ALIGNMENT_PERIODS;
use crate::datasource::MonitoringDatasource;
use crate::error::{MetricFindQueryError, Result};
use crate::functions::{
    aggregation_options, alignment_options, alignment_periods, find_descriptor, label_keys_for,
    metric_types_for_service, services_from_descriptors, to_option,
};
use crate::log_query;
use crate::types::{MetricDescriptor, MetricFindQueryType, MetricFindValue, RawOption, VariableQuery};
use std::sync::Arc;

/// Resolver for template variable queries
pub struct MetricFindQuery {
    datasource: Arc<dyn MonitoringDatasource>,
    config: ResolverConfig,
}

impl std::fmt::Debug for MetricFindQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricFindQuery")
            .field("datasource", &self.datasource.datasource_name())
            .field("config", &self.config)
            .finish()
    }
}

impl MetricFindQuery {
    pub fn new(datasource: Arc<dyn MonitoringDatasource>) -> Self {
        Self::with_config(datasource, ResolverConfig::default())
    }

    pub fn with_config(datasource: Arc<dyn MonitoringDatasource>, config: ResolverConfig) -> Self {
        Self { datasource, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a query into picker options, never failing
    ///
    /// Failures are logged with the query type and resolve to an empty list.
    pub async fn execute(&self, query: &VariableQuery) -> Vec<MetricFindValue> {
        match self.try_execute(query).await {
            Ok(options) => options,
            Err(error) => {
                if self.config.log_failures {
                    log_query!(
                        error,
                        "query failed",
                        query_type: query.selected_query_type,
                        datasource: self.datasource.datasource_name(),
                        error: error,
                    );
                }
                Vec::new()
            }
        }
    }

    /// Resolve a query into picker options, surfacing failures
    pub async fn try_execute(&self, query: &VariableQuery) -> Result<Vec<MetricFindValue>> {
        log_query!(debug, "dispatch", query_type: query.selected_query_type);

        match &query.selected_query_type {
            MetricFindQueryType::Projects => self.handle_projects_query().await,
            MetricFindQueryType::Services => self.handle_service_query(query).await,
            MetricFindQueryType::MetricTypes => self.handle_metric_types_query(query).await,
            MetricFindQueryType::LabelKeys => self.handle_label_keys_query(query).await,
            MetricFindQueryType::LabelValues => self.handle_label_values_query(query).await,
            MetricFindQueryType::ResourceTypes => self.handle_resource_type_query(query).await,
            MetricFindQueryType::Aligners => self.handle_aligners_query(query).await,
            MetricFindQueryType::AlignmentPeriods => Ok(self.handle_alignment_period_query()),
            MetricFindQueryType::Aggregations => self.handle_aggregation_query(query).await,
            MetricFindQueryType::Unknown(_) => Ok(Vec::new()),
        }
    }

    async fn handle_projects_query(&self) -> Result<Vec<MetricFindValue>> {
        let projects = self.datasource.get_projects().await?;
        Ok(projects
            .into_iter()
            .map(|project| MetricFindValue::new(project.label, project.value))
            .collect())
    }

    async fn handle_service_query(&self, query: &VariableQuery) -> Result<Vec<MetricFindValue>> {
        let descriptors = self.datasource.get_metric_types(query.project()).await?;
        Ok(services_from_descriptors(&descriptors)
            .into_iter()
            .map(|d| MetricFindValue::new(d.service_short_name.as_str(), d.service.as_str()))
            .collect())
    }

    async fn handle_metric_types_query(
        &self,
        query: &VariableQuery,
    ) -> Result<Vec<MetricFindValue>> {
        let Some(service) = query.service() else {
            return Ok(Vec::new());
        };

        let descriptors = self.datasource.get_metric_types(query.project()).await?;
        let service = self.datasource.interpolate(service);
        Ok(metric_types_for_service(&descriptors, &service)
            .into_iter()
            .map(|d| MetricFindValue::new(d.display_name.as_str(), d.metric_type.as_str()))
            .collect())
    }

    async fn handle_label_keys_query(&self, query: &VariableQuery) -> Result<Vec<MetricFindValue>> {
        let Some(metric_type) = query.metric_type() else {
            return Ok(Vec::new());
        };

        let label_keys = label_keys_for(
            self.datasource.as_ref(),
            metric_type,
            query.project(),
            &self.config.label_keys_request_tag,
            &self.config.system_labels,
        )
        .await?;
        Ok(to_options(label_keys))
    }

    async fn handle_label_values_query(
        &self,
        query: &VariableQuery,
    ) -> Result<Vec<MetricFindValue>> {
        let Some(metric_type) = query.metric_type() else {
            return Ok(Vec::new());
        };

        let label_key = self
            .datasource
            .interpolate(query.label_key.as_deref().unwrap_or_default());
        let mut labels = self
            .datasource
            .get_labels(
                metric_type,
                &self.config.label_values_request_tag,
                query.project(),
                Some(std::slice::from_ref(&label_key)),
            )
            .await?;

        Ok(to_options(labels.shift_remove(&label_key).unwrap_or_default()))
    }

    async fn handle_resource_type_query(
        &self,
        query: &VariableQuery,
    ) -> Result<Vec<MetricFindValue>> {
        let Some(metric_type) = query.metric_type() else {
            return Ok(Vec::new());
        };

        let mut labels = self
            .datasource
            .get_labels(
                metric_type,
                &self.config.resource_type_request_tag,
                None,
                None,
            )
            .await?;

        Ok(to_options(
            labels
                .shift_remove(&self.config.resource_type_label)
                .unwrap_or_default(),
        ))
    }

    async fn handle_aligners_query(&self, query: &VariableQuery) -> Result<Vec<MetricFindValue>> {
        let Some(metric_type) = query.metric_type() else {
            return Ok(Vec::new());
        };

        let descriptor = self.find_selected_descriptor(query, metric_type).await?;
        Ok(to_options(alignment_options(
            descriptor.value_type,
            descriptor.metric_kind,
        )))
    }

    async fn handle_aggregation_query(
        &self,
        query: &VariableQuery,
    ) -> Result<Vec<MetricFindValue>> {
        let Some(metric_type) = query.metric_type() else {
            return Ok(Vec::new());
        };

        let descriptor = self.find_selected_descriptor(query, metric_type).await?;
        Ok(to_options(aggregation_options(
            descriptor.value_type,
            descriptor.metric_kind,
        )))
    }

    fn handle_alignment_period_query(&self) -> Vec<MetricFindValue> {
        to_options(alignment_periods(ALIGNMENT_PERIODS))
    }

    /// Fetch the project's descriptors and pick the selected metric type
    async fn find_selected_descriptor(
        &self,
        query: &VariableQuery,
        metric_type: &str,
    ) -> Result<MetricDescriptor> {
        let descriptors = self.datasource.get_metric_types(query.project()).await?;
        let metric_type = self.datasource.interpolate(metric_type);
        find_descriptor(&descriptors, &metric_type)
            .cloned()
            .ok_or_else(|| MetricFindQueryError::descriptor_not_found(metric_type))
    }
}

fn to_options<T: Into<RawOption>>(items: Vec<T>) -> Vec<MetricFindValue> {
    items.into_iter().map(|item| to_option(item.into())).collect()
}
