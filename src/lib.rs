#![allow(clippy::doc_markdown)] // Allow technical terms like PubSub, OTLP in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Metric Find Query
//!
//! Template variable resolution for a cloud monitoring data source.
//!
//! ## Overview
//!
//! A dashboard variable can be populated from monitoring metadata: the
//! projects visible to the user, the services and metric types in a
//! project, a metric's label keys and values, its resource types, or the
//! alignment and aggregation functions legal for it. This crate takes the
//! saved variable query, asks the monitoring backend for the metadata it
//! needs, and returns a uniform list of picker options.
//!
//! ## Module Organization
//!
//! - [`resolver`] - Query type dispatch and per-type option shaping
//! - [`datasource`] - The backend capabilities the resolver consumes
//! - [`functions`] - Pure helpers over fetched metadata
//! - [`constants`] - Value types, metric kinds and option tables
//! - [`types`] - Query descriptor, metadata records and options
//! - [`interpolation`] - Dashboard variable substitution
//! - [`config`] - Resolver configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Console tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use metric_find_query::{MetricFindQuery, MetricFindQueryType, MonitoringDatasource, VariableQuery};
//! use std::sync::Arc;
//!
//! # async fn example(datasource: Arc<dyn MonitoringDatasource>) {
//! let resolver = MetricFindQuery::new(datasource);
//! let query = VariableQuery::new(MetricFindQueryType::Aligners)
//!     .with_default_project("my-project")
//!     .with_metric_type("compute.googleapis.com/instance/cpu/utilization");
//!
//! let aligners = resolver.execute(&query).await;
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod datasource;
pub mod error;
pub mod functions;
pub mod interpolation;
pub mod logging;
pub mod resolver;
pub mod types;

pub use config::ResolverConfig;
pub use constants::{MetricKind, ValueType};
pub use datasource::{LabelMap, MonitoringDatasource};
pub use error::{ConfigurationError, DatasourceError, MetricFindQueryError, Result};
pub use interpolation::TemplateVariables;
pub use resolver::MetricFindQuery;
pub use types::{
    MetricDescriptor, MetricFindQueryType, MetricFindValue, Project, RawOption, VariableQuery,
};
