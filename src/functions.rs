//! # Metadata Helpers
//!
//! Pure transformations over fetched metric metadata, plus the label-key
//! lookup that combines a label fetch with the system label list.

use crate::constants::{
    AlignmentPeriod, FunctionOption, MetricKind, ValueType, AGGREGATION_OPTIONS, ALIGN_OPTIONS,
};
use crate::datasource::MonitoringDatasource;
use crate::error::DatasourceResult;
use crate::types::{MetricDescriptor, MetricFindValue, RawOption};
use std::collections::HashSet;

/// Shape a raw metadata item into a picker option
///
/// Plain strings become `{ text, expandable }`; structured items keep their
/// fields and are forced expandable.
pub fn to_option(raw: RawOption) -> MetricFindValue {
    match raw {
        RawOption::Plain(text) => MetricFindValue::text(text),
        RawOption::Structured(option) => MetricFindValue {
            expandable: true,
            ..option
        },
    }
}

/// One descriptor per service, in first-seen order
pub fn services_from_descriptors(descriptors: &[MetricDescriptor]) -> Vec<&MetricDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .iter()
        .filter(|descriptor| seen.insert(descriptor.service.as_str()))
        .collect()
}

pub fn metric_types_for_service<'a>(
    descriptors: &'a [MetricDescriptor],
    service: &str,
) -> Vec<&'a MetricDescriptor> {
    descriptors
        .iter()
        .filter(|descriptor| descriptor.service == service)
        .collect()
}

pub fn find_descriptor<'a>(
    descriptors: &'a [MetricDescriptor],
    metric_type: &str,
) -> Option<&'a MetricDescriptor> {
    descriptors
        .iter()
        .find(|descriptor| descriptor.metric_type == metric_type)
}

/// Aligners legal for a metric; none when the value type or kind is unknown
pub fn alignment_options(
    value_type: Option<ValueType>,
    metric_kind: Option<MetricKind>,
) -> Vec<RawOption> {
    match (value_type, metric_kind) {
        (Some(value_type), Some(metric_kind)) => {
            filter_options(ALIGN_OPTIONS, value_type, metric_kind)
        }
        _ => Vec::new(),
    }
}

/// Reducers legal for a metric; none when the value type or kind is unknown
pub fn aggregation_options(
    value_type: Option<ValueType>,
    metric_kind: Option<MetricKind>,
) -> Vec<RawOption> {
    match (value_type, metric_kind) {
        (Some(value_type), Some(metric_kind)) => {
            filter_options(AGGREGATION_OPTIONS, value_type, metric_kind)
        }
        _ => Vec::new(),
    }
}

fn filter_options(
    table: &[FunctionOption],
    value_type: ValueType,
    metric_kind: MetricKind,
) -> Vec<RawOption> {
    table
        .iter()
        .filter(|option| option.supports(value_type, metric_kind))
        .map(|option| RawOption::Structured(MetricFindValue::new(option.text, option.value)))
        .collect()
}

pub fn alignment_periods(periods: &[AlignmentPeriod]) -> Vec<RawOption> {
    periods
        .iter()
        .map(|period| RawOption::Structured(MetricFindValue::new(period.text, period.value)))
        .collect()
}

/// Label keys usable for grouping a metric
///
/// The metric's own labels come first in the order the backend listed
/// them, followed by `system_labels`.
pub async fn label_keys_for(
    datasource: &dyn MonitoringDatasource,
    metric_type: &str,
    project: Option<&str>,
    request_tag: &str,
    system_labels: &[String],
) -> DatasourceResult<Vec<String>> {
    let labels = datasource
        .get_labels(metric_type, request_tag, project, None)
        .await?;

    let mut keys: Vec<String> = labels.into_keys().collect();
    keys.extend(system_labels.iter().cloned());
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALIGNMENT_PERIODS;

    fn descriptor(metric_type: &str) -> MetricDescriptor {
        MetricDescriptor {
            metric_type: metric_type.to_string(),
            display_name: String::new(),
            service: String::new(),
            service_short_name: String::new(),
            value_type: Some(ValueType::Double),
            metric_kind: Some(MetricKind::Gauge),
        }
        .normalize()
    }

    fn values(options: Vec<RawOption>) -> Vec<String> {
        options
            .into_iter()
            .map(|raw| to_option(raw).value.unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_to_option_plain_and_structured() {
        assert_eq!(
            to_option(RawOption::from("x")),
            MetricFindValue {
                text: "x".to_string(),
                value: None,
                expandable: true
            }
        );

        let structured = MetricFindValue {
            text: "a".to_string(),
            value: Some("b".to_string()),
            expandable: false,
        };
        assert_eq!(
            to_option(RawOption::Structured(structured)),
            MetricFindValue::new("a", "b")
        );
    }

    #[test]
    fn test_services_are_unique_in_first_seen_order() {
        let descriptors = vec![
            descriptor("pubsub.googleapis.com/topic/send_message_operation_count"),
            descriptor("compute.googleapis.com/instance/cpu/utilization"),
            descriptor("pubsub.googleapis.com/subscription/num_undelivered_messages"),
        ];

        let services: Vec<_> = services_from_descriptors(&descriptors)
            .into_iter()
            .map(|d| d.service_short_name.as_str())
            .collect();
        assert_eq!(services, vec!["pubsub", "compute"]);
    }

    #[test]
    fn test_metric_types_for_service_filters_exactly() {
        let descriptors = vec![
            descriptor("compute.googleapis.com/instance/cpu/utilization"),
            descriptor("compute.googleapis.com/instance/uptime"),
            descriptor("storage.googleapis.com/api/request_count"),
        ];

        let metric_types = metric_types_for_service(&descriptors, "compute.googleapis.com");
        assert_eq!(metric_types.len(), 2);
        assert!(metric_types_for_service(&descriptors, "compute").is_empty());
    }

    #[test]
    fn test_find_descriptor_miss_is_none() {
        let descriptors = vec![descriptor("compute.googleapis.com/instance/uptime")];
        assert!(find_descriptor(&descriptors, "compute.googleapis.com/instance/uptime").is_some());
        assert!(find_descriptor(&descriptors, "compute.googleapis.com/instance/other").is_none());
    }

    #[test]
    fn test_alignment_options_for_gauge_double() {
        let aligners = values(alignment_options(
            Some(ValueType::Double),
            Some(MetricKind::Gauge),
        ));
        assert_eq!(
            aligners,
            vec![
                "ALIGN_INTERPOLATE",
                "ALIGN_NEXT_OLDER",
                "ALIGN_MIN",
                "ALIGN_MAX",
                "ALIGN_MEAN",
                "ALIGN_COUNT",
                "ALIGN_SUM",
                "ALIGN_STDDEV",
                "ALIGN_PERCENT_CHANGE",
            ]
        );
    }

    #[test]
    fn test_alignment_options_for_cumulative_distribution() {
        let aligners = values(alignment_options(
            Some(ValueType::Distribution),
            Some(MetricKind::Cumulative),
        ));
        assert_eq!(aligners, vec!["ALIGN_DELTA"]);
    }

    #[test]
    fn test_alignment_options_without_value_type_is_empty() {
        assert!(alignment_options(None, Some(MetricKind::Gauge)).is_empty());
    }

    #[test]
    fn test_aggregation_options_for_bool_delta() {
        let reducers = values(aggregation_options(
            Some(ValueType::Bool),
            Some(MetricKind::Delta),
        ));
        assert_eq!(
            reducers,
            vec![
                "REDUCE_NONE",
                "REDUCE_COUNT",
                "REDUCE_COUNT_TRUE",
                "REDUCE_COUNT_FALSE"
            ]
        );
    }

    #[test]
    fn test_aggregation_options_for_cumulative_only_allow_none() {
        let reducers = values(aggregation_options(
            Some(ValueType::Int64),
            Some(MetricKind::Cumulative),
        ));
        assert_eq!(reducers, vec!["REDUCE_NONE"]);
    }

    #[test]
    fn test_aggregation_options_without_kind_is_empty() {
        assert!(aggregation_options(Some(ValueType::Double), None).is_empty());
    }

    #[test]
    fn test_alignment_periods_map_every_entry() {
        let periods = alignment_periods(ALIGNMENT_PERIODS);
        assert_eq!(periods.len(), ALIGNMENT_PERIODS.len());
        assert_eq!(
            to_option(periods[2].clone()),
            MetricFindValue::new("1m", "+60s")
        );
    }
}
