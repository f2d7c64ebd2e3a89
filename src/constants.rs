//! # Monitoring Constants
//!
//! Value types, metric kinds and the static option tables that decide which
//! alignment and aggregation functions are legal for a metric.
//!
//! The tables mirror the monitoring API's reducer and aligner enums. Table
//! order is the order options are presented to the variable picker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request tags passed to `get_labels` so the backend can attribute calls
pub mod request_tags {
    pub const LABEL_KEYS: &str = "handleLabelKeysQuery";
    pub const LABEL_VALUES: &str = "handleLabelValuesQuery";
    pub const RESOURCE_TYPES: &str = "handleResourceTypeQueryQueryType";
}

/// Label holding the monitored resource type of a time series
pub const RESOURCE_TYPE_LABEL: &str = "resource.type";

/// Metadata labels every metric can be grouped by, regardless of its own labels
pub const SYSTEM_LABELS: &[&str] = &[
    "metadata.system_labels.cloud_account",
    "metadata.system_labels.name",
    "metadata.system_labels.region",
    "metadata.system_labels.state",
    "metadata.system_labels.instance_group",
    "metadata.system_labels.node_name",
    "metadata.system_labels.service_name",
    "metadata.system_labels.top_level_controller_type",
    "metadata.system_labels.top_level_controller_name",
    "metadata.system_labels.container_image",
];

/// Value type of the points in a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Bool,
    Int64,
    Double,
    String,
    Distribution,
    Money,
    ValueTypeUnspecified,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Bool => "BOOL",
            ValueType::Int64 => "INT64",
            ValueType::Double => "DOUBLE",
            ValueType::String => "STRING",
            ValueType::Distribution => "DISTRIBUTION",
            ValueType::Money => "MONEY",
            ValueType::ValueTypeUnspecified => "VALUE_TYPE_UNSPECIFIED",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the points of a time series relate to each other in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    Gauge,
    Delta,
    Cumulative,
    MetricKindUnspecified,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "GAUGE",
            MetricKind::Delta => "DELTA",
            MetricKind::Cumulative => "CUMULATIVE",
            MetricKind::MetricKindUnspecified => "METRIC_KIND_UNSPECIFIED",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable reducer or aligner, legal for the listed value types and kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionOption {
    pub text: &'static str,
    pub value: &'static str,
    pub value_types: &'static [ValueType],
    pub metric_kinds: &'static [MetricKind],
}

impl FunctionOption {
    pub fn supports(&self, value_type: ValueType, metric_kind: MetricKind) -> bool {
        self.value_types.contains(&value_type) && self.metric_kinds.contains(&metric_kind)
    }
}

/// A predefined alignment period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentPeriod {
    pub text: &'static str,
    pub value: &'static str,
}

use MetricKind::{Cumulative, Delta, Gauge, MetricKindUnspecified};
use ValueType::{Bool, Distribution, Double, Int64, Money, ValueTypeUnspecified};

const NUMERIC: &[ValueType] = &[Int64, Double, Money];
const NUMERIC_AND_DISTRIBUTION: &[ValueType] = &[Int64, Double, Money, Distribution];
const GAUGE_AND_DELTA: &[MetricKind] = &[Gauge, Delta];

const fn option(
    text: &'static str,
    value: &'static str,
    value_types: &'static [ValueType],
    metric_kinds: &'static [MetricKind],
) -> FunctionOption {
    FunctionOption {
        text,
        value,
        value_types,
        metric_kinds,
    }
}

pub const ALIGN_OPTIONS: &[FunctionOption] = &[
    option("delta", "ALIGN_DELTA", NUMERIC_AND_DISTRIBUTION, &[Cumulative, Delta]),
    option("rate", "ALIGN_RATE", NUMERIC, &[Cumulative, Delta]),
    option("interpolate", "ALIGN_INTERPOLATE", NUMERIC, &[Gauge]),
    option(
        "next older",
        "ALIGN_NEXT_OLDER",
        &[
            Int64,
            Double,
            Money,
            Distribution,
            ValueType::String,
            ValueTypeUnspecified,
            Bool,
        ],
        &[Gauge],
    ),
    option("min", "ALIGN_MIN", NUMERIC, GAUGE_AND_DELTA),
    option("max", "ALIGN_MAX", NUMERIC, GAUGE_AND_DELTA),
    option("mean", "ALIGN_MEAN", NUMERIC, GAUGE_AND_DELTA),
    option("count", "ALIGN_COUNT", &[Int64, Double, Money, Bool], GAUGE_AND_DELTA),
    option("sum", "ALIGN_SUM", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option("stddev", "ALIGN_STDDEV", NUMERIC, GAUGE_AND_DELTA),
    option("count true", "ALIGN_COUNT_TRUE", &[Bool], GAUGE_AND_DELTA),
    option("count false", "ALIGN_COUNT_FALSE", &[Bool], GAUGE_AND_DELTA),
    option("fraction true", "ALIGN_FRACTION_TRUE", &[Bool], GAUGE_AND_DELTA),
    option("percentile 99", "ALIGN_PERCENTILE_99", &[Distribution], GAUGE_AND_DELTA),
    option("percentile 95", "ALIGN_PERCENTILE_95", &[Distribution], GAUGE_AND_DELTA),
    option("percentile 50", "ALIGN_PERCENTILE_50", &[Distribution], GAUGE_AND_DELTA),
    option("percentile 05", "ALIGN_PERCENTILE_05", &[Distribution], GAUGE_AND_DELTA),
    option("percent change", "ALIGN_PERCENT_CHANGE", NUMERIC, GAUGE_AND_DELTA),
];

pub const AGGREGATION_OPTIONS: &[FunctionOption] = &[
    option(
        "none",
        "REDUCE_NONE",
        &[Int64, Double, Money, Distribution, Bool, ValueType::String],
        &[Gauge, Delta, Cumulative, MetricKindUnspecified],
    ),
    option("mean", "REDUCE_MEAN", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option("min", "REDUCE_MIN", NUMERIC, GAUGE_AND_DELTA),
    option("max", "REDUCE_MAX", NUMERIC, GAUGE_AND_DELTA),
    option("sum", "REDUCE_SUM", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option("std. dev.", "REDUCE_STDDEV", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option(
        "count",
        "REDUCE_COUNT",
        &[Int64, Double, Money, Bool, ValueType::String, Distribution],
        GAUGE_AND_DELTA,
    ),
    option("count true", "REDUCE_COUNT_TRUE", &[Bool], GAUGE_AND_DELTA),
    option("count false", "REDUCE_COUNT_FALSE", &[Bool], GAUGE_AND_DELTA),
    option("99th percentile", "REDUCE_PERCENTILE_99", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option("95th percentile", "REDUCE_PERCENTILE_95", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option("50th percentile", "REDUCE_PERCENTILE_50", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
    option("5th percentile", "REDUCE_PERCENTILE_05", NUMERIC_AND_DISTRIBUTION, GAUGE_AND_DELTA),
];

pub const ALIGNMENT_PERIODS: &[AlignmentPeriod] = &[
    AlignmentPeriod { text: "grafana auto", value: "grafana-auto" },
    AlignmentPeriod { text: "stackdriver auto", value: "stackdriver-auto" },
    AlignmentPeriod { text: "1m", value: "+60s" },
    AlignmentPeriod { text: "2m", value: "+120s" },
    AlignmentPeriod { text: "5m", value: "+300s" },
    AlignmentPeriod { text: "10m", value: "+600s" },
    AlignmentPeriod { text: "30m", value: "+1800s" },
    AlignmentPeriod { text: "1h", value: "+3600s" },
    AlignmentPeriod { text: "3h", value: "+10800s" },
    AlignmentPeriod { text: "6h", value: "+21600s" },
    AlignmentPeriod { text: "1d", value: "+86400s" },
    AlignmentPeriod { text: "3d", value: "+259200s" },
    AlignmentPeriod { text: "1w", value: "+604800s" },
];
