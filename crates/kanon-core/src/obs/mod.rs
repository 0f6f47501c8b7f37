//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Aggregation code never touches counters directly; it emits `MetricsEvent`s
//! through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, ModeCounters, ModeSummary};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
