//! Metrics sink boundary.
//!
//! Driver logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between aggregation logic
//! and the thread-local metrics state.
use crate::{driver::AggregateMode, obs::metrics};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    RowObserved {
        mode: AggregateMode,
    },
    RowRejected {
        mode: AggregateMode,
    },
    Reset {
        mode: AggregateMode,
    },
    PartialExported {
        mode: AggregateMode,
        entries: u64,
    },
    PartialMerged {
        mode: AggregateMode,
        entries: u64,
        new_groups: u64,
    },
    PartialRejected {
        mode: AggregateMode,
    },
    Finalized {
        mode: AggregateMode,
        groups: u64,
        min_frequency: Option<u64>,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::RowObserved { mode } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_observed = m.ops.rows_observed.saturating_add(1);
                    let entry = m.modes.entry(mode.as_str().to_string()).or_default();
                    entry.rows_observed = entry.rows_observed.saturating_add(1);
                });
            }

            MetricsEvent::RowRejected { mode } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_rejected = m.ops.rows_rejected.saturating_add(1);
                    let entry = m.modes.entry(mode.as_str().to_string()).or_default();
                    entry.rows_rejected = entry.rows_rejected.saturating_add(1);
                });
            }

            MetricsEvent::Reset { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.resets = m.ops.resets.saturating_add(1);
                });
            }

            MetricsEvent::PartialExported { mode, entries } => {
                metrics::with_state_mut(|m| {
                    m.ops.partials_exported = m.ops.partials_exported.saturating_add(1);
                    m.ops.partial_entries_exported =
                        m.ops.partial_entries_exported.saturating_add(entries);

                    let entry = m.modes.entry(mode.as_str().to_string()).or_default();
                    entry.partials_exported = entry.partials_exported.saturating_add(1);
                    entry.partial_entries_exported =
                        entry.partial_entries_exported.saturating_add(entries);
                });
            }

            MetricsEvent::PartialMerged {
                mode,
                entries,
                new_groups,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.partials_merged = m.ops.partials_merged.saturating_add(1);
                    m.ops.partial_entries_merged =
                        m.ops.partial_entries_merged.saturating_add(entries);
                    m.ops.merge_new_groups = m.ops.merge_new_groups.saturating_add(new_groups);

                    let entry = m.modes.entry(mode.as_str().to_string()).or_default();
                    entry.partials_merged = entry.partials_merged.saturating_add(1);
                });
            }

            MetricsEvent::PartialRejected { mode } => {
                metrics::with_state_mut(|m| {
                    m.ops.partials_rejected = m.ops.partials_rejected.saturating_add(1);
                    let entry = m.modes.entry(mode.as_str().to_string()).or_default();
                    entry.partials_rejected = entry.partials_rejected.saturating_add(1);
                });
            }

            MetricsEvent::Finalized {
                mode,
                groups: _,
                min_frequency,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.finalizations = m.ops.finalizations.saturating_add(1);
                    match min_frequency {
                        Some(k) => {
                            m.ops.lowest_min_frequency =
                                Some(m.ops.lowest_min_frequency.map_or(k, |low| low.min(k)));
                        }
                        None => {
                            m.ops.empty_finalizations = m.ops.empty_finalizations.saturating_add(1);
                        }
                    }

                    let entry = m.modes.entry(mode.as_str().to_string()).or_default();
                    entry.finalizations = entry.finalizations.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // What would break this:
    // - Any async/deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn override_captures_events_and_bypasses_global_state() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        with_metrics_sink(&sink, || {
            record(MetricsEvent::RowObserved {
                mode: AggregateMode::SingleNode,
            });
        });

        assert_eq!(
            sink.events.borrow().as_slice(),
            &[MetricsEvent::RowObserved {
                mode: AggregateMode::SingleNode
            }]
        );
        metrics::with_state(|m| assert_eq!(m.ops.rows_observed, 0));
    }

    #[test]
    fn override_is_restored_after_scope() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        with_metrics_sink(&sink, || {});
        record(MetricsEvent::Reset {
            mode: AggregateMode::Merge,
        });

        assert!(sink.events.borrow().is_empty());
        metrics::with_state(|m| assert_eq!(m.ops.resets, 1));
    }

    #[test]
    fn finalize_tracks_lowest_min_frequency() {
        metrics_reset_all();
        for min_frequency in [Some(4), None, Some(2), Some(3)] {
            record(MetricsEvent::Finalized {
                mode: AggregateMode::Merge,
                groups: 1,
                min_frequency,
            });
        }

        metrics::with_state(|m| {
            assert_eq!(m.ops.finalizations, 4);
            assert_eq!(m.ops.empty_finalizations, 1);
            assert_eq!(m.ops.lowest_min_frequency, Some(2));
        });
    }
}
