use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for aggregate driver activity.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub modes: BTreeMap<String, ModeCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            modes: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Row feed
    pub rows_observed: u64,
    pub rows_rejected: u64,
    pub resets: u64,

    // Partial handoff
    pub partials_exported: u64,
    pub partial_entries_exported: u64,
    pub partials_merged: u64,
    pub partial_entries_merged: u64,
    pub merge_new_groups: u64,
    pub partials_rejected: u64,

    // Finalize
    pub finalizations: u64,
    pub empty_finalizations: u64,
    pub lowest_min_frequency: Option<u64>,
}

///
/// ModeCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModeCounters {
    pub rows_observed: u64,
    pub rows_rejected: u64,
    pub partials_exported: u64,
    pub partial_entries_exported: u64,
    pub partials_merged: u64,
    pub partials_rejected: u64,
    pub finalizations: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `since_ms`.
    pub counters: Option<EventState>,
    /// Per-mode counters and averages.
    pub mode_summaries: Vec<ModeSummary>,
}

///
/// ModeSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ModeSummary {
    pub mode: String,
    pub rows_observed: u64,
    pub rows_rejected: u64,
    pub partials_exported: u64,
    pub partials_merged: u64,
    pub finalizations: u64,
    pub avg_entries_per_partial: f64,
}

/// Build a metrics report from in-memory counters only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mode_summaries = snap
        .modes
        .iter()
        .map(|(mode, ops)| {
            let avg_entries = if ops.partials_exported > 0 {
                ops.partial_entries_exported as f64 / ops.partials_exported as f64
            } else {
                0.0
            };

            ModeSummary {
                mode: mode.clone(),
                rows_observed: ops.rows_observed,
                rows_rejected: ops.rows_rejected,
                partials_exported: ops.partials_exported,
                partials_merged: ops.partials_merged,
                finalizations: ops.finalizations,
                avg_entries_per_partial: avg_entries,
            }
        })
        .collect();

    EventReport {
        counters: Some(snap),
        mode_summaries,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.rows_observed = 3;
            m.ops.lowest_min_frequency = Some(2);
            m.modes.insert(
                "merge".to_string(),
                ModeCounters {
                    partials_merged: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops, EventOps::default());
            assert!(m.modes.is_empty());
        });
    }

    #[test]
    fn report_averages_entries_per_partial() {
        reset_all();
        with_state_mut(|m| {
            m.modes.insert(
                "partition_local".to_string(),
                ModeCounters {
                    partials_exported: 2,
                    partial_entries_exported: 7,
                    ..Default::default()
                },
            );
            m.modes.insert("single_node".to_string(), ModeCounters::default());
        });

        let report = report();
        let modes: Vec<_> = report
            .mode_summaries
            .iter()
            .map(|summary| summary.mode.as_str())
            .collect();

        assert_eq!(modes, ["partition_local", "single_node"]);
        assert_eq!(report.mode_summaries[0].avg_entries_per_partial, 3.5);
        assert_eq!(report.mode_summaries[1].avg_entries_per_partial, 0.0);
    }
}
