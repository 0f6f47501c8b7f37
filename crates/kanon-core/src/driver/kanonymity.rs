use crate::{
    accumulator::{FrequencyTable, MergeOutcome, PartialState},
    config::KAnonymityConfig,
    driver::{AggregateMode, AggregatePhase, DriverError, PhaseOp},
    identity::RowIdentifier,
    obs::{MetricsEvent, sink::record},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// AggregationResult
///
/// Terminal output of one aggregation. `min_frequency` is `None` when no
/// group was observed, which is distinct from a minimum of zero.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregationResult {
    min_frequency: Option<u64>,
    groups: u64,
    rows: u64,
}

impl AggregationResult {
    #[must_use]
    pub const fn min_frequency(&self) -> Option<u64> {
        self.min_frequency
    }

    /// Distinct groups in the finalized table.
    #[must_use]
    pub const fn groups(&self) -> u64 {
        self.groups
    }

    /// Rows accounted for in the finalized table.
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Whether every group has at least `k` rows; `None` without a result.
    #[must_use]
    pub const fn satisfies(&self, k: u64) -> Option<bool> {
        match self.min_frequency {
            Some(min) => Some(min >= k),
            None => None,
        }
    }
}

///
/// KAnonymityDriver
///
/// KAnonymityDriver owns one frequency table and enforces which operations
/// its mode and current phase allow. A rejected operation never mutates the
/// table or the phase.
///

#[derive(Clone, Debug)]
pub struct KAnonymityDriver {
    mode: AggregateMode,
    phase: AggregatePhase,
    table: FrequencyTable,
    max_partial_bytes: usize,
}

impl KAnonymityDriver {
    #[must_use]
    pub fn new(mode: AggregateMode, config: &KAnonymityConfig) -> Self {
        Self::with_identifier(mode, config, config.build_identifier())
    }

    /// Build a driver around an injected identifier; arity and limits still
    /// come from `config`.
    #[must_use]
    pub fn with_identifier(
        mode: AggregateMode,
        config: &KAnonymityConfig,
        identifier: RowIdentifier,
    ) -> Self {
        Self {
            mode,
            phase: AggregatePhase::Init,
            table: config.table_with(identifier),
            max_partial_bytes: config.limits.max_partial_bytes,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> AggregateMode {
        self.mode
    }

    #[must_use]
    pub const fn phase(&self) -> AggregatePhase {
        self.phase
    }

    #[must_use]
    pub const fn table(&self) -> &FrequencyTable {
        &self.table
    }

    // Resolve the phase `op` would move to without touching any state.
    fn next_phase(&self, op: PhaseOp) -> Result<AggregatePhase, DriverError> {
        if !self.mode.permits(op) {
            return Err(DriverError::ModeViolation {
                mode: self.mode,
                operation: op,
            });
        }

        self.phase.after(op).ok_or(DriverError::PhaseViolation {
            phase: self.phase,
            operation: op,
        })
    }

    /// Clear all counts so the driver can take a fresh partition.
    pub fn reset(&mut self) -> Result<(), DriverError> {
        let next = self.next_phase(PhaseOp::Reset)?;
        self.table.reset();
        self.phase = next;
        record(MetricsEvent::Reset { mode: self.mode });

        Ok(())
    }

    /// Count one input row.
    pub fn observe(&mut self, row: &[Value]) -> Result<(), DriverError> {
        let result = self
            .next_phase(PhaseOp::Observe)
            .and_then(|next| {
                self.table.observe(row)?;
                Ok(next)
            });

        match result {
            Ok(next) => {
                self.phase = next;
                record(MetricsEvent::RowObserved { mode: self.mode });
                Ok(())
            }
            Err(err) => {
                record(MetricsEvent::RowRejected { mode: self.mode });
                Err(err)
            }
        }
    }

    /// Snapshot the table for shipping to a combiner.
    pub fn export_partial(&mut self) -> Result<PartialState, DriverError> {
        let next = self.next_phase(PhaseOp::Export)?;
        let partial = self.table.export_partial();
        self.commit_export(next, &partial);

        Ok(partial)
    }

    /// Snapshot the table and encode it for transport.
    pub fn export_encoded(&mut self) -> Result<Vec<u8>, DriverError> {
        let next = self.next_phase(PhaseOp::Export)?;
        let partial = self.table.export_partial();
        let bytes = partial.encode()?;
        self.commit_export(next, &partial);

        Ok(bytes)
    }

    fn commit_export(&mut self, next: AggregatePhase, partial: &PartialState) {
        self.phase = next;
        record(MetricsEvent::PartialExported {
            mode: self.mode,
            entries: partial.len() as u64,
        });
    }

    /// Absorb one partial exported by another driver.
    pub fn merge_partial(&mut self, partial: &PartialState) -> Result<MergeOutcome, DriverError> {
        let result = self.next_phase(PhaseOp::Merge).and_then(|next| {
            let outcome = self.table.merge_from(partial)?;
            Ok((next, outcome))
        });

        match result {
            Ok((next, outcome)) => {
                self.phase = next;
                record(MetricsEvent::PartialMerged {
                    mode: self.mode,
                    entries: outcome.entries as u64,
                    new_groups: outcome.new_groups as u64,
                });
                Ok(outcome)
            }
            Err(err) => {
                record(MetricsEvent::PartialRejected { mode: self.mode });
                Err(err)
            }
        }
    }

    /// Decode a transported partial under the configured size limit, then
    /// merge it.
    pub fn merge_encoded(&mut self, bytes: &[u8]) -> Result<MergeOutcome, DriverError> {
        self.next_phase(PhaseOp::Merge)?;

        let partial = match PartialState::decode(bytes, self.max_partial_bytes) {
            Ok(partial) => partial,
            Err(err) => {
                record(MetricsEvent::PartialRejected { mode: self.mode });
                return Err(err.into());
            }
        };

        self.merge_partial(&partial)
    }

    /// Read the minimum frequency. The driver accepts no further operations.
    pub fn finalize(&mut self) -> Result<AggregationResult, DriverError> {
        let next = self.next_phase(PhaseOp::Finalize)?;
        let result = AggregationResult {
            min_frequency: self.table.minimum(),
            groups: self.table.len() as u64,
            rows: self.table.rows(),
        };
        self.phase = next;
        record(MetricsEvent::Finalized {
            mode: self.mode,
            groups: result.groups,
            min_frequency: result.min_frequency,
        });

        Ok(result)
    }
}
