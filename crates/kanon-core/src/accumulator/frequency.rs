use crate::{
    accumulator::{AccumulatorError, FrequencyRecord, PARTIAL_STATE_VERSION, PartialState},
    identity::{RowIdentifier, RowSignature},
    value::Value,
};
use std::collections::{HashMap, hash_map::Entry};

///
/// GroupLimits
///
/// Hard limits on how many distinct groups one table may hold. Limits stay
/// policy-owned by the caller instead of being baked into the table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupLimits {
    max_groups: u64,
}

impl GroupLimits {
    #[must_use]
    pub const fn with_max_groups(max_groups: u64) -> Self {
        Self { max_groups }
    }

    #[must_use]
    pub const fn unbounded() -> Self {
        Self::with_max_groups(u64::MAX)
    }

    #[must_use]
    pub const fn max_groups(&self) -> u64 {
        self.max_groups
    }
}

impl Default for GroupLimits {
    fn default() -> Self {
        Self::unbounded()
    }
}

///
/// MergeOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MergeOutcome {
    /// Entries carried by the merged partial.
    pub entries: usize,

    /// Entries whose signature was not yet present in the table.
    pub new_groups: usize,
}

///
/// FrequencyTable
///
/// FrequencyTable maps row signatures to occurrence counts for one partition
/// or one combiner. It is single-writer; other partitions only ever see it
/// through `export_partial` snapshots.
///

#[derive(Clone, Debug)]
pub struct FrequencyTable {
    identifier: RowIdentifier,
    declared_arity: Option<usize>,
    inferred_arity: Option<usize>,
    limits: GroupLimits,
    counts: HashMap<RowSignature, u64>,
    rows: u64,
}

impl FrequencyTable {
    /// Build an empty table. With no declared arity, the first observed row
    /// after each reset fixes it.
    #[must_use]
    pub fn new(identifier: RowIdentifier, declared_arity: Option<usize>) -> Self {
        Self {
            identifier,
            declared_arity,
            inferred_arity: None,
            limits: GroupLimits::default(),
            counts: HashMap::new(),
            rows: 0,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: GroupLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub const fn identifier(&self) -> &RowIdentifier {
        &self.identifier
    }

    #[must_use]
    pub const fn limits(&self) -> GroupLimits {
        self.limits
    }

    /// Column count rows must have, if known yet.
    #[must_use]
    pub const fn arity(&self) -> Option<usize> {
        match self.declared_arity {
            Some(arity) => Some(arity),
            None => self.inferred_arity,
        }
    }

    /// Number of distinct groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows accounted for, whether observed locally or merged in.
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    #[must_use]
    pub fn count_of(&self, signature: &RowSignature) -> u64 {
        self.counts.get(signature).copied().unwrap_or(0)
    }

    /// Drop every record and any inferred arity.
    pub fn reset(&mut self) {
        self.counts.clear();
        self.inferred_arity = None;
        self.rows = 0;
    }

    /// Count one row.
    pub fn observe(&mut self, columns: &[Value]) -> Result<(), AccumulatorError> {
        if let Some(expected) = self.arity()
            && expected != columns.len()
        {
            return Err(AccumulatorError::ArityMismatch {
                expected,
                found: columns.len(),
            });
        }

        let signature = self.identifier.identify(columns)?;
        self.observe_signature(signature)?;

        if self.arity().is_none() {
            self.inferred_arity = Some(columns.len());
        }

        Ok(())
    }

    /// Count one row whose signature was derived elsewhere.
    pub fn observe_signature(&mut self, signature: RowSignature) -> Result<(), AccumulatorError> {
        let groups = self.counts.len();
        let rows = self
            .rows
            .checked_add(1)
            .ok_or_else(|| AccumulatorError::CountOverflow {
                signature: signature.to_string(),
            })?;

        match self.counts.entry(signature) {
            Entry::Occupied(mut entry) => {
                let next = entry.get().checked_add(1).ok_or_else(|| {
                    AccumulatorError::CountOverflow {
                        signature: entry.key().to_string(),
                    }
                })?;
                *entry.get_mut() = next;
            }
            Entry::Vacant(entry) => {
                check_group_capacity(self.limits, groups, 1)?;
                entry.insert(1);
            }
        }
        self.rows = rows;

        Ok(())
    }

    /// Snapshot the current counts for shipping to a combiner.
    #[must_use]
    pub fn export_partial(&self) -> PartialState {
        PartialState::from_entries(
            self.identifier.fingerprint(),
            self.counts
                .iter()
                .map(|(signature, count)| (signature.clone(), *count)),
        )
        .with_arity(self.arity())
    }

    /// Add every count of `partial` into this table.
    ///
    /// All-or-nothing: the partial is fully validated and every resulting
    /// count is computed before the first write.
    pub fn merge_from(&mut self, partial: &PartialState) -> Result<MergeOutcome, AccumulatorError> {
        self.validate_partial(partial)?;

        let mut new_groups = 0usize;
        let mut added_rows = 0u64;
        for (signature, count) in partial.iter() {
            let overflow = || AccumulatorError::CountOverflow {
                signature: signature.to_string(),
            };

            match self.counts.get(signature) {
                Some(existing) => {
                    existing.checked_add(count).ok_or_else(overflow)?;
                }
                None => new_groups += 1,
            }
            added_rows = added_rows.checked_add(count).ok_or_else(overflow)?;
        }

        let rows = self
            .rows
            .checked_add(added_rows)
            .ok_or_else(|| AccumulatorError::CountOverflow {
                signature: "<rows>".to_string(),
            })?;
        check_group_capacity(self.limits, self.counts.len(), new_groups)?;

        for (signature, count) in partial.iter() {
            *self.counts.entry(signature.clone()).or_insert(0) += count;
        }
        self.rows = rows;
        if self.arity().is_none() {
            self.inferred_arity = partial.arity();
        }

        Ok(MergeOutcome {
            entries: partial.len(),
            new_groups,
        })
    }

    /// Smallest stored count, or `None` when no group was seen.
    #[must_use]
    pub fn minimum(&self) -> Option<u64> {
        self.counts.values().copied().min()
    }

    /// One record carrying the minimum count. Which record wins a tie is
    /// unspecified.
    #[must_use]
    pub fn minimum_record(&self) -> Option<FrequencyRecord> {
        self.counts
            .iter()
            .min_by_key(|(_, count)| **count)
            .map(|(signature, count)| FrequencyRecord::new(signature.clone(), *count))
    }

    /// All records, ordered by signature.
    #[must_use]
    pub fn records(&self) -> Vec<FrequencyRecord> {
        let mut records = self
            .counts
            .iter()
            .map(|(signature, count)| FrequencyRecord::new(signature.clone(), *count))
            .collect::<Vec<_>>();
        records.sort_by(|left, right| left.identifier.cmp(&right.identifier));

        records
    }

    fn validate_partial(&self, partial: &PartialState) -> Result<(), AccumulatorError> {
        if partial.version() != PARTIAL_STATE_VERSION {
            return Err(AccumulatorError::unsupported_partial(format!(
                "version {} (expected {PARTIAL_STATE_VERSION})",
                partial.version()
            )));
        }

        let fingerprint = self.identifier.fingerprint();
        if partial.identifier() != fingerprint {
            return Err(AccumulatorError::unsupported_partial(format!(
                "identifier '{}' (expected '{fingerprint}')",
                partial.identifier()
            )));
        }

        if let (Some(expected), Some(found)) = (self.arity(), partial.arity())
            && expected != found
        {
            return Err(AccumulatorError::ArityMismatch { expected, found });
        }

        let strategy = self.identifier.strategy_name();

        for (signature, count) in partial.iter() {
            if count == 0 {
                return Err(AccumulatorError::unsupported_partial(format!(
                    "zero count for signature {signature}"
                )));
            }
            if !self.identifier.accepts(signature.as_str()) {
                return Err(AccumulatorError::unsupported_partial(format!(
                    "malformed signature '{signature}' for strategy '{strategy}'"
                )));
            }
        }

        Ok(())
    }
}

fn check_group_capacity(
    limits: GroupLimits,
    current: usize,
    additional: usize,
) -> Result<(), AccumulatorError> {
    let attempted = u64::try_from(current)
        .unwrap_or(u64::MAX)
        .saturating_add(u64::try_from(additional).unwrap_or(u64::MAX));
    if additional > 0 && attempted > limits.max_groups() {
        return Err(AccumulatorError::GroupLimitExceeded {
            attempted,
            limit: limits.max_groups(),
        });
    }

    Ok(())
}
