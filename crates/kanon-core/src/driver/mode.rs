use crate::driver::PhaseOp;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// AggregateMode
///
/// Role of one driver instance in a two-level aggregation, chosen once at
/// construction.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMode {
    /// Counts raw rows of one partition and ships a partial.
    PartitionLocal,

    /// Absorbs partials; may re-export (cascading combine) or finalize.
    Merge,

    /// Counts raw rows and finalizes without any partial handoff.
    SingleNode,
}

impl AggregateMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PartitionLocal => "partition_local",
            Self::Merge => "merge",
            Self::SingleNode => "single_node",
        }
    }

    /// Whether this mode may perform `op` at all, independent of phase.
    #[must_use]
    pub const fn permits(self, op: PhaseOp) -> bool {
        match op {
            PhaseOp::Reset => true,
            PhaseOp::Observe => matches!(self, Self::PartitionLocal | Self::SingleNode),
            PhaseOp::Export => matches!(self, Self::PartitionLocal | Self::Merge),
            PhaseOp::Merge => matches!(self, Self::Merge),
            PhaseOp::Finalize => matches!(self, Self::Merge | Self::SingleNode),
        }
    }
}

impl fmt::Display for AggregateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
