use std::fmt;

///
/// PhaseOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PhaseOp {
    Reset,
    Observe,
    Export,
    Merge,
    Finalize,
}

impl PhaseOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Observe => "observe",
            Self::Export => "export",
            Self::Merge => "merge",
            Self::Finalize => "finalize",
        }
    }
}

impl fmt::Display for PhaseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// AggregatePhase
///
/// Forward-only lifecycle of one driver. `Reset` returns to `Init` from any
/// phase except `Finalized`; nothing leaves `Finalized`.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AggregatePhase {
    #[default]
    Init,
    Accumulating,
    PartialExported,
    Merged,
    Finalized,
}

impl AggregatePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Accumulating => "accumulating",
            Self::PartialExported => "partial_exported",
            Self::Merged => "merged",
            Self::Finalized => "finalized",
        }
    }

    /// Phase reached by applying `op`, or `None` if `op` is not allowed here.
    #[must_use]
    pub const fn after(self, op: PhaseOp) -> Option<Self> {
        match (self, op) {
            (Self::Finalized, _) => None,
            (_, PhaseOp::Reset) => Some(Self::Init),
            (Self::Init | Self::Accumulating, PhaseOp::Observe) => Some(Self::Accumulating),
            (Self::Init | Self::Accumulating | Self::Merged, PhaseOp::Export) => {
                Some(Self::PartialExported)
            }
            (Self::Init | Self::Merged, PhaseOp::Merge) => Some(Self::Merged),
            (Self::Init | Self::Accumulating | Self::Merged, PhaseOp::Finalize) => {
                Some(Self::Finalized)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AggregatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
