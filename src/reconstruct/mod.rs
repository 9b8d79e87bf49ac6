pub mod engine;

pub use engine::{MajorityOutcome, ReconstructionEngine, SharePoint};

use thiserror::Error;

use crate::field::NonInvertibleError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// Two shares with the same abscissa; the Lagrange denominator would be 0.
    #[error("duplicate abscissa {x} in share set")]
    DegenerateShareSet { x: u64 },
    #[error("have {have} shares, need at least {need}")]
    InsufficientShares { have: usize, need: usize },
    /// Every combination was degenerate; no candidate secret exists.
    #[error("no combination produced a candidate secret")]
    NoViableCombination,
    #[error(transparent)]
    NonInvertible(#[from] NonInvertibleError),
}
