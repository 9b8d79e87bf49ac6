//! Threshold secret reconstruction over a proof-of-work-sealed share ledger.
//!
//! Nodes contribute points of a secret-sharing polynomial; each point is
//! recorded as a mined block in a hash-chained ledger. The reconstruction
//! engine recombines subsets of the recorded points via Lagrange
//! interpolation over a prime field and majority-votes across all subset
//! combinations to tolerate a minority of corrupted shares.

pub mod field;
pub mod ledger;
pub mod reconstruct;
