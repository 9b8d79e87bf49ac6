use serde::Serialize;

use super::ReconstructError;
use crate::field::PrimeField;

/// One `(x, y)` point of the secret-sharing polynomial, detached from the
/// block that recorded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharePoint {
    pub x: u64,
    pub y: u64,
}

impl From<(u64, u64)> for SharePoint {
    fn from((x, y): (u64, u64)) -> Self {
        Self { x, y }
    }
}

/// Result of a majority reconstruction: the winning secret plus the full
/// candidate frequency tally, in first-seen order, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorityOutcome {
    pub secret: u64,
    pub tally: Vec<(u64, usize)>,
}

/// Recombines recorded share points into the original secret via Lagrange
/// interpolation, cross-validating across subset combinations by majority
/// vote to tolerate a minority of corrupted shares.
#[derive(Debug, Clone, Copy)]
pub struct ReconstructionEngine {
    field: PrimeField,
}

impl ReconstructionEngine {
    pub fn new(field: PrimeField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> PrimeField {
        self.field
    }

    /// Evaluate, at `x = 0`, the unique degree-`(k-1)` polynomial through the
    /// `k` given points:
    ///
    ///   secret = Σ_j y_j · Π_{m≠j} (−x_m) / (x_j − x_m)
    ///
    /// Accumulation follows input order. Fails with `DegenerateShareSet` if
    /// two abscissae coincide modulo the field (the denominator would be 0).
    pub fn interpolate_at_zero(&self, shares: &[SharePoint]) -> Result<u64, ReconstructError> {
        let f = self.field;
        let xs: Vec<u64> = shares.iter().map(|s| s.x % f.modulus()).collect();
        for i in 0..xs.len() {
            for j in (i + 1)..xs.len() {
                if xs[i] == xs[j] {
                    return Err(ReconstructError::DegenerateShareSet { x: xs[i] });
                }
            }
        }

        let mut secret = 0u64;
        for (j, share) in shares.iter().enumerate() {
            let mut num = 1u64;
            let mut den = 1u64;
            for m in 0..shares.len() {
                if m == j {
                    continue;
                }
                num = f.mul(num, f.neg(xs[m]));
                den = f.mul(den, f.sub(xs[j], xs[m]));
            }
            let basis = f.mul(num, f.inv(den)?);
            secret = f.add(secret, f.mul(share.y, basis));
        }
        Ok(secret)
    }

    /// Reconstruct a candidate secret from every `combo_size`-element
    /// combination of `shares` (lexicographic enumeration) and return the
    /// candidate that first reaches the highest frequency.
    ///
    /// Degenerate combinations (duplicate abscissa) are skipped so they
    /// cannot distort the tally; a non-invertible denominator aborts the
    /// whole call, since with a prime modulus it means the field is
    /// misconfigured.
    pub fn reconstruct_with_majority(
        &self,
        shares: &[SharePoint],
        combo_size: usize,
    ) -> Result<MajorityOutcome, ReconstructError> {
        if shares.len() < combo_size {
            return Err(ReconstructError::InsufficientShares {
                have: shares.len(),
                need: combo_size,
            });
        }

        let mut tally: Vec<(u64, usize)> = Vec::new();
        let mut leader = None;
        let mut best = 0usize;
        let mut points = Vec::with_capacity(combo_size);

        for combo in Combinations::new(shares.len(), combo_size) {
            points.clear();
            points.extend(combo.iter().map(|&i| shares[i]));

            let candidate = match self.interpolate_at_zero(&points) {
                Ok(secret) => secret,
                Err(ReconstructError::DegenerateShareSet { .. }) => continue,
                Err(err) => return Err(err),
            };

            let count = match tally.iter_mut().find(|(c, _)| *c == candidate) {
                Some((_, count)) => {
                    *count += 1;
                    *count
                }
                None => {
                    tally.push((candidate, 1));
                    1
                }
            };
            // First candidate to reach a new maximum wins; ties never
            // displace the current leader.
            if count > best {
                best = count;
                leader = Some(candidate);
            }
        }

        match leader {
            Some(secret) => Ok(MajorityOutcome { secret, tally }),
            None => Err(ReconstructError::NoViableCombination),
        }
    }
}

/// Lexicographic enumeration of all `k`-element index combinations of `0..n`.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Rightmost index that can still advance.
        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{Combinations, MajorityOutcome, ReconstructionEngine, SharePoint};
    use crate::field::PrimeField;
    use crate::reconstruct::ReconstructError;

    const MODULUS: u64 = 1_000_000_007;

    fn engine() -> ReconstructionEngine {
        ReconstructionEngine::new(PrimeField::new(MODULUS))
    }

    fn points(pairs: &[(u64, u64)]) -> Vec<SharePoint> {
        pairs.iter().copied().map(SharePoint::from).collect()
    }

    #[test]
    fn combinations_enumerate_lexicographically() {
        let combos: Vec<_> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Combinations::new(2, 3).count(), 0);
    }

    #[test]
    fn interpolation_recovers_constant_term() {
        // f(x) = x^2 + x + 1, so f(0) = 1.
        let shares = points(&[(1, 3), (2, 5), (3, 9)]);
        assert_eq!(engine().interpolate_at_zero(&shares), Ok(1));
    }

    #[test]
    fn interpolation_rejects_duplicate_abscissa() {
        let shares = points(&[(1, 3), (1, 4)]);
        assert_eq!(
            engine().interpolate_at_zero(&shares),
            Err(ReconstructError::DegenerateShareSet { x: 1 })
        );
    }

    #[test]
    fn majority_requires_enough_shares() {
        let shares = points(&[(1, 3), (2, 5)]);
        assert_eq!(
            engine().reconstruct_with_majority(&shares, 3),
            Err(ReconstructError::InsufficientShares { have: 2, need: 3 })
        );
    }

    #[test]
    fn consistent_shares_agree_across_combinations() {
        // f(x) = 42 + 3x
        let shares = points(&[(1, 45), (2, 48), (3, 51)]);
        let outcome = engine().reconstruct_with_majority(&shares, 2).unwrap();
        assert_eq!(outcome.secret, 42);
        assert_eq!(outcome.tally, vec![(42, 3)]);
    }

    #[test]
    fn majority_survives_one_tampered_share() {
        // f(x) = 1234 + 5x + 7x^2 evaluated at x = 1..=6, with the last
        // share replaced by garbage. All C(5,3) = 10 clean combinations
        // agree on f(0); the 10 tampered ones scatter.
        let shares = points(&[
            (1, 1246),
            (2, 1272),
            (3, 1312),
            (4, 1366),
            (5, 1434),
            (6, 9999),
        ]);
        let outcome = engine().reconstruct_with_majority(&shares, 3).unwrap();
        assert_eq!(outcome.secret, 1234);
        assert!(outcome.tally.contains(&(1234, 10)));
    }

    #[test]
    fn degenerate_combinations_are_skipped() {
        // Pool contains two shares at x = 1; the combination pairing them is
        // dropped, the others still vote. 42 is seen first and wins the tie.
        let shares = points(&[(1, 45), (2, 48), (1, 99)]);
        let outcome = engine().reconstruct_with_majority(&shares, 2).unwrap();
        assert_eq!(outcome.secret, 42);
        assert_eq!(outcome.tally, vec![(42, 1), (150, 1)]);
    }

    #[test]
    fn all_degenerate_pool_has_no_candidate() {
        let shares = points(&[(1, 5), (1, 7)]);
        assert_eq!(
            engine().reconstruct_with_majority(&shares, 2),
            Err(ReconstructError::NoViableCombination)
        );
    }

    #[test]
    fn majority_is_deterministic() {
        let shares = points(&[(1, 25), (2, 24), (3, 12), (4, 20), (5, 100)]);
        let first = engine().reconstruct_with_majority(&shares, 3).unwrap();
        let second = engine().reconstruct_with_majority(&shares, 3).unwrap();
        assert_eq!(first, second);

        let MajorityOutcome { secret, tally } = first;
        let total: usize = tally.iter().map(|(_, count)| count).sum();
        assert_eq!(total, 10); // C(5, 3)
        assert!(tally.iter().any(|&(candidate, _)| candidate == secret));
    }
}
