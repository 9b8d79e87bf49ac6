use share_ledger::field::PrimeField;
use share_ledger::ledger::Ledger;
use share_ledger::reconstruct::{ReconstructionEngine, SharePoint};

const MODULUS: u64 = 1_000_000_007;

#[test]
fn ledger_shares_reconstruct_deterministically() {
    let mut ledger = Ledger::new(1);
    for (author, x, y) in [
        ("Node-A", 1u64, 25u64),
        ("Node-B", 2, 24),
        ("Node-C", 3, 12),
        ("Node-D", 4, 20),
        ("Node-E", 5, 100),
    ] {
        ledger.append(author, x, y);
    }
    assert!(ledger.is_valid_chain());

    let shares: Vec<SharePoint> = ledger
        .valid_shares()
        .filter_map(|block| block.share())
        .map(SharePoint::from)
        .collect();
    assert_eq!(shares.len(), 5);

    let engine = ReconstructionEngine::new(PrimeField::new(MODULUS));
    let first = engine.reconstruct_with_majority(&shares, 3).unwrap();
    let second = engine.reconstruct_with_majority(&shares, 3).unwrap();
    assert_eq!(first, second);

    // The winner must be the reconstruction of at least one concrete
    // 3-share combination.
    let total: usize = first.tally.iter().map(|(_, count)| count).sum();
    assert_eq!(total, 10); // C(5, 3)
    assert!(first.tally.iter().any(|&(candidate, _)| candidate == first.secret));
}
