use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

use share_ledger::field::PrimeField;
use share_ledger::ledger::{DEFAULT_DIFFICULTY, Ledger};
use share_ledger::reconstruct::{ReconstructionEngine, SharePoint};

const DEFAULT_MODULUS: u64 = 1_000_000_007;
const DEFAULT_COMBO_SIZE: usize = 3;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    let _ = dotenv();
    env_logger::init();

    let difficulty: u32 = env_or("DIFFICULTY", DEFAULT_DIFFICULTY);
    let modulus: u64 = env_or("MODULUS", DEFAULT_MODULUS);
    let combo_size: usize = env_or("COMBO_SIZE", DEFAULT_COMBO_SIZE);

    println!("⛓️ Building share ledger (difficulty {difficulty}, modulus {modulus})");

    let mut ledger = Ledger::new(difficulty);
    for (author, x, y) in [
        ("Node-A", 1u64, 25u64),
        ("Node-B", 2, 24),
        ("Node-C", 3, 12),
        ("Node-D", 4, 20),
        ("Node-E", 5, 100),
    ] {
        ledger.append(author, x, y);
    }

    let chain_json = serde_json::to_string_pretty(ledger.blocks()).expect("serialize chain");
    println!("{chain_json}");

    let shares: Vec<SharePoint> = ledger
        .valid_shares()
        .filter_map(|block| block.share())
        .map(SharePoint::from)
        .collect();

    let engine = ReconstructionEngine::new(PrimeField::new(modulus));
    match engine.reconstruct_with_majority(&shares, combo_size) {
        Ok(outcome) => {
            for (candidate, count) in &outcome.tally {
                println!("  candidate {candidate}: {count} combination(s)");
            }
            println!("🔐 Final reconstructed secret: {}", outcome.secret);
        }
        Err(err) => {
            eprintln!("reconstruction failed: {err}");
            std::process::exit(1);
        }
    }
}
