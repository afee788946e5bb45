//! Independent re-verification of a published result record.
//!
//! Records embed their full event input, so any third party can re-derive
//! the seed, re-run the draw, and confirm the published winners — the whole
//! point of seeding from public inputs. A mismatch means the record's
//! inputs or winners were altered after the draw.

use crate::draw::{DrawError, Drawing};
use crate::record::ResultRecord;
use log::info;

/// A packet whose recorded winner does not reproduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub title: String,
    pub recorded: String,
    pub recomputed: String,
}

/// Outcome of re-running a recorded draw.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub seed_recorded: String,
    pub seed_recomputed: String,
    pub packets_checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    /// True when the seed and every winner reproduce exactly.
    pub fn is_clean(&self) -> bool {
        self.seed_recorded == self.seed_recomputed && self.mismatches.is_empty()
    }
}

/// Re-derive the seed and re-run the draw from the event data embedded in
/// `record`, comparing against the recorded seed and winners.
pub fn verify_record(record: &ResultRecord) -> Result<VerifyReport, DrawError> {
    let event = record.event();
    let outcome = Drawing::new(&event)?.run()?;

    // The event is rebuilt from the record's own packet list and the draw
    // sorts stably, so recorded packets and recomputed results pair up by
    // position — titles need not be unique.
    let mut mismatches = Vec::new();
    for (recorded, result) in record.packets.iter().zip(&outcome.results) {
        if recorded.winner != result.winner {
            mismatches.push(Mismatch {
                title: result.title.clone(),
                recorded: recorded.winner.clone(),
                recomputed: result.winner.clone(),
            });
        }
    }

    info!(
        "verified {} packets, {} mismatches",
        outcome.results.len(),
        mismatches.len()
    );

    Ok(VerifyReport {
        seed_recorded: record.rng_seed.clone(),
        seed_recomputed: outcome.seed,
        packets_checked: outcome.results.len(),
        mismatches,
    })
}
