//! Result records — the JSON artifact a third party re-verifies against.
//!
//! A record embeds the complete event input (title, original timestamp,
//! packets with their rosters) plus the derived seed, the draw execution
//! time, and one winner per packet. That makes every record self-contained:
//! verification needs no second file.

use crate::draw::DrawOutcome;
use crate::model::{Event, Packet, Participant};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from event and record file handling.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One packet in the result record: the original packet data plus winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketResult {
    pub title: String,
    pub participants: Vec<Participant>,
    pub winner: String,
}

/// The complete, publishable outcome of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub title: String,
    /// Original input timestamp, echoed verbatim.
    pub timestamp: String,
    /// When the draw was executed. Informational only — it never feeds
    /// the seed.
    pub drawing_timestamp: String,
    /// Hex SHA3-512 seed digest.
    pub rng_seed: String,
    /// Packets in draw (title-sorted) order.
    pub packets: Vec<PacketResult>,
}

impl ResultRecord {
    /// Assemble the record from a finished draw.
    pub fn assemble(event: &Event, outcome: &DrawOutcome, drawing_timestamp: String) -> Self {
        let packets = outcome
            .packets
            .iter()
            .zip(&outcome.results)
            .map(|(packet, result)| PacketResult {
                title: packet.title.clone(),
                participants: packet.participants.clone(),
                winner: result.winner.clone(),
            })
            .collect();

        Self {
            title: event.title.clone(),
            timestamp: event.timestamp.clone(),
            drawing_timestamp,
            rng_seed: outcome.seed.clone(),
            packets,
        }
    }

    /// Reconstruct the event input embedded in this record.
    pub fn event(&self) -> Event {
        Event {
            title: self.title.clone(),
            timestamp: self.timestamp.clone(),
            packets: self
                .packets
                .iter()
                .map(|p| Packet {
                    title: p.title.clone(),
                    participants: p.participants.clone(),
                })
                .collect(),
        }
    }
}

/// Load an event document from a JSON file.
pub fn load_event(path: &Path) -> Result<Event, RecordError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load a result record from a JSON file.
pub fn load_record(path: &Path) -> Result<ResultRecord, RecordError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Save a result record as pretty-printed JSON.
///
/// The record is serialized in full before the file is created, so an
/// encoding failure never leaves a partial file behind.
pub fn save_record(record: &ResultRecord, path: &Path) -> Result<(), RecordError> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;
    Ok(())
}
