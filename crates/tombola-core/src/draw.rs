//! Packet drawing — one uniform choice per packet from a shared generator.
//!
//! A [`Drawing`] is the single context object for one event: the
//! title-sorted packets, the derived seed, and the one generator instance
//! every packet draws from. The generator is never re-seeded between
//! packets, so packet order is part of the contract — reordering packets
//! changes every later winner even with an identical seed.

use crate::model::{Event, Packet};
use crate::seed::{derive_seed, parse_timestamp, SeedError};
use chrono::{DateTime, FixedOffset};
use log::debug;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that abort a drawing.
///
/// There is no partial-success mode: a partially drawn event would be
/// unverifiable, so every error here aborts before any result is produced.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// A packet with zero total tickets has no well-defined winner.
    #[error("packet {title:?} has no tickets in its pool")]
    EmptyPacket { title: String },
}

/// Outcome of one packet's draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    pub title: String,
    pub winner: String,
    /// Ticket count per distinct name in the pool, sorted by name.
    pub tally: Vec<(String, u32)>,
}

/// Everything produced by a finished drawing, in draw order.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    /// Hex SHA3-512 seed digest.
    pub seed: String,
    /// Parsed event timestamp (offset preserved from the input).
    pub timestamp: DateTime<FixedOffset>,
    /// Packets in title-sorted draw order.
    pub packets: Vec<Packet>,
    /// One result per packet, same order as `packets`.
    pub results: Vec<DrawResult>,
}

impl DrawOutcome {
    /// UTC epoch seconds the seed was derived from.
    pub fn epoch(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

/// Drawing context for one event.
pub struct Drawing {
    seed: String,
    timestamp: DateTime<FixedOffset>,
    packets: Vec<Packet>,
    rng: ChaCha20Rng,
}

impl Drawing {
    /// Build the drawing context: parse the timestamp, derive the seed,
    /// and sort the packets into draw order (ascending by title, raw
    /// code-point order).
    pub fn new(event: &Event) -> Result<Self, DrawError> {
        let timestamp = parse_timestamp(&event.timestamp)?;
        let (seed, rng) = derive_seed(&timestamp, &event.distinct_names());

        let mut packets = event.packets.clone();
        packets.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(Self {
            seed,
            timestamp,
            packets,
            rng,
        })
    }

    /// The publishable seed digest for this event.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Draw one winner per packet, consuming the context.
    ///
    /// Every pool is validated before the first draw, so an empty packet
    /// aborts the whole event with nothing drawn. Each packet then makes
    /// exactly one uniform choice from its sorted pool; the choice is
    /// rejection-sampled, giving every pool entry probability `1/N` with
    /// no modulo bias.
    pub fn run(mut self) -> Result<DrawOutcome, DrawError> {
        if let Some(empty) = self.packets.iter().find(|p| p.total_tickets() == 0) {
            return Err(DrawError::EmptyPacket {
                title: empty.title.clone(),
            });
        }

        let mut results = Vec::with_capacity(self.packets.len());
        for packet in &self.packets {
            let pool = packet.pool();
            let winner = pool
                .choose(&mut self.rng)
                .ok_or_else(|| DrawError::EmptyPacket {
                    title: packet.title.clone(),
                })?;
            debug!("packet {:?}: pool of {} → {}", packet.title, pool.len(), winner);

            results.push(DrawResult {
                title: packet.title.clone(),
                winner: (*winner).to_string(),
                tally: packet.tally(),
            });
        }

        Ok(DrawOutcome {
            seed: self.seed,
            timestamp: self.timestamp,
            packets: self.packets,
            results,
        })
    }
}
