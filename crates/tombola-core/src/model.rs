//! Event data model — packets, participants, and their ticket-weighted pools.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One participant in a packet's pool.
///
/// The ticket count is the participant's weight: the name appears `tickets`
/// times in the packet's pool, so a participant with `k` tickets wins with
/// probability `k / pool size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub tickets: u32,
}

/// A single prize with its own pool of eligible ticket holders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub title: String,
    pub participants: Vec<Participant>,
}

impl Packet {
    /// Flatten the participants into the ticket-weighted pool, one entry
    /// per ticket, sorted by raw code-point order.
    pub fn pool(&self) -> Vec<&str> {
        let mut pool = Vec::new();
        for participant in &self.participants {
            for _ in 0..participant.tickets {
                pool.push(participant.name.as_str());
            }
        }
        pool.sort_unstable();
        pool
    }

    /// Ticket count per distinct name in this packet's pool, sorted by name.
    pub fn tally(&self) -> Vec<(String, u32)> {
        tally(&self.participants)
    }

    /// Total tickets across all participants (the pool size).
    pub fn total_tickets(&self) -> u64 {
        self.participants
            .iter()
            .map(|p| u64::from(p.tickets))
            .sum()
    }
}

/// Merge a participant list into per-name ticket counts, sorted by name.
pub fn tally(participants: &[Participant]) -> Vec<(String, u32)> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for participant in participants {
        *counts.entry(participant.name.as_str()).or_insert(0) += participant.tickets;
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// A raffle event as loaded from the input document.
///
/// The timestamp stays the raw input string so the result record can echo
/// it verbatim; the seed deriver parses and validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub timestamp: String,
    pub packets: Vec<Packet>,
}

impl Event {
    /// Distinct participant names across all packets, in byte-wise sorted
    /// order.
    ///
    /// This set — not the ticket-weighted multiset — feeds the seed digest,
    /// so correcting a ticket count never changes the seed while changing
    /// *who* participates always does.
    pub fn distinct_names(&self) -> BTreeSet<&str> {
        self.packets
            .iter()
            .flat_map(|packet| packet.participants.iter())
            .map(|participant| participant.name.as_str())
            .collect()
    }
}
