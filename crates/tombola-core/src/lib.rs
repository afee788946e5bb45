//! Deterministic, independently verifiable raffle drawing.
//!
//! Winners for a set of prize packets are drawn from ticket-weighted pools
//! using a generator seeded by a SHA3-512 digest of public inputs: the event
//! timestamp and the distinct participant names. No party — including the
//! organizer — can steer the outcome once those inputs are fixed, and anyone
//! with the input file can re-run the draw and reproduce every winner.
//!
//! # Data flow
//!
//! ```text
//! event JSON → Event → Drawing::new   (parse timestamp, derive seed)
//!                           ↓
//!                      Drawing::run   (one uniform choice per packet,
//!                           ↓          title order, shared generator)
//!                      DrawOutcome → ResultRecord (JSON) + report (stdout)
//!                                         ↓
//!                                    verify_record (re-run + compare)
//! ```
//!
//! # Generator contract
//!
//! The generator choice is part of the output's meaning — substituting it
//! changes every winner for the same seed. This crate pins:
//!
//! - **Seed**: SHA3-512 over the UTC epoch second count (base-10 ASCII)
//!   followed by every distinct participant name in byte-wise sorted order,
//!   with no separators.
//! - **Generator**: [`rand_chacha::ChaCha20Rng`] seeded with the first
//!   32 bytes of the raw digest.
//! - **Uniform choice**: `rand` 0.8's rejection-sampled
//!   [`choose`](rand::seq::SliceRandom::choose) — exactly `1/N` per pool
//!   entry, no modulo bias.
//!
//! All string ordering (packet titles, pools, the distinct-name set) is raw
//! code-point order, never locale-aware collation.

pub mod draw;
pub mod model;
pub mod record;
pub mod report;
pub mod seed;
pub mod verify;

pub use draw::{DrawError, DrawOutcome, DrawResult, Drawing};
pub use model::{Event, Packet, Participant};
pub use record::{load_event, load_record, save_record, RecordError, ResultRecord};
pub use seed::{derive_seed, parse_timestamp, SeedError};
pub use verify::{verify_record, VerifyReport};
