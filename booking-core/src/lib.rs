//! BnBooking Core
//!
//! Settlement core for a peer-to-peer room-booking marketplace:
//! room lifecycle, per-date availability, the direct and
//! intent-propose/accept/reject booking protocols, fee splitting, and
//! pull-payment withdrawal.
//!
//! # Architecture
//!
//! - **Single Writer**: the host serializes all state-mutating calls;
//!   each call runs to completion or is rejected with zero effect
//! - **Pull Payments**: settlements credit balances, beneficiaries
//!   withdraw themselves, so one party's receive behavior cannot block
//!   another's booking
//! - **Integer Arithmetic**: u128 native-value units, 10^18 fixed-point
//!   fee rates, no rounding loss on splits
//!
//! # Invariants
//!
//! - No double-booking: a Booked slot rejects every later booking
//! - A slot is never simultaneously Booked and holding pending intents
//! - No fund loss: custody == Σ(balances) + escrowed intents + forfeits
//! - No unauthorized mutation: fixed guard chain existence → removed →
//!   ownership on every room-scoped call

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod fees;
pub mod metrics;
pub mod payments;
pub mod rooms;
pub mod transfer;
pub mod types;

// Re-exports
pub use calendar::{days_in_month, is_leap_year, is_valid_date, Date};
pub use config::Config;
pub use engine::BookingEngine;
pub use error::{Error, Result};
pub use events::Event;
pub use fees::{split, FeeSplit};
pub use metrics::Metrics;
pub use payments::PaymentLedger;
pub use rooms::RoomRegistry;
pub use transfer::{MemoryTransfer, ValueTransfer};
pub use types::{
    Address, Amount, BookingIntent, FeeRate, Room, RoomId, SlotKey, SlotState, FEE_RATE_SCALE,
    MAX_INTENTS,
};
