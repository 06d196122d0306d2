//! Core types for the booking ledger
//!
//! All types are designed for:
//! - Exact arithmetic (u128 native-value units, never floats)
//! - Deterministic serialization (serde)
//! - Stable identities (sequential room ids, never reused)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::Date;

/// Native value amount, in the smallest unit (wei-scale)
pub type Amount = u128;

/// Fixed-point fee fraction; [`FEE_RATE_SCALE`] means 100%
pub type FeeRate = u128;

/// Fixed-point scale for fee rates (10^18 == 100%)
pub const FEE_RATE_SCALE: FeeRate = 1_000_000_000_000_000_000;

/// Maximum simultaneous pending intents per slot
pub const MAX_INTENTS: usize = 5;

/// Sequential room identity, assigned on creation and never reused
pub type RoomId = u64;

/// Caller/beneficiary identity
///
/// Callers are assumed to be already-authenticated addresses; the core
/// treats them as opaque, comparable identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create new address
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Room record
///
/// Rooms are never physically deleted; `removed` is a one-way latch
/// that permanently rejects all further booking operations while the
/// record stays addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Sequential identity
    pub id: RoomId,

    /// Current owner
    pub owner: Address,

    /// Current price per date (strictly positive at creation)
    pub price: Amount,

    /// One-way removal latch
    pub removed: bool,
}

/// A booker's escrowed, unconfirmed booking proposal
///
/// The price is captured at intent-creation time, insulating the
/// booker from later price changes: accept and reject both settle at
/// the captured price, never at the room's current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingIntent {
    /// Proposing booker
    pub booker: Address,

    /// Room price captured when the intent was created
    pub price: Amount,
}

/// One calendar-day booking unit for one room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Room this slot belongs to
    pub room_id: RoomId,

    /// Calendar date
    pub date: Date,
}

impl SlotKey {
    /// Create new slot key
    pub fn new(room_id: RoomId, date: Date) -> Self {
        Self { room_id, date }
    }
}

/// State of a single slot
///
/// A slot with no record is Free. A slot is Booked XOR holds pending
/// intents; the engine enforces that the two never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// Terminal for booking purposes: re-booking is rejected
    Booked,

    /// Ordered pending intents, at most [`MAX_INTENTS`], at most one
    /// per booker
    Pending(Vec<BookingIntent>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_roundtrip() {
        let addr = Address::new("0xabc123");
        assert_eq!(addr.as_str(), "0xabc123");
        assert_eq!(addr.to_string(), "0xabc123");
    }

    #[test]
    fn test_fee_rate_scale_is_one_quintillion() {
        assert_eq!(FEE_RATE_SCALE, 10u128.pow(18));
    }

    #[test]
    fn test_slot_key_equality_is_per_date() {
        let d1 = Date::new(1, 1, 2020);
        let d2 = Date::new(2, 1, 2020);
        assert_ne!(SlotKey::new(0, d1), SlotKey::new(0, d2));
        assert_ne!(SlotKey::new(0, d1), SlotKey::new(1, d1));
        assert_eq!(SlotKey::new(0, d1), SlotKey::new(0, d1));
    }
}
