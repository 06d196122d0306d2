//! Emitted facts
//!
//! Pure side-channel for external consumers (indexers, clients). The
//! core appends to an in-order log and never reads it back; embedders
//! drain it after each call.

use serde::{Deserialize, Serialize};

use crate::calendar::Date;
use crate::types::{Address, Amount, RoomId};

/// Observable fact emitted by a successful operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A room was created
    RoomCreated {
        /// Assigned room id
        room_id: RoomId,
        /// Initial price
        price: Amount,
        /// Creating owner
        owner: Address,
    },

    /// A room's price was changed by its owner
    PriceChanged {
        /// Room id
        room_id: RoomId,
        /// Owner performing the change
        owner: Address,
        /// Price now in effect
        new_price: Amount,
    },

    /// A room's removed latch was set
    RoomRemoved {
        /// Owner performing the removal
        owner: Address,
        /// Room id
        room_id: RoomId,
    },

    /// A slot was booked, directly or by accepting an intent
    RoomBooked {
        /// Room id
        room_id: RoomId,
        /// Booked date
        date: Date,
        /// Paying booker
        booker: Address,
        /// Room owner at settlement time
        owner: Address,
        /// Settled price (the captured price for accepted intents)
        price: Amount,
    },

    /// A booking intent was escrowed
    BookIntentCreated {
        /// Room id
        room_id: RoomId,
        /// Proposed date
        date: Date,
        /// Proposing booker
        booker: Address,
        /// Room owner
        owner: Address,
        /// Captured price
        price: Amount,
    },

    /// A booking intent was rejected and refunded
    BookIntentRejected {
        /// Room id
        room_id: RoomId,
        /// Proposed date
        date: Date,
        /// Refunded booker
        booker: Address,
        /// Room owner
        owner: Address,
        /// Captured price refunded
        price: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_roundtrip() {
        let event = Event::RoomBooked {
            room_id: 0,
            date: Date::new(1, 1, 2020),
            booker: Address::new("booker"),
            owner: Address::new("owner"),
            price: 100,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
