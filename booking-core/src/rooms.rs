//! Room registry
//!
//! Rooms live in an arena indexed by their sequential id. Removal is a
//! flag, never a deallocation, so ids stay stable and a removed room
//! remains addressable while permanently rejecting mutations.
//!
//! Every room-scoped call runs the same guard chain in a fixed order:
//! existence → removed → ownership. Error outcomes are therefore
//! deterministic even when several conditions would fail at once.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{Address, Amount, Room, RoomId};

/// Arena of room records with sequential identities
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room owned by `owner`, returning its id
    ///
    /// Ids start at 0 and increment; they are never reused.
    pub fn create(&mut self, owner: Address, price: Amount) -> Result<RoomId> {
        if price == 0 {
            return Err(Error::PriceCantBeZero);
        }
        let id = self.rooms.len() as RoomId;
        self.rooms.push(Room {
            id,
            owner: owner.clone(),
            price,
            removed: false,
        });
        info!(room_id = id, owner = %owner, price, "room created");
        Ok(id)
    }

    /// Existence guard: room by id, regardless of removal
    pub fn get(&self, id: RoomId) -> Result<&Room> {
        self.rooms
            .get(id as usize)
            .ok_or(Error::RoomNotCreated)
    }

    /// Existence → removed guard chain
    pub fn get_active(&self, id: RoomId) -> Result<&Room> {
        let room = self.get(id)?;
        if room.removed {
            return Err(Error::RoomRemoved);
        }
        Ok(room)
    }

    /// Existence → removed → ownership guard chain
    pub fn get_owned(&self, id: RoomId, caller: &Address) -> Result<&Room> {
        let room = self.get_active(id)?;
        if &room.owner != caller {
            return Err(Error::NotOwner);
        }
        Ok(room)
    }

    /// Change the price of a room owned by `caller`
    ///
    /// No positivity check here, matching the asymmetry with
    /// [`RoomRegistry::create`] in the original contract.
    pub fn change_price(&mut self, id: RoomId, caller: &Address, new_price: Amount) -> Result<()> {
        self.get_owned(id, caller)?;
        let room = &mut self.rooms[id as usize];
        room.price = new_price;
        info!(room_id = id, new_price, "price changed");
        Ok(())
    }

    /// Set the removed latch on a room owned by `caller`
    ///
    /// The removed guard makes a second removal fail, so the latch is
    /// set exactly once.
    pub fn remove(&mut self, id: RoomId, caller: &Address) -> Result<()> {
        self.get_owned(id, caller)?;
        self.rooms[id as usize].removed = true;
        info!(room_id = id, "room removed");
        Ok(())
    }

    /// Number of rooms ever created (including removed)
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True when no room was ever created
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        Address::new("owner")
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut registry = RoomRegistry::new();
        assert_eq!(registry.create(owner(), 100).unwrap(), 0);
        assert_eq!(registry.create(owner(), 200).unwrap(), 1);
        assert_eq!(registry.create(Address::new("other"), 300).unwrap(), 2);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_create_rejects_zero_price() {
        let mut registry = RoomRegistry::new();
        assert_eq!(registry.create(owner(), 0), Err(Error::PriceCantBeZero));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unassigned_id_fails_existence_guard() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.get(7).err(), Some(Error::RoomNotCreated));
    }

    #[test]
    fn test_change_price_guards() {
        let mut registry = RoomRegistry::new();
        registry.create(owner(), 100).unwrap();

        assert_eq!(
            registry.change_price(1, &owner(), 50),
            Err(Error::RoomNotCreated)
        );
        assert_eq!(
            registry.change_price(0, &Address::new("mallory"), 50),
            Err(Error::NotOwner)
        );
        registry.change_price(0, &owner(), 50).unwrap();
        assert_eq!(registry.get(0).unwrap().price, 50);
    }

    #[test]
    fn test_change_price_allows_zero() {
        // Known asymmetry with create(); preserved deliberately
        let mut registry = RoomRegistry::new();
        registry.create(owner(), 100).unwrap();
        registry.change_price(0, &owner(), 0).unwrap();
        assert_eq!(registry.get(0).unwrap().price, 0);
    }

    #[test]
    fn test_removal_is_an_absorbing_state() {
        let mut registry = RoomRegistry::new();
        registry.create(owner(), 100).unwrap();
        registry.remove(0, &owner()).unwrap();

        assert_eq!(registry.remove(0, &owner()), Err(Error::RoomRemoved));
        assert_eq!(
            registry.change_price(0, &owner(), 50),
            Err(Error::RoomRemoved)
        );
        // Still addressable through the raw existence guard
        assert!(registry.get(0).unwrap().removed);
    }

    #[test]
    fn test_removed_guard_wins_over_ownership() {
        let mut registry = RoomRegistry::new();
        registry.create(owner(), 100).unwrap();
        registry.remove(0, &owner()).unwrap();

        // Wrong caller on a removed room: removed is reported first
        assert_eq!(
            registry.remove(0, &Address::new("mallory")),
            Err(Error::RoomRemoved)
        );
    }
}
