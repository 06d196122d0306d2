//! Availability & booking state machine
//!
//! This module ties together the room registry, calendar validation,
//! fee computation, and the pull-payment ledger into the public
//! operation surface.
//!
//! Two protocols share the same per-slot state: direct booking settles
//! immediately, intent booking escrows the payment until the owner
//! accepts or rejects. Every operation runs all of its guards before
//! mutating anything, so a rejected call has zero observable effect.
//! The host serializes calls; no operation suspends mid-execution.
//!
//! # Example
//!
//! ```
//! use booking_core::{Address, BookingEngine, Config, Date};
//!
//! # fn main() -> booking_core::Result<()> {
//! let mut engine = BookingEngine::new(Config::default(), Address::new("admin"))?;
//!
//! let owner = Address::new("owner");
//! let booker = Address::new("booker");
//! let room = engine.create_room(&owner, 100)?;
//! engine.book(&booker, room, Date::new(1, 1, 2020), 100)?;
//! assert!(engine.booked(room, Date::new(1, 1, 2020)));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use tracing::{debug, info};

use crate::calendar::Date;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::Event;
use crate::fees::{self, FeeSplit};
use crate::metrics::Metrics;
use crate::payments::PaymentLedger;
use crate::rooms::RoomRegistry;
use crate::transfer::ValueTransfer;
use crate::types::{
    Address, Amount, BookingIntent, FeeRate, Room, RoomId, SlotKey, SlotState, FEE_RATE_SCALE,
    MAX_INTENTS,
};

/// The settlement core
///
/// Owns all shared mutable state: the room registry, the per-slot
/// booking state, and the payment ledger. Custody tracks every unit of
/// native value attached to calls minus every unit withdrawn.
pub struct BookingEngine {
    /// Room records
    registry: RoomRegistry,

    /// Per-slot booking state; absent key == Free
    slots: HashMap<SlotKey, SlotState>,

    /// Withdrawable balances
    payments: PaymentLedger,

    /// Identity allowed to mutate fee configuration
    config_owner: Address,

    /// Current fee rate
    fee_rate: FeeRate,

    /// Current fee receiver
    fee_receiver: Address,

    /// Total native value held by the core
    custody: Amount,

    /// Emitted facts, in order
    events: Vec<Event>,

    /// Operation counters
    metrics: Metrics,
}

impl BookingEngine {
    /// Create a new engine
    ///
    /// `config` carries the initial fee rate and fee receiver;
    /// `config_owner` is the only identity allowed to change them.
    pub fn new(config: Config, config_owner: Address) -> Result<Self> {
        if config.fee_rate > FEE_RATE_SCALE {
            return Err(Error::InvalidFeeRate);
        }
        let metrics = Metrics::new()
            .map_err(|e| Error::Config(format!("Failed to register metrics: {}", e)))?;

        Ok(Self {
            registry: RoomRegistry::new(),
            slots: HashMap::new(),
            payments: PaymentLedger::new(),
            config_owner,
            fee_rate: config.fee_rate,
            fee_receiver: config.fee_receiver,
            custody: 0,
            events: Vec::new(),
            metrics,
        })
    }

    // ---- Room lifecycle -------------------------------------------------

    /// Create a room owned by `caller` at the given per-date price
    pub fn create_room(&mut self, caller: &Address, price: Amount) -> Result<RoomId> {
        let room_id = self.registry.create(caller.clone(), price)?;
        self.metrics.rooms_created.inc();
        self.emit(Event::RoomCreated {
            room_id,
            price,
            owner: caller.clone(),
        });
        Ok(room_id)
    }

    /// Change the price of a room owned by `caller`
    pub fn change_price(&mut self, caller: &Address, room_id: RoomId, new_price: Amount) -> Result<()> {
        self.registry.change_price(room_id, caller, new_price)?;
        self.emit(Event::PriceChanged {
            room_id,
            owner: caller.clone(),
            new_price,
        });
        Ok(())
    }

    /// Set the removed latch on a room owned by `caller`
    ///
    /// Permanently blocks booking, price changes, accept and reject on
    /// the room. Already-settled payments are unaffected.
    pub fn remove_room(&mut self, caller: &Address, room_id: RoomId) -> Result<()> {
        self.registry.remove(room_id, caller)?;
        self.emit(Event::RoomRemoved {
            owner: caller.clone(),
            room_id,
        });
        Ok(())
    }

    // ---- Direct booking -------------------------------------------------

    /// Book a slot immediately, settling at the room's current price
    ///
    /// `value` is the attached payment and must reach the price; any
    /// excess is kept in custody and never refunded. The split and the
    /// credited shares are always computed from the price, not from
    /// `value`. Pending intents on the slot are refunded in full and
    /// become unresolvable.
    pub fn book(&mut self, caller: &Address, room_id: RoomId, date: Date, value: Amount) -> Result<()> {
        let room = self.registry.get_active(room_id)?;
        if !date.is_valid() {
            return Err(Error::InvalidDate);
        }
        let key = SlotKey::new(room_id, date);
        if matches!(self.slots.get(&key), Some(SlotState::Booked)) {
            return Err(Error::RoomNotAvailable);
        }
        if value < room.price {
            return Err(Error::PriceNotReached);
        }
        let (owner, price) = (room.owner.clone(), room.price);
        let split = fees::split(price, self.fee_rate);

        // All guards passed; mutations from here on cannot fail.
        self.custody += value;
        self.refund_pending(&key);
        self.slots.insert(key, SlotState::Booked);
        self.credit_split(&owner, split);
        self.metrics.direct_bookings.inc();
        self.sync_custody_gauge();
        info!(room_id, %date, booker = %caller, price, "slot booked");
        self.emit(Event::RoomBooked {
            room_id,
            date,
            booker: caller.clone(),
            owner,
            price,
        });
        Ok(())
    }

    // ---- Intent booking -------------------------------------------------

    /// Escrow a booking proposal on a slot
    ///
    /// Captures the room's current price into the intent; later price
    /// changes do not affect it. The attached `value` stays in custody,
    /// credited to no one, until the owner accepts or rejects.
    pub fn intent_book(
        &mut self,
        caller: &Address,
        room_id: RoomId,
        date: Date,
        value: Amount,
    ) -> Result<()> {
        let room = self.registry.get_active(room_id)?;
        if !date.is_valid() {
            return Err(Error::InvalidDate);
        }
        if &room.owner == caller {
            return Err(Error::CannotBookYourRoom);
        }
        let key = SlotKey::new(room_id, date);
        match self.slots.get(&key) {
            Some(SlotState::Booked) => return Err(Error::RoomNotAvailable),
            Some(SlotState::Pending(intents)) => {
                if intents.iter().any(|i| &i.booker == caller) {
                    return Err(Error::IntentAlreadyCreated);
                }
                if intents.len() >= MAX_INTENTS {
                    return Err(Error::MaxIntentsReached);
                }
            }
            None => {}
        }
        if value < room.price {
            return Err(Error::PriceNotReached);
        }
        let (owner, price) = (room.owner.clone(), room.price);

        self.custody += value;
        if let SlotState::Pending(intents) = self
            .slots
            .entry(key)
            .or_insert_with(|| SlotState::Pending(Vec::new()))
        {
            intents.push(BookingIntent {
                booker: caller.clone(),
                price,
            });
        }
        self.metrics.intents_created.inc();
        self.sync_custody_gauge();
        debug!(room_id, %date, booker = %caller, price, "intent escrowed");
        self.emit(Event::BookIntentCreated {
            room_id,
            date,
            booker: caller.clone(),
            owner,
            price,
        });
        Ok(())
    }

    /// Accept `booker`'s pending intent, settling at its captured price
    ///
    /// Transitions the slot to Booked, credits the owner and fee
    /// receiver with the split of the captured price, and refunds every
    /// sibling intent in full within the same call. Refunded siblings
    /// become `IntentNotFound` for later accept/reject.
    pub fn accept(
        &mut self,
        caller: &Address,
        room_id: RoomId,
        booker: &Address,
        date: Date,
    ) -> Result<()> {
        let room = self.registry.get_owned(room_id, caller)?;
        let owner = room.owner.clone();
        let key = SlotKey::new(room_id, date);
        let split = fees::split(self.intent_price(&key, booker)?, self.fee_rate);
        let intent = self.take_intent(&key, booker)?;

        self.refund_pending(&key);
        self.slots.insert(key, SlotState::Booked);
        self.credit_split(&owner, split);
        self.metrics.intents_accepted.inc();
        info!(room_id, %date, booker = %booker, price = intent.price, "intent accepted");
        self.emit(Event::RoomBooked {
            room_id,
            date,
            booker: booker.clone(),
            owner,
            price: intent.price,
        });
        Ok(())
    }

    /// Reject `booker`'s pending intent, refunding its captured price
    ///
    /// Sibling intents on the slot stay untouched and remain
    /// acceptable. No fee is taken from the refund.
    pub fn reject(
        &mut self,
        caller: &Address,
        room_id: RoomId,
        booker: &Address,
        date: Date,
    ) -> Result<()> {
        let room = self.registry.get_owned(room_id, caller)?;
        let owner = room.owner.clone();
        let key = SlotKey::new(room_id, date);
        let intent = self.take_intent(&key, booker)?;

        self.payments.credit(booker, intent.price);
        if matches!(self.slots.get(&key), Some(SlotState::Pending(v)) if v.is_empty()) {
            self.slots.remove(&key);
        }
        self.metrics.intents_rejected.inc();
        info!(room_id, %date, booker = %booker, price = intent.price, "intent rejected");
        self.emit(Event::BookIntentRejected {
            room_id,
            date,
            booker: booker.clone(),
            owner,
            price: intent.price,
        });
        Ok(())
    }

    // ---- Withdrawal -----------------------------------------------------

    /// Withdraw the caller's full accumulated balance through `sink`
    ///
    /// A zero balance succeeds and pays nothing. On transfer failure
    /// the balance is restored and the call has no effect. Returns the
    /// amount paid out.
    pub fn withdraw(&mut self, caller: &Address, sink: &mut dyn ValueTransfer) -> Result<Amount> {
        let paid = self.payments.withdraw(caller, sink)?;
        self.custody -= paid;
        if paid > 0 {
            self.metrics.withdrawals.inc();
        }
        self.sync_custody_gauge();
        Ok(paid)
    }

    // ---- Configuration --------------------------------------------------

    /// Set the fee rate; configuration owner only
    ///
    /// Rejects rates above [`FEE_RATE_SCALE`] (more than 100%).
    /// Applies to subsequent settlements; captured intents settle at
    /// their captured price under the rate in effect at accept time.
    pub fn set_fee_rate(&mut self, caller: &Address, fee_rate: FeeRate) -> Result<()> {
        self.require_config_owner(caller)?;
        if fee_rate > FEE_RATE_SCALE {
            return Err(Error::InvalidFeeRate);
        }
        self.fee_rate = fee_rate;
        info!(fee_rate, "fee rate changed");
        Ok(())
    }

    /// Set the fee receiver; configuration owner only
    pub fn set_fee_receiver(&mut self, caller: &Address, fee_receiver: Address) -> Result<()> {
        self.require_config_owner(caller)?;
        info!(fee_receiver = %fee_receiver, "fee receiver changed");
        self.fee_receiver = fee_receiver;
        Ok(())
    }

    // ---- Read views -----------------------------------------------------

    /// Room record by id
    pub fn room(&self, room_id: RoomId) -> Result<&Room> {
        self.registry.get(room_id)
    }

    /// Whether a slot is booked
    pub fn booked(&self, room_id: RoomId, date: Date) -> bool {
        matches!(
            self.slots.get(&SlotKey::new(room_id, date)),
            Some(SlotState::Booked)
        )
    }

    /// Withdrawable balance of an identity
    pub fn accumulated_payments(&self, who: &Address) -> Amount {
        self.payments.balance_of(who)
    }

    /// Current fee receiver
    pub fn fee_receiver(&self) -> &Address {
        &self.fee_receiver
    }

    /// Current fee rate
    pub fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Total native value held by the core
    pub fn custody(&self) -> Amount {
        self.custody
    }

    /// Emitted facts since the last drain, in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the event log
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Metrics collector (for scraping)
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    // ---- Internals ------------------------------------------------------

    fn require_config_owner(&self, caller: &Address) -> Result<()> {
        if caller != &self.config_owner {
            return Err(Error::NotConfigOwner);
        }
        Ok(())
    }

    /// Credit both halves of a split computed during the guard phase
    fn credit_split(&mut self, owner: &Address, split: FeeSplit) {
        self.payments.credit(owner, split.owner_share);
        let fee_receiver = self.fee_receiver.clone();
        self.payments.credit(&fee_receiver, split.platform_share);
    }

    /// Captured price of `booker`'s intent on a slot, without removing it
    fn intent_price(&self, key: &SlotKey, booker: &Address) -> Result<Amount> {
        match self.slots.get(key) {
            Some(SlotState::Pending(intents)) => intents
                .iter()
                .find(|i| &i.booker == booker)
                .map(|i| i.price)
                .ok_or(Error::IntentNotFound),
            _ => Err(Error::IntentNotFound),
        }
    }

    /// Remove and return `booker`'s intent on a slot
    fn take_intent(&mut self, key: &SlotKey, booker: &Address) -> Result<BookingIntent> {
        let intents = match self.slots.get_mut(key) {
            Some(SlotState::Pending(intents)) => intents,
            _ => return Err(Error::IntentNotFound),
        };
        let idx = intents
            .iter()
            .position(|i| &i.booker == booker)
            .ok_or(Error::IntentNotFound)?;
        Ok(intents.remove(idx))
    }

    /// Refund every pending intent on a slot at its captured price and
    /// clear the pending list
    ///
    /// Runs inside the same call that transitions the slot to Booked,
    /// keeping the Booked-XOR-pending invariant.
    fn refund_pending(&mut self, key: &SlotKey) {
        let intents = match self.slots.remove(key) {
            Some(SlotState::Pending(intents)) => intents,
            Some(state) => {
                self.slots.insert(*key, state);
                return;
            }
            None => return,
        };
        for intent in intents {
            debug!(booker = %intent.booker, price = intent.price, "refunding displaced intent");
            self.payments.credit(&intent.booker, intent.price);
        }
    }

    fn sync_custody_gauge(&self) {
        self.metrics
            .custody_units
            .set(self.custody.min(i64::MAX as u128) as i64);
    }

    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
