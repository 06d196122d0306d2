//! Pull-payment ledger
//!
//! Settlement never pushes funds to a counterparty; it credits a
//! per-identity balance that the beneficiary withdraws themselves.
//! This decouples one party's receive behavior from every other
//! party's bookings and withdrawals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::transfer::ValueTransfer;
use crate::types::{Address, Amount};

/// Per-identity withdrawable balances
///
/// Balances only grow via [`PaymentLedger::credit`] and only shrink
/// via [`PaymentLedger::withdraw`], which zeroes the entry before the
/// external transfer runs. A reentrant withdrawal during the transfer
/// therefore observes zero and cannot double-spend.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentLedger {
    balances: HashMap<Address, Amount>,
}

impl PaymentLedger {
    /// Create empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to a beneficiary's balance; never fails
    pub fn credit(&mut self, who: &Address, amount: Amount) {
        if amount == 0 {
            return;
        }
        let balance = self.balances.entry(who.clone()).or_insert(0);
        *balance += amount;
        debug!(who = %who, amount, balance = *balance, "credited");
    }

    /// Current withdrawable balance
    pub fn balance_of(&self, who: &Address) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }

    /// Sum of all outstanding balances
    pub fn total_liability(&self) -> Amount {
        self.balances.values().sum()
    }

    /// Withdraw the full balance of `who` through `sink`
    ///
    /// A zero balance is a successful no-op. The balance is zeroed
    /// before the transfer; if the transfer fails it is restored and
    /// the error surfaces, leaving the call without effect. Returns
    /// the amount paid out.
    pub fn withdraw(&mut self, who: &Address, sink: &mut dyn ValueTransfer) -> Result<Amount> {
        let amount = match self.balances.remove(who) {
            Some(amount) if amount > 0 => amount,
            _ => return Ok(0),
        };

        if let Err(err) = sink.transfer(who, amount) {
            self.balances.insert(who.clone(), amount);
            return Err(err);
        }

        debug!(who = %who, amount, "withdrawn");
        Ok(amount)
    }
}
