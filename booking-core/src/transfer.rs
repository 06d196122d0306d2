//! External value-transfer seam
//!
//! The core never moves currency itself; withdrawal hands the paid-out
//! amount to a [`ValueTransfer`] implementation supplied by the host.
//! The trait is synchronous: the core runs each call to completion
//! with no suspension points.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Address, Amount};

/// Outbound value-transfer primitive
///
/// A failed transfer must surface as an error; the payments ledger
/// restores the withdrawn balance so the whole call has no effect.
pub trait ValueTransfer {
    /// Transfer `amount` of native value to `to`
    fn transfer(&mut self, to: &Address, amount: Amount) -> Result<()>;
}

/// In-memory transfer implementation
///
/// Records every payout per recipient and can be armed to fail, for
/// tests and for embedders that settle off-system.
#[derive(Debug, Default)]
pub struct MemoryTransfer {
    paid: HashMap<Address, Amount>,
    fail_next: bool,
}

impl MemoryTransfer {
    /// Create new in-memory transfer sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount paid out to `who` so far
    pub fn paid_to(&self, who: &Address) -> Amount {
        self.paid.get(who).copied().unwrap_or(0)
    }

    /// Make the next transfer fail (simulates a reverting receiver)
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl ValueTransfer for MemoryTransfer {
    fn transfer(&mut self, to: &Address, amount: Amount) -> Result<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(Error::TransferFailed(format!(
                "receiver {} rejected transfer",
                to
            )));
        }
        *self.paid.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_transfer_accumulates() {
        let mut sink = MemoryTransfer::new();
        let alice = Address::new("alice");
        sink.transfer(&alice, 10).unwrap();
        sink.transfer(&alice, 5).unwrap();
        assert_eq!(sink.paid_to(&alice), 15);
    }

    #[test]
    fn test_memory_transfer_armed_failure_is_one_shot() {
        let mut sink = MemoryTransfer::new();
        let alice = Address::new("alice");
        sink.fail_next();
        assert!(sink.transfer(&alice, 10).is_err());
        assert_eq!(sink.paid_to(&alice), 0);
        sink.transfer(&alice, 10).unwrap();
        assert_eq!(sink.paid_to(&alice), 10);
    }
}
