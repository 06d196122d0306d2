//! Fee computation
//!
//! Splits a settled price into the room owner's share and the platform
//! share. Integer arithmetic only: the platform share truncates, the
//! owner absorbs the remainder, and the two always sum back to the
//! price exactly.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, FeeRate, FEE_RATE_SCALE};

/// Result of a fee split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Credited to the room owner
    pub owner_share: Amount,

    /// Credited to the fee receiver
    pub platform_share: Amount,
}

/// Split a price at the given fee rate
///
/// `platform_share = price * fee_rate / FEE_RATE_SCALE` (truncating),
/// `owner_share = price - platform_share`. The product is computed in
/// two limbs (whole and fractional multiples of the scale) so it
/// cannot overflow for any u128 price; rates above [`FEE_RATE_SCALE`]
/// are clamped to 100%. For any rate in `[0, FEE_RATE_SCALE]` the
/// shares sum to the price exactly and the platform share never
/// exceeds it.
pub fn split(price: Amount, fee_rate: FeeRate) -> FeeSplit {
    let fee_rate = fee_rate.min(FEE_RATE_SCALE);
    let platform_share = (price / FEE_RATE_SCALE) * fee_rate
        + (price % FEE_RATE_SCALE) * fee_rate / FEE_RATE_SCALE;
    FeeSplit {
        owner_share: price - platform_share,
        platform_share,
    }
}
