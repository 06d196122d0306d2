//! Configuration for the booking core
//!
//! Supplied once at construction by deployment tooling: the initial
//! fee rate and the fee receiver. Both stay mutable at runtime, but
//! only through the configuration owner.

use serde::{Deserialize, Serialize};

use crate::types::{Address, FeeRate, FEE_RATE_SCALE};

/// Construction-time configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed-point fee fraction; [`FEE_RATE_SCALE`] means 100%
    ///
    /// TOML integers cap at i64, so files may give the rate either as
    /// an integer or as a decimal string ("1000000000000000000").
    #[serde(with = "fee_rate_serde")]
    pub fee_rate: FeeRate,

    /// Identity credited with the platform share of every settlement
    pub fee_receiver: Address,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fee_rate: FEE_RATE_SCALE / 2, // 50%
            fee_receiver: Address::new("fee-receiver"),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(fee_rate) = std::env::var("BOOKING_FEE_RATE") {
            config.fee_rate = fee_rate
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid BOOKING_FEE_RATE: {}", e)))?;
        }

        if let Ok(fee_receiver) = std::env::var("BOOKING_FEE_RECEIVER") {
            config.fee_receiver = Address::new(fee_receiver);
        }

        Ok(config)
    }
}

/// u128 codec for formats without native u128 support (TOML)
mod fee_rate_serde {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rate: &u128, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&rate.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u128, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Str(String),
        }
        match Raw::deserialize(d)? {
            Raw::Int(v) => Ok(v as u128),
            Raw::Str(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
