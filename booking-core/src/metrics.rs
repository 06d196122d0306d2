//! Metrics collection for observability
//!
//! # Metrics
//!
//! - `booking_rooms_created_total` - Rooms created
//! - `booking_direct_bookings_total` - Successful direct bookings
//! - `booking_intents_total` - Intents escrowed
//! - `booking_intents_accepted_total` - Intents accepted
//! - `booking_intents_rejected_total` - Intents rejected
//! - `booking_withdrawals_total` - Successful withdrawals
//! - `booking_custody_units` - Native value currently in custody

use prometheus::{IntCounter, IntGauge, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Rooms created
    pub rooms_created: IntCounter,

    /// Successful direct bookings
    pub direct_bookings: IntCounter,

    /// Intents escrowed
    pub intents_created: IntCounter,

    /// Intents accepted
    pub intents_accepted: IntCounter,

    /// Intents rejected
    pub intents_rejected: IntCounter,

    /// Successful withdrawals
    pub withdrawals: IntCounter,

    /// Native value currently in custody
    pub custody_units: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let rooms_created =
            IntCounter::new("booking_rooms_created_total", "Rooms created")?;
        registry.register(Box::new(rooms_created.clone()))?;

        let direct_bookings =
            IntCounter::new("booking_direct_bookings_total", "Successful direct bookings")?;
        registry.register(Box::new(direct_bookings.clone()))?;

        let intents_created =
            IntCounter::new("booking_intents_total", "Intents escrowed")?;
        registry.register(Box::new(intents_created.clone()))?;

        let intents_accepted =
            IntCounter::new("booking_intents_accepted_total", "Intents accepted")?;
        registry.register(Box::new(intents_accepted.clone()))?;

        let intents_rejected =
            IntCounter::new("booking_intents_rejected_total", "Intents rejected")?;
        registry.register(Box::new(intents_rejected.clone()))?;

        let withdrawals =
            IntCounter::new("booking_withdrawals_total", "Successful withdrawals")?;
        registry.register(Box::new(withdrawals.clone()))?;

        let custody_units =
            IntGauge::new("booking_custody_units", "Native value currently in custody")?;
        registry.register(Box::new(custody_units.clone()))?;

        Ok(Self {
            rooms_created,
            direct_bookings,
            intents_created,
            intents_accepted,
            intents_rejected,
            withdrawals,
            custody_units,
            registry,
        })
    }
}
