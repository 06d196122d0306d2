//! Error types for the booking core
//!
//! Every failure is a synchronous, atomic rejection: a call that
//! returns an error has made no observable state change. The display
//! strings match the revert reasons of the on-chain contract so that
//! behavioral assertions port unchanged.

use thiserror::Error;

/// Result type for booking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Booking core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Room id was never assigned
    #[error("Room has not been created")]
    RoomNotCreated,

    /// Room exists but its removed latch is set
    #[error("Room has been removed")]
    RoomRemoved,

    /// Caller is not the room owner
    #[error("Not owner")]
    NotOwner,

    /// Caller is not the configuration owner
    #[error("caller is not the owner")]
    NotConfigOwner,

    /// Room creation with a zero price
    #[error("Price cant be zero")]
    PriceCantBeZero,

    /// Date fails Gregorian validation
    #[error("Invalid date")]
    InvalidDate,

    /// Slot is already booked
    #[error("Room not available")]
    RoomNotAvailable,

    /// Attached value is below the room price
    #[error("Price not reached")]
    PriceNotReached,

    /// Owner attempted an intent on their own room
    #[error("Cannot book your own room")]
    CannotBookYourRoom,

    /// Caller already holds a pending intent on this slot
    #[error("Intent already created")]
    IntentAlreadyCreated,

    /// Slot already holds the maximum number of pending intents
    #[error("Max intents reached")]
    MaxIntentsReached,

    /// No pending intent for (booker, slot)
    #[error("Intent not found")]
    IntentNotFound,

    /// Fee rate above the fixed-point scale
    #[error("Fee rate exceeds scale")]
    InvalidFeeRate,

    /// External value transfer failed during withdrawal
    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
