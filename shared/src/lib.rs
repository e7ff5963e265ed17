//! Shared types for the Marea booking platform
//!
//! Wire-level types used on both sides of the HTTP boundary: the order
//! notification event union, quote request/response DTOs, the activity
//! catalog model, room rates, and utility helpers.

pub mod booking;
pub mod notify;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Notification re-exports (for convenient access)
pub use notify::OrderEvent;

// Booking model re-exports
pub use booking::{
    Activity, ActivityCategory, ActivityLine, ActivitySelection, BillingMode, PriceBreakdown,
    QuoteRequest, QuoteResponse, RoomRate,
};
