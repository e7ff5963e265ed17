//! Booking domain models
//!
//! Shared between booking-server and the booking UI (via API).
//! Wire field names are camelCase to match the frontend contract.

pub mod activity;
pub mod quote;
pub mod room;

// Re-exports
pub use activity::*;
pub use quote::*;
pub use room::*;
