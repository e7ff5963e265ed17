//! Pricing Module
//!
//! Quote computation for prospective bookings: nightly accommodation rates
//! combined with per-activity package pricing. Stateless; all lookups go
//! through the injected catalog and room-rate source.

mod catalog;
mod money;
mod quote;
mod rates;

pub use catalog::ActivityCatalog;
pub use quote::{Quote, QuoteError, compute_quote};
pub use rates::{RoomRateSource, StaticRoomRates};
