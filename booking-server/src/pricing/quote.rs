//! Quote Calculator
//!
//! Pure computation from (dates, guests, room rate, activity selections) to a
//! price breakdown. Uses rust_decimal internally, reports f64 on the wire.
//! `today` is injected by the caller so validation is testable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::booking::{ActivityLine, ActivitySelection, BillingMode, PriceBreakdown, RoomRate};

use super::catalog::ActivityCatalog;
use super::money::{to_decimal, to_f64};
use crate::utils::AppError;

/// Maximum stay length in nights (inclusive)
const MAX_STAY_NIGHTS: i64 = 30;
/// Guest count bounds (inclusive)
const MIN_GUESTS: i64 = 1;
const MAX_GUESTS: i64 = 12;

/// Validation failure, discriminated so the UI can target the right form field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("{0}")]
    InvalidDates(String),

    #[error("{0}")]
    InvalidGuests(String),
}

impl From<QuoteError> for AppError {
    fn from(e: QuoteError) -> Self {
        match e {
            QuoteError::InvalidDates(msg) => AppError::InvalidDates(msg),
            QuoteError::InvalidGuests(msg) => AppError::InvalidGuests(msg),
        }
    }
}

/// Computed quote: breakdown plus display values
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub nights: i64,
    /// Resolved per-night rate, 0 when no room contributed
    pub price_per_night: f64,
}

/// Compute a price quote.
///
/// Validation happens before any pricing math; the first failing check wins
/// and no partial result is produced. `rate` is the already-resolved room
/// rate: the caller degrades lookup failures to `None` (quote still priced,
/// accommodation contributes zero).
///
/// Unknown activity ids are skipped silently so stale client catalogs never
/// break a quote.
pub fn compute_quote(
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i64,
    selections: &[ActivitySelection],
    rate: Option<&RoomRate>,
    catalog: &ActivityCatalog,
    today: NaiveDate,
) -> Result<Quote, QuoteError> {
    // ========== Validation ==========
    if check_out <= check_in {
        return Err(QuoteError::InvalidDates(
            "Check-out date must be after check-in date".to_string(),
        ));
    }

    let nights = (check_out - check_in).num_days();
    if nights > MAX_STAY_NIGHTS {
        return Err(QuoteError::InvalidDates(format!(
            "Maximum stay is {} nights",
            MAX_STAY_NIGHTS
        )));
    }

    if check_in < today {
        return Err(QuoteError::InvalidDates(
            "Check-in date cannot be in the past".to_string(),
        ));
    }

    if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
        return Err(QuoteError::InvalidGuests(format!(
            "Guest count must be between {} and {}",
            MIN_GUESTS, MAX_GUESTS
        )));
    }

    // ========== Accommodation ==========
    // The rate belongs to the room (total capacity), never multiplied by guests.
    let price_per_night = rate.map(|r| r.price_per_night).unwrap_or(0.0);
    let accommodation = to_decimal(price_per_night) * Decimal::from(nights);

    // ========== Activities ==========
    let guest_count = Decimal::from(guests);
    let mut lines = Vec::new();
    let mut activities_total = Decimal::ZERO;

    for selection in selections {
        let Some(activity) = catalog.get(&selection.activity_id) else {
            // Stale client catalog, not an error
            continue;
        };

        let unit_price = to_decimal(activity.price);
        let (quantity, line_total) = match activity.billing {
            BillingMode::PerSession => {
                let quantity = selection.effective_quantity();
                (quantity, unit_price * Decimal::from(quantity) * guest_count)
            }
            BillingMode::PerPerson => (1, unit_price * guest_count),
        };

        activities_total += line_total;
        lines.push(ActivityLine {
            activity_id: activity.id.clone(),
            name: activity.name.clone(),
            unit_price: activity.price,
            quantity,
            line_total: to_f64(line_total),
        });
    }

    let subtotal = accommodation + activities_total;

    Ok(Quote {
        breakdown: PriceBreakdown {
            accommodation_total: to_f64(accommodation),
            activity_breakdown: lines,
            subtotal: to_f64(subtotal),
            taxes: 0.0,
            total: to_f64(subtotal),
        },
        nights,
        price_per_night,
    })
}
