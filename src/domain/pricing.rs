use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{BookingError, Result};

/// Whole nights between check-in and check-out. Rejects empty and reversed
/// ranges.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> Result<i64> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(BookingError::Validation {
            reason: "check-out date must be after check-in date".into(),
        });
    }
    Ok(nights)
}

/// Total stay price. Every guest past the first pays the extra-guest rate
/// on top of the nightly rate, for every night:
/// `total = nights * (nightly_rate + (guests - 1) * extra_guest_rate)`.
///
/// All arithmetic is exact decimal; money never passes through floats.
pub fn total_price(
    nights: i64,
    guests: u32,
    nightly_rate: Decimal,
    extra_guest_rate: Decimal,
) -> Result<Decimal> {
    if guests == 0 {
        return Err(BookingError::Validation {
            reason: "number of guests must be at least 1".into(),
        });
    }
    let base = nightly_rate + Decimal::from(guests - 1) * extra_guest_rate;
    Ok(Decimal::from(nights) * base)
}
