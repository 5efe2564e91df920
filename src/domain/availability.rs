use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::booking::Booking;
use crate::domain::dates::DateRange;
use crate::domain::property::Property;
use crate::error::{BookingError, Result};

/// Decide whether `range` may become a new or modified booking for
/// `property`, given the property's current confirmed bookings.
///
/// A property with an empty calendar is unconstrained; otherwise every
/// occupied night must be a host-declared bookable date. The overlap test
/// is strictly half-open, so a checkout and a check-in on the same day
/// never conflict — back-to-back stays are allowed.
///
/// `exclude_booking_id` lets a modification skip the booking being edited
/// so it does not conflict with itself.
pub fn is_range_bookable(
    property: &Property,
    range: &DateRange,
    existing: &[Booking],
    exclude_booking_id: Option<&str>,
) -> Result<()> {
    if !property.calendar.is_empty() {
        for day in range.days() {
            if !property.calendar.contains(day) {
                return Err(BookingError::DateNotAvailable { date: day });
            }
        }
    }

    for booking in existing {
        if booking.property_id != property.id {
            continue;
        }
        if exclude_booking_id == Some(booking.id.as_str()) {
            continue;
        }
        if booking.range().overlaps(range) {
            return Err(BookingError::DateRangeConflict);
        }
    }

    Ok(())
}

/// Dates still open for a new arrival: the calendar minus every occupied
/// night. Departure days are not occupied and stay available.
pub fn still_available(property: &Property, bookings: &[Booking]) -> BTreeSet<NaiveDate> {
    property.calendar.subtract(&booked_dates(bookings))
}

/// Sorted, deduplicated union of all occupied nights across `bookings`.
/// Display only — conflict checks always recompute from the raw ranges.
pub fn booked_dates(bookings: &[Booking]) -> BTreeSet<NaiveDate> {
    bookings.iter().flat_map(|b| b.range().days()).collect()
}
