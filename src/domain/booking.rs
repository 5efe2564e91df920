use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::dates::DateRange;

/// A confirmed stay. The only durable booking state: creation is atomic
/// accept/reject, so anything persisted is confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    /// None for anonymous guest checkout; such bookings are identified by
    /// the contact fields instead.
    #[serde(default)]
    pub guest_user_id: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: u32,
    pub total_price: Decimal,
    pub guest_full_name: String,
    pub guest_email: String,
    pub guest_phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The stay as a half-open range. The lifecycle validates ordering
    /// before persisting, so the fields are trusted here.
    pub fn range(&self) -> DateRange {
        DateRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.guest_user_id.is_none()
    }
}

/// What a guest submits to request a stay. Dates are optional so missing
/// fields surface as validation errors rather than parse failures; id and
/// total price are server-computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub property_id: String,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub guest_full_name: String,
    pub guest_email: String,
    pub guest_phone_number: String,
}

/// The mutable booking fields, enumerated. A field left `None` keeps its
/// prior value; unknown fields are unrepresentable by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingPatch {
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_guests: Option<u32>,
    #[serde(default)]
    pub guest_full_name: Option<String>,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub guest_phone_number: Option<String>,
}

impl BookingPatch {
    /// True when the patch touches the stay itself (dates or guest count),
    /// which forces a fresh availability check and a price recomputation.
    pub fn changes_stay(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some() || self.number_of_guests.is_some()
    }
}

/// Contact pair used to authorize cancellation of anonymous bookings.
/// Both fields must match the stored booking exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestContact {
    pub email: String,
    pub phone_number: String,
}
