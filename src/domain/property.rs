use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::calendar::Calendar;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub nightly_rate: Decimal,
    pub extra_guest_rate: Decimal,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Property {
    pub fn summary(&self) -> PropertySummary {
        PropertySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Compact join payload attached to bookings returned to guests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// What a host supplies when listing a property; the id and owner are
/// assigned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub nightly_rate: Decimal,
    pub extra_guest_rate: Decimal,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The mutable property fields, enumerated. A field left `None` keeps its
/// prior value; anything not listed here cannot be changed after listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nightly_rate: Option<Decimal>,
    #[serde(default)]
    pub extra_guest_rate: Option<Decimal>,
    #[serde(default)]
    pub calendar: Option<Calendar>,
    #[serde(default)]
    pub image_url: Option<String>,
}
