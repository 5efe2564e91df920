use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::availability;
use crate::domain::property::{Property, PropertyDraft, PropertyPatch};
use crate::error::{BookingError, Result};
use crate::ports::booking_repository::BookingRepository;
use crate::ports::property_repository::PropertyRepository;

/// A property joined with its computed availability, the detail payload
/// guests browse before booking.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    #[serde(flatten)]
    pub property: Property,
    pub still_available_dates: BTreeSet<NaiveDate>,
    pub booked_dates: BTreeSet<NaiveDate>,
}

/// Host-facing property management. Ownership is enforced here, in the
/// application, regardless of what the store's own policies add.
pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl PropertyService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            properties,
            bookings,
        }
    }

    pub async fn create(&self, draft: PropertyDraft, owner_id: &str) -> Result<Property> {
        validate_rates(draft.nightly_rate, draft.extra_guest_rate)?;
        let property = Property {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_owned(),
            name: draft.name,
            description: draft.description,
            location: draft.location,
            nightly_rate: draft.nightly_rate,
            extra_guest_rate: draft.extra_guest_rate,
            calendar: draft.calendar,
            image_url: draft.image_url,
        };
        let persisted = self.properties.insert(property).await?;
        tracing::info!(property_id = %persisted.id, owner_id, "property listed");
        Ok(persisted)
    }

    /// Property detail with its remaining availability: the calendar minus
    /// every occupied night, plus the occupied nights themselves for
    /// display.
    pub async fn get(&self, property_id: &str) -> Result<PropertyView> {
        let property = self
            .properties
            .get_by_id(property_id)
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound {
                id: property_id.to_owned(),
            })?;
        let bookings = self.bookings.list_by_property(property_id).await?;
        let still_available_dates = availability::still_available(&property, &bookings);
        let booked_dates = availability::booked_dates(&bookings);
        Ok(PropertyView {
            property,
            still_available_dates,
            booked_dates,
        })
    }

    pub async fn list(&self) -> Result<Vec<Property>> {
        self.properties.list().await
    }

    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Property>> {
        self.properties.list_by_owner(owner_id).await
    }

    pub async fn update(
        &self,
        property_id: &str,
        owner_id: &str,
        patch: PropertyPatch,
    ) -> Result<Property> {
        let mut property = self
            .properties
            .get_by_id(property_id)
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound {
                id: property_id.to_owned(),
            })?;
        if property.owner_id != owner_id {
            return Err(BookingError::Forbidden);
        }

        if let Some(name) = patch.name {
            property.name = name;
        }
        if let Some(description) = patch.description {
            property.description = description;
        }
        if let Some(location) = patch.location {
            property.location = location;
        }
        if let Some(nightly_rate) = patch.nightly_rate {
            property.nightly_rate = nightly_rate;
        }
        if let Some(extra_guest_rate) = patch.extra_guest_rate {
            property.extra_guest_rate = extra_guest_rate;
        }
        if let Some(calendar) = patch.calendar {
            property.calendar = calendar;
        }
        if let Some(image_url) = patch.image_url {
            property.image_url = Some(image_url);
        }
        validate_rates(property.nightly_rate, property.extra_guest_rate)?;

        let persisted = self.properties.update(property).await?;
        tracing::info!(property_id = %persisted.id, "property updated");
        Ok(persisted)
    }

    /// Delist a property. Existing bookings keep their rows — deletion
    /// detaches the listing without invalidating stays already confirmed.
    pub async fn delete(&self, property_id: &str, owner_id: &str) -> Result<()> {
        let property = self
            .properties
            .get_by_id(property_id)
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound {
                id: property_id.to_owned(),
            })?;
        if property.owner_id != owner_id {
            return Err(BookingError::Forbidden);
        }
        self.properties.delete(property_id).await?;
        tracing::info!(property_id, "property deleted");
        Ok(())
    }
}

fn validate_rates(nightly_rate: Decimal, extra_guest_rate: Decimal) -> Result<()> {
    if nightly_rate < Decimal::ZERO || extra_guest_rate < Decimal::ZERO {
        return Err(BookingError::Validation {
            reason: "rates must be non-negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::booking_store::InMemoryBookingStore;
    use crate::adapters::memory::property_store::InMemoryPropertyStore;
    use crate::domain::calendar::Calendar;
    use crate::test_helpers::{calendar_span, date, make_booking};
    use rust_decimal_macros::dec;

    fn draft() -> PropertyDraft {
        PropertyDraft {
            name: "Dune Cabin".into(),
            description: "Sea view".into(),
            location: "Texel".into(),
            nightly_rate: dec!(100),
            extra_guest_rate: dec!(20),
            calendar: Calendar::open(),
            image_url: None,
        }
    }

    fn service() -> (PropertyService, Arc<InMemoryBookingStore>) {
        let properties = Arc::new(InMemoryPropertyStore::new());
        let bookings = Arc::new(InMemoryBookingStore::new());
        (PropertyService::new(properties, bookings.clone()), bookings)
    }

    #[tokio::test]
    async fn create_assigns_id_and_owner() {
        let (service, _) = service();
        let property = service.create(draft(), "host-1").await.unwrap();
        assert!(!property.id.is_empty());
        assert_eq!(property.owner_id, "host-1");
    }

    #[tokio::test]
    async fn create_rejects_negative_rate() {
        let (service, _) = service();
        let mut bad = draft();
        bad.nightly_rate = dec!(-1);
        let result = service.create(bad, "host-1").await;
        assert!(matches!(result, Err(BookingError::Validation { .. })));
    }

    #[tokio::test]
    async fn get_joins_availability() {
        let (service, bookings) = service();
        let mut with_calendar = draft();
        with_calendar.calendar = calendar_span(date(2025, 6, 1), date(2025, 6, 10));
        let property = service.create(with_calendar, "host-1").await.unwrap();
        bookings
            .insert(make_booking("b-1", &property.id, date(2025, 6, 1), date(2025, 6, 4)))
            .await
            .unwrap();

        let view = service.get(&property.id).await.unwrap();
        assert_eq!(view.still_available_dates.len(), 7);
        assert!(!view.still_available_dates.contains(&date(2025, 6, 2)));
        assert!(view.still_available_dates.contains(&date(2025, 6, 4)));
        assert_eq!(view.booked_dates.len(), 3);
    }

    #[tokio::test]
    async fn get_unknown_property_fails() {
        let (service, _) = service();
        let result = service.get("ghost").await;
        assert!(matches!(result, Err(BookingError::PropertyNotFound { .. })));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let (service, _) = service();
        let property = service.create(draft(), "host-1").await.unwrap();
        let patch = PropertyPatch {
            name: Some("Taken Over".into()),
            ..PropertyPatch::default()
        };
        let result = service.update(&property.id, "host-2", patch).await;
        assert!(matches!(result, Err(BookingError::Forbidden)));
    }

    #[tokio::test]
    async fn update_applies_partial_patch() {
        let (service, _) = service();
        let property = service.create(draft(), "host-1").await.unwrap();
        let patch = PropertyPatch {
            nightly_rate: Some(dec!(150)),
            ..PropertyPatch::default()
        };
        let updated = service.update(&property.id, "host-1", patch).await.unwrap();
        assert_eq!(updated.nightly_rate, dec!(150));
        assert_eq!(updated.name, "Dune Cabin");
        assert_eq!(updated.extra_guest_rate, dec!(20));
    }

    #[tokio::test]
    async fn update_rejects_negative_patched_rate() {
        let (service, _) = service();
        let property = service.create(draft(), "host-1").await.unwrap();
        let patch = PropertyPatch {
            extra_guest_rate: Some(dec!(-5)),
            ..PropertyPatch::default()
        };
        let result = service.update(&property.id, "host-1", patch).await;
        assert!(matches!(result, Err(BookingError::Validation { .. })));
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let (service, _) = service();
        let property = service.create(draft(), "host-1").await.unwrap();
        let result = service.delete(&property.id, "host-2").await;
        assert!(matches!(result, Err(BookingError::Forbidden)));
    }

    #[tokio::test]
    async fn delete_detaches_but_keeps_bookings() {
        let (service, bookings) = service();
        let property = service.create(draft(), "host-1").await.unwrap();
        bookings
            .insert(make_booking("b-1", &property.id, date(2025, 6, 1), date(2025, 6, 4)))
            .await
            .unwrap();
        service.delete(&property.id, "host-1").await.unwrap();
        assert!(matches!(
            service.get(&property.id).await,
            Err(BookingError::PropertyNotFound { .. })
        ));
        // The stay survives the delisting
        assert!(bookings.get_by_id("b-1").await.unwrap().is_some());
    }
}
