use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::config::types::BookingConfig;
use crate::domain::availability;
use crate::domain::booking::{Booking, BookingDraft, BookingPatch, GuestContact};
use crate::domain::dates::DateRange;
use crate::domain::pricing;
use crate::domain::property::{Property, PropertySummary};
use crate::error::{BookingError, Result};
use crate::ports::booking_repository::BookingRepository;
use crate::ports::clock::Clock;
use crate::ports::property_repository::PropertyRepository;

/// A booking joined with a summary of its property — the shape guests see.
/// The summary is absent when the property has since been delisted.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithProperty {
    #[serde(flatten)]
    pub booking: Booking,
    pub property: Option<PropertySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancellationConfirmation {
    pub booking_id: String,
    pub message: String,
}

#[derive(Clone, Copy)]
enum WriteOp {
    Insert,
    Update,
}

/// The booking lifecycle: admission, retrieval, modification, cancellation.
///
/// Stateless between calls; all durable state lives behind the repository
/// ports. Creation is atomic accept/reject — anything persisted is a
/// confirmed stay.
pub struct BookingService {
    properties: Arc<dyn PropertyRepository>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        config: BookingConfig,
    ) -> Self {
        Self {
            properties,
            bookings,
            clock,
            config,
        }
    }

    /// Admit and persist a new stay. `requesting_user` is the resolved
    /// identity, or `None` for anonymous guest checkout.
    pub async fn create(
        &self,
        draft: BookingDraft,
        requesting_user: Option<&str>,
    ) -> Result<BookingWithProperty> {
        let (check_in, check_out) = match (draft.check_in, draft.check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => {
                return Err(BookingError::Validation {
                    reason: "check-in and check-out dates are required".into(),
                });
            }
        };
        let range = DateRange::new(check_in, check_out)?;
        if draft.number_of_guests == 0 {
            return Err(BookingError::Validation {
                reason: "number of guests must be at least 1".into(),
            });
        }

        let property = self
            .properties
            .get_by_id(&draft.property_id)
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound {
                id: draft.property_id.clone(),
            })?;

        let nights = pricing::nights(range.check_in, range.check_out)?;
        let total_price = pricing::total_price(
            nights,
            draft.number_of_guests,
            property.nightly_rate,
            property.extra_guest_rate,
        )?;

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            property_id: property.id.clone(),
            guest_user_id: requesting_user.map(str::to_owned),
            check_in: range.check_in,
            check_out: range.check_out,
            number_of_guests: draft.number_of_guests,
            total_price,
            guest_full_name: draft.guest_full_name,
            guest_email: draft.guest_email,
            guest_phone_number: draft.guest_phone_number,
            created_at: self.clock.now(),
        };

        let persisted = self
            .admit_and_write(&property, booking, WriteOp::Insert)
            .await?;
        tracing::info!(
            booking_id = %persisted.id,
            property_id = %property.id,
            nights,
            "booking confirmed"
        );
        Ok(BookingWithProperty {
            booking: persisted,
            property: Some(property.summary()),
        })
    }

    pub async fn get(&self, booking_id: &str, requesting_user: &str) -> Result<BookingWithProperty> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound {
                id: booking_id.to_owned(),
            })?;
        if booking.guest_user_id.as_deref() != Some(requesting_user) {
            return Err(BookingError::Forbidden);
        }
        let property = self.properties.get_by_id(&booking.property_id).await?;
        Ok(BookingWithProperty {
            booking,
            property: property.map(|p| p.summary()),
        })
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<BookingWithProperty>> {
        let bookings = self.bookings.list_by_user(user_id).await?;
        let mut joined = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let property = self.properties.get_by_id(&booking.property_id).await?;
            joined.push(BookingWithProperty {
                booking,
                property: property.map(|p| p.summary()),
            });
        }
        Ok(joined)
    }

    /// Apply the fields present in `patch`; unspecified fields keep their
    /// prior values. Changing the stay (dates or guest count) re-runs the
    /// admission check against the property's other bookings and
    /// recomputes the price.
    pub async fn update(
        &self,
        booking_id: &str,
        requesting_user: &str,
        patch: BookingPatch,
    ) -> Result<BookingWithProperty> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound {
                id: booking_id.to_owned(),
            })?;
        if booking.guest_user_id.as_deref() != Some(requesting_user) {
            return Err(BookingError::Forbidden);
        }
        self.ensure_outside_window(booking.check_in)?;

        let stay_changes = patch.changes_stay();
        let mut updated = booking;
        if let Some(check_in) = patch.check_in {
            updated.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            updated.check_out = check_out;
        }
        if let Some(guests) = patch.number_of_guests {
            updated.number_of_guests = guests;
        }
        if let Some(name) = patch.guest_full_name {
            updated.guest_full_name = name;
        }
        if let Some(email) = patch.guest_email {
            updated.guest_email = email;
        }
        if let Some(phone) = patch.guest_phone_number {
            updated.guest_phone_number = phone;
        }

        let property = self
            .properties
            .get_by_id(&updated.property_id)
            .await?
            .ok_or_else(|| BookingError::PropertyNotFound {
                id: updated.property_id.clone(),
            })?;

        let persisted = if stay_changes {
            let range = DateRange::new(updated.check_in, updated.check_out)?;
            if updated.number_of_guests == 0 {
                return Err(BookingError::Validation {
                    reason: "number of guests must be at least 1".into(),
                });
            }
            let nights = pricing::nights(range.check_in, range.check_out)?;
            updated.total_price = pricing::total_price(
                nights,
                updated.number_of_guests,
                property.nightly_rate,
                property.extra_guest_rate,
            )?;
            self.admit_and_write(&property, updated, WriteOp::Update)
                .await?
        } else {
            self.bookings.update(updated).await?
        };

        tracing::info!(booking_id = %persisted.id, "booking updated");
        Ok(BookingWithProperty {
            booking: persisted,
            property: Some(property.summary()),
        })
    }

    /// Cancel a stay. Authenticated guests cancel their own bookings;
    /// anonymous bookings require the stored contact pair to match
    /// exactly. Cancelling an already-cancelled id reports not-found.
    pub async fn cancel(
        &self,
        booking_id: &str,
        requesting_user: Option<&str>,
        guest_contact: Option<&GuestContact>,
    ) -> Result<CancellationConfirmation> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound {
                id: booking_id.to_owned(),
            })?;

        if !may_cancel(&booking, requesting_user, guest_contact) {
            return Err(BookingError::Forbidden);
        }
        self.ensure_outside_window(booking.check_in)?;

        self.bookings.delete(booking_id).await?;
        tracing::info!(booking_id, "booking cancelled");
        Ok(CancellationConfirmation {
            booking_id: booking_id.to_owned(),
            message: format!("Booking {booking_id} cancelled."),
        })
    }

    /// Check and write as one logical admission step. When the store's
    /// overlap backstop rejects the write, re-check against fresh bookings
    /// and retry; once the retries are spent the rejection surfaces as a
    /// date range conflict.
    async fn admit_and_write(
        &self,
        property: &Property,
        booking: Booking,
        op: WriteOp,
    ) -> Result<Booking> {
        let exclude = match op {
            WriteOp::Insert => None,
            WriteOp::Update => Some(booking.id.clone()),
        };
        let mut retries_left = self.config.conflict_retries;
        loop {
            let existing = self.bookings.list_by_property(&property.id).await?;
            availability::is_range_bookable(
                property,
                &booking.range(),
                &existing,
                exclude.as_deref(),
            )?;
            let written = match op {
                WriteOp::Insert => self.bookings.insert(booking.clone()).await,
                WriteOp::Update => self.bookings.update(booking.clone()).await,
            };
            match written {
                Ok(persisted) => return Ok(persisted),
                Err(BookingError::StoreConflict { reason }) => {
                    if retries_left == 0 {
                        return Err(BookingError::DateRangeConflict);
                    }
                    retries_left -= 1;
                    tracing::warn!(
                        booking_id = %booking.id,
                        %reason,
                        "store rejected stay, re-checking availability"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Changes close `cancellation_window_hours` before arrival. Exactly on
    /// the boundary is still allowed; strictly inside the window is not.
    fn ensure_outside_window(&self, check_in: NaiveDate) -> Result<()> {
        let hours = self.config.cancellation_window_hours;
        let check_in_at = check_in.and_time(NaiveTime::MIN).and_utc();
        if check_in_at - self.clock.now() < Duration::hours(hours) {
            return Err(BookingError::CancellationWindow { hours });
        }
        Ok(())
    }
}

fn may_cancel(
    booking: &Booking,
    requesting_user: Option<&str>,
    guest_contact: Option<&GuestContact>,
) -> bool {
    match (&booking.guest_user_id, requesting_user) {
        (Some(owner), Some(user)) => owner == user,
        (Some(_), None) => false,
        (None, _) => guest_contact.is_some_and(|contact| {
            contact.email == booking.guest_email
                && contact.phone_number == booking.guest_phone_number
        }),
    }
}
