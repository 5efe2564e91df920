use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::booking::Booking;
use crate::error::{BookingError, Result};
use crate::ports::booking_repository::BookingRepository;

/// In-memory booking store with the overlap backstop a relational store
/// would enforce through a (property_id, stay range) exclusion constraint:
/// writes that would overlap an existing stay on the same property fail
/// with `StoreConflict` inside the write lock.
#[derive(Default)]
pub struct InMemoryBookingStore {
    entries: RwLock<HashMap<String, Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_overlap<'a>(
    entries: &'a HashMap<String, Booking>,
    candidate: &Booking,
) -> Option<&'a Booking> {
    entries.values().find(|b| {
        b.property_id == candidate.property_id
            && b.id != candidate.id
            && b.range().overlaps(&candidate.range())
    })
}

#[async_trait]
impl BookingRepository for InMemoryBookingStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Booking>> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn list_by_property(&self, property_id: &str) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .entries
            .read()
            .await
            .values()
            .filter(|b| b.property_id == property_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.check_in.cmp(&b.check_in).then_with(|| a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .entries
            .read()
            .await
            .values()
            .filter(|b| b.guest_user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.check_in.cmp(&b.check_in).then_with(|| a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn insert(&self, booking: Booking) -> Result<Booking> {
        let mut entries = self.entries.write().await;
        if let Some(existing) = find_overlap(&entries, &booking) {
            return Err(BookingError::StoreConflict {
                reason: format!("stay overlaps booking {}", existing.id),
            });
        }
        if entries.contains_key(&booking.id) {
            return Err(BookingError::Store {
                reason: format!("duplicate booking id {}", booking.id),
            });
        }
        entries.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn update(&self, booking: Booking) -> Result<Booking> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(&booking.id) {
            return Err(BookingError::BookingNotFound {
                id: booking.id.clone(),
            });
        }
        if let Some(existing) = find_overlap(&entries, &booking) {
            return Err(BookingError::StoreConflict {
                reason: format!("stay overlaps booking {}", existing.id),
            });
        }
        entries.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.entries.write().await.remove(id);
        Ok(())
    }
}
