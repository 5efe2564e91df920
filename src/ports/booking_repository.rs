use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::error::Result;

/// Access to the booking store.
///
/// `insert` and `update` run under the store's transactional guarantees and
/// may fail with [`BookingError::StoreConflict`] when a (property, stay)
/// exclusion constraint rejects an overlapping write; the lifecycle retries
/// once with a fresh availability check before giving up.
///
/// [`BookingError::StoreConflict`]: crate::error::BookingError::StoreConflict
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Booking>>;
    async fn list_by_property(&self, property_id: &str) -> Result<Vec<Booking>>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>>;
    async fn insert(&self, booking: Booking) -> Result<Booking>;
    async fn update(&self, booking: Booking) -> Result<Booking>;
    async fn delete(&self, id: &str) -> Result<()>;
}
