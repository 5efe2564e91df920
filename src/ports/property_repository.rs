use async_trait::async_trait;

use crate::domain::property::Property;
use crate::error::Result;

/// Access to the marketplace's property store. Implementations are assumed
/// transactional per operation; the engine keeps no state of its own.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Property>>;
    async fn list(&self) -> Result<Vec<Property>>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Property>>;
    async fn insert(&self, property: Property) -> Result<Property>;
    async fn update(&self, property: Property) -> Result<Property>;
    async fn delete(&self, id: &str) -> Result<()>;
}
