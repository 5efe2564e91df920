use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::property::Property;
use crate::error::{BookingError, Result};
use crate::ports::property_repository::PropertyRepository;

/// In-memory property store: the engine's store fake. All operations run
/// under a single lock, so each call is atomic like a store transaction.
#[derive(Default)]
pub struct InMemoryPropertyStore {
    entries: RwLock<HashMap<String, Property>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Property>> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Property>> {
        let mut properties: Vec<Property> =
            self.entries.read().await.values().cloned().collect();
        properties.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(properties)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Property>> {
        let mut properties: Vec<Property> = self
            .entries
            .read()
            .await
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        properties.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(properties)
    }

    async fn insert(&self, property: Property) -> Result<Property> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&property.id) {
            return Err(BookingError::Store {
                reason: format!("duplicate property id {}", property.id),
            });
        }
        entries.insert(property.id.clone(), property.clone());
        Ok(property)
    }

    async fn update(&self, property: Property) -> Result<Property> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(&property.id) {
            return Err(BookingError::PropertyNotFound {
                id: property.id.clone(),
            });
        }
        entries.insert(property.id.clone(), property.clone());
        Ok(property)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.entries.write().await.remove(id);
        Ok(())
    }
}
