use async_trait::async_trait;
use models::{Animal, AnimalFields, AnimalId};
use tokio::sync::RwLock;

use super::repository::AnimalRepository;
use crate::errors::ServiceError;

/// In-process store keeping records in insertion order.
///
/// Mirrors the store semantics the service relies on: updates and deletes of
/// an unknown id are no-ops reported through the returned flag.
#[derive(Default)]
pub struct InMemoryAnimalRepository {
    animals: RwLock<Vec<Animal>>,
}

impl InMemoryAnimalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.animals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.animals.read().await.is_empty()
    }
}

#[async_trait]
impl AnimalRepository for InMemoryAnimalRepository {
    async fn find_all(&self) -> Result<Vec<Animal>, ServiceError> {
        Ok(self.animals.read().await.clone())
    }

    async fn find_one(&self, id: AnimalId) -> Result<Option<Animal>, ServiceError> {
        let animals = self.animals.read().await;
        Ok(animals.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_one(&self, fields: AnimalFields) -> Result<AnimalId, ServiceError> {
        let id = AnimalId::generate();
        self.animals.write().await.push(Animal::from_fields(id, fields));
        Ok(id)
    }

    async fn update_one(&self, id: AnimalId, fields: AnimalFields) -> Result<bool, ServiceError> {
        let mut animals = self.animals.write().await;
        match animals.iter_mut().find(|a| a.id == id) {
            Some(existing) => {
                existing.replace_fields(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, id: AnimalId) -> Result<bool, ServiceError> {
        let mut animals = self.animals.write().await;
        let before = animals.len();
        animals.retain(|a| a.id != id);
        Ok(animals.len() < before)
    }
}
