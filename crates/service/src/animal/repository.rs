use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_document},
    Collection, Database,
};
use models::{db::ANIMALS_COLLECTION, Animal, AnimalFields, AnimalId};

use crate::errors::ServiceError;

/// Single-document operations the service needs from a document store.
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Every record, in store order.
    async fn find_all(&self) -> Result<Vec<Animal>, ServiceError>;
    async fn find_one(&self, id: AnimalId) -> Result<Option<Animal>, ServiceError>;
    /// Insert a new record; the store assigns the id.
    async fn insert_one(&self, fields: AnimalFields) -> Result<AnimalId, ServiceError>;
    /// Replace all four fields. Returns whether a record matched.
    async fn update_one(&self, id: AnimalId, fields: AnimalFields) -> Result<bool, ServiceError>;
    /// Returns whether a record was removed.
    async fn delete_one(&self, id: AnimalId) -> Result<bool, ServiceError>;
}

/// MongoDB-backed repository over the `animals` collection.
#[derive(Clone)]
pub struct MongoAnimalRepository {
    db: Database,
}

impl MongoAnimalRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn animals(&self) -> Collection<Animal> {
        self.db.collection(ANIMALS_COLLECTION)
    }

    // Same collection, typed for writes without an `_id`.
    fn drafts(&self) -> Collection<AnimalFields> {
        self.db.collection(ANIMALS_COLLECTION)
    }
}

#[async_trait]
impl AnimalRepository for MongoAnimalRepository {
    async fn find_all(&self) -> Result<Vec<Animal>, ServiceError> {
        let cursor = self.animals().find(None, None).await?;
        let animals: Vec<Animal> = cursor.try_collect().await?;
        Ok(animals)
    }

    async fn find_one(&self, id: AnimalId) -> Result<Option<Animal>, ServiceError> {
        Ok(self.animals().find_one(doc! { "_id": id.object_id() }, None).await?)
    }

    async fn insert_one(&self, fields: AnimalFields) -> Result<AnimalId, ServiceError> {
        let res = self.drafts().insert_one(&fields, None).await?;
        res.inserted_id
            .as_object_id()
            .map(AnimalId::from)
            .ok_or_else(|| ServiceError::Db(format!("unexpected _id type: {}", res.inserted_id)))
    }

    async fn update_one(&self, id: AnimalId, fields: AnimalFields) -> Result<bool, ServiceError> {
        let set = to_document(&fields).map_err(|e| ServiceError::Db(e.to_string()))?;
        let res = self
            .animals()
            .update_one(doc! { "_id": id.object_id() }, doc! { "$set": set }, None)
            .await?;
        Ok(res.matched_count > 0)
    }

    async fn delete_one(&self, id: AnimalId) -> Result<bool, ServiceError> {
        let res = self.animals().delete_one(doc! { "_id": id.object_id() }, None).await?;
        Ok(res.deleted_count > 0)
    }
}
