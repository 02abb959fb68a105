use std::sync::Arc;

use models::{validate_new_animal, Animal, AnimalFields, AnimalId, ValidationErrors};
use tracing::{info, instrument, warn};

use super::repository::AnimalRepository;
use crate::errors::ServiceError;

/// Result of a create submission.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(AnimalId),
    /// Nothing was written; the submitted values come back for re-display.
    Rejected { errors: ValidationErrors, submitted: AnimalFields },
}

/// Application service for animal records.
///
/// Validation applies to create only; update replaces fields as submitted.
#[derive(Clone)]
pub struct AnimalService {
    repo: Arc<dyn AnimalRepository>,
}

impl AnimalService {
    pub fn new(repo: Arc<dyn AnimalRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Animal>, ServiceError> {
        self.repo.find_all().await
    }

    /// Fails with `InvalidId` for a malformed id and `NotFound` for an absent record.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Animal, ServiceError> {
        let id: AnimalId = id.parse()?;
        self.repo
            .find_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("animal", id))
    }

    #[instrument(skip_all)]
    pub async fn create(&self, fields: AnimalFields) -> Result<CreateOutcome, ServiceError> {
        let errors = validate_new_animal(&fields);
        if !errors.is_empty() {
            info!(violations = ?errors.codes(), "animal_create_rejected");
            return Ok(CreateOutcome::Rejected { errors, submitted: fields });
        }
        let id = self.repo.insert_one(fields).await?;
        info!(animal_id = %id, "animal_created");
        Ok(CreateOutcome::Created(id))
    }

    /// Returns whether a record matched; an unmatched id is not an error.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: &str, fields: AnimalFields) -> Result<bool, ServiceError> {
        let id: AnimalId = id.parse()?;
        let matched = self.repo.update_one(id, fields).await?;
        if matched {
            info!(animal_id = %id, "animal_updated");
        } else {
            warn!(animal_id = %id, "animal_update_no_match");
        }
        Ok(matched)
    }

    /// Returns whether a record was removed; deleting twice is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id: AnimalId = id.parse()?;
        let deleted = self.repo.delete_one(id).await?;
        if deleted {
            info!(animal_id = %id, "animal_deleted");
        } else {
            warn!(animal_id = %id, "animal_delete_no_match");
        }
        Ok(deleted)
    }
}
