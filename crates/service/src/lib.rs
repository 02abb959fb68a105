//! Service layer for animal records.
//! - `animal::repository`: the store seam plus its MongoDB implementation.
//! - `animal::memory`: an in-process store for tests and local runs.
//! - `animal::service`: create-time validation and id handling on top of a store.

pub mod errors;
pub mod animal;

pub use animal::{
    memory::InMemoryAnimalRepository,
    repository::{AnimalRepository, MongoAnimalRepository},
    service::{AnimalService, CreateOutcome},
};
