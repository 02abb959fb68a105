//! Domain model for the shelter's animal records.
//! - `animal`: the stored record, its identifier and the submitted field set.
//! - `validation`: create-time checks that accumulate every violation.
//! - `db`: MongoDB connection helper.

pub mod errors;
pub mod db;
pub mod animal;
pub mod validation;

pub use animal::{Animal, AnimalFields, AnimalId};
pub use validation::{validate_new_animal, ValidationErrors, ViolationCode};
