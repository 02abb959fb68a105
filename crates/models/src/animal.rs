use std::{fmt, str::FromStr};

use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;

/// Store-generated identifier of an animal document (`_id`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(ObjectId);

impl AnimalId {
    /// Fresh identifier, for stores that do not generate their own.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for AnimalId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for AnimalId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// The four user-editable fields, exactly as submitted.
///
/// Used both as the form payload and as the document body written to the
/// store. Fields missing from a submission deserialize as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    /// Kept as text; never normalized.
    #[serde(default)]
    pub age: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl AnimalFields {
    pub fn new(
        name: impl Into<String>,
        breed: impl Into<String>,
        age: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), breed: breed.into(), age: age.into(), kind: kind.into() }
    }

    /// Build from decoded form pairs. The first value of a repeated key wins;
    /// unknown keys are ignored and absent ones stay empty.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut slots: [Option<String>; 4] = Default::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut slots[0],
                "breed" => &mut slots[1],
                "age" => &mut slots[2],
                "type" => &mut slots[3],
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        let [name, breed, age, kind] = slots.map(Option::unwrap_or_default);
        Self { name, breed, age, kind }
    }
}

/// A persisted animal record.
///
/// Reads are lenient: stored fields that are null or not strings (older
/// documents may carry either) come back as text instead of failing the read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    #[serde(rename = "_id")]
    pub id: AnimalId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub breed: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: String,
}

/// Null/undefined become `""`, scalars their plain text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Bson::deserialize(deserializer)? {
        Bson::String(s) => s,
        Bson::Null | Bson::Undefined => String::new(),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        Bson::Double(f) => f.to_string(),
        Bson::Boolean(b) => b.to_string(),
        other => other.to_string(),
    };
    Ok(text)
}

impl Animal {
    pub fn from_fields(id: AnimalId, fields: AnimalFields) -> Self {
        Self { id, name: fields.name, breed: fields.breed, age: fields.age, kind: fields.kind }
    }

    pub fn fields(&self) -> AnimalFields {
        AnimalFields::new(&self.name, &self.breed, &self.age, &self.kind)
    }

    /// Overwrite every editable field.
    pub fn replace_fields(&mut self, fields: AnimalFields) {
        self.name = fields.name;
        self.breed = fields.breed;
        self.age = fields.age;
        self.kind = fields.kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn id_round_trips_through_hex() {
        let id = AnimalId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 24);
        assert_eq!(text.parse::<AnimalId>().unwrap(), id);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for bad in ["", "123", "not-an-object-id", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert!(matches!(bad.parse::<AnimalId>(), Err(ModelError::InvalidId(_))), "{bad}");
        }
    }

    #[test]
    fn kind_is_stored_under_type_key() {
        let doc = bson::to_document(&AnimalFields::new("Rex", "Labrador", "3", "Dog")).unwrap();
        assert_eq!(doc.get_str("type").unwrap(), "Dog");
        assert_eq!(doc.get_str("age").unwrap(), "3");
        assert!(doc.get("kind").is_none());
    }

    #[test]
    fn animal_reads_from_document_with_object_id() {
        let oid = bson::oid::ObjectId::new();
        let doc = bson::doc! { "_id": oid, "name": "Rex", "breed": "Labrador", "age": "3", "type": "Dog" };
        let animal: Animal = bson::from_document(doc).unwrap();
        assert_eq!(animal.id, AnimalId::from(oid));
        assert_eq!(animal.kind, "Dog");
        assert_eq!(animal.fields(), AnimalFields::new("Rex", "Labrador", "3", "Dog"));
    }

    #[test]
    fn non_string_stored_fields_are_read_as_text() {
        let oid = bson::oid::ObjectId::new();
        let doc = bson::doc! {
            "_id": oid, "name": "Rexy", "breed": bson::Bson::Null, "age": 3, "type": "Dog"
        };
        let animal: Animal = bson::from_document(doc).unwrap();
        assert_eq!(animal.breed, "");
        assert_eq!(animal.age, "3");

        let doc = bson::doc! { "_id": oid, "name": "Rexy", "age": 2.5_f64, "type": bson::Bson::Null };
        let animal: Animal = bson::from_document(doc).unwrap();
        assert_eq!(animal.age, "2.5");
        assert_eq!(animal.kind, "");
        assert_eq!(animal.breed, "");
    }

    #[test]
    fn first_form_value_wins() {
        let pairs = [("name", "Rexy"), ("name", "ab"), ("colour", "red"), ("type", "Dog"), ("age", "3")]
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let fields = AnimalFields::from_pairs(pairs);
        assert_eq!(fields, AnimalFields::new("Rexy", "", "3", "Dog"));
    }

    #[test]
    fn missing_form_fields_default_to_empty() {
        let fields: AnimalFields = serde_json::from_str(r#"{"name":"Rex"}"#).unwrap();
        assert_eq!(fields.name, "Rex");
        assert!(fields.breed.is_empty() && fields.age.is_empty() && fields.kind.is_empty());
    }
}
