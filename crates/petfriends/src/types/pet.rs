//! Pet records as returned by the service

use serde::{Deserialize, Deserializer, Serialize};

/// A pet record. Owned and defined by the service; this is only its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet identifier
    pub id: String,
    /// Name
    pub name: String,
    /// Species/type, free text
    pub animal_type: String,
    /// Age as sent by the service (string or number on the wire)
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    /// Photo as a data URL; `None` when the service sends an empty string
    #[serde(default, deserialize_with = "non_empty_string")]
    pub pet_photo: Option<String>,
    /// Creation timestamp as sent by the service
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub created_at: Option<String>,
    /// Owner identifier
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Pet {
    /// Whether the service holds a photo for this pet.
    pub fn has_photo(&self) -> bool {
        self.pet_photo.is_some()
    }
}

/// Body of `GET api/pets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetList {
    /// Pets matching the filter
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl PetList {
    /// First pet in the list.
    pub fn first(&self) -> Option<&Pet> {
        self.pets.first()
    }

    /// Number of pets.
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

/// Which pets `GET api/pets` should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PetFilter {
    /// Every pet on the service
    #[default]
    All,
    /// Only pets owned by the key's user
    MyPets,
}

impl PetFilter {
    /// Value of the `filter` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

/// Fields sent when creating or updating a pet.
///
/// Values go out verbatim, empty strings included; the service decides what
/// is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFields {
    /// Name
    pub name: String,
    /// Species/type
    pub animal_type: String,
    /// Age
    pub age: String,
}

impl PetFields {
    /// Create pet fields. `age` accepts anything displayable, e.g. `5` or `"4"`.
    pub fn new(
        name: impl Into<String>,
        animal_type: impl Into<String>,
        age: impl ToString,
    ) -> Self {
        Self {
            name: name.into(),
            animal_type: animal_type.into(),
            age: age.to_string(),
        }
    }

    /// All-empty fields, used to probe the service's validation.
    pub fn empty() -> Self {
        Self::new("", "", "")
    }

    /// Field name/value pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, String); 3] {
        [
            ("name", self.name.clone()),
            ("animal_type", self.animal_type.clone()),
            ("age", self.age.clone()),
        ]
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_string_or_number(deserializer).map(Option::unwrap_or_default)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
