use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn generate() -> Self {
        Self(format!("id_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The mutable part of a record: everything except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub age: u32,
    pub email: String,
}

/// One persisted roster entry. Serialized as `{id, name, age, email}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl StudentRecord {
    pub fn new(id: StudentId, fields: StudentFields) -> Self {
        Self {
            id,
            name: fields.name,
            age: fields.age,
            email: fields.email,
        }
    }

    pub fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            age: self.age,
            email: self.email.clone(),
        }
    }

    /// Replaces every field except `id`.
    pub fn apply(&mut self, fields: StudentFields) {
        self.name = fields.name;
        self.age = fields.age;
        self.email = fields.email;
    }
}

/// Deserialized through [`FromStr`](std::str::FromStr), so settings accept the same
/// spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SortMode {
    #[default]
    Name,
    Age,
    Email,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Name, SortMode::Age, SortMode::Email];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::Age => "age",
            SortMode::Email => "email",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortMode {
    type Err = crate::error::UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| crate::error::UnknownSortMode(trimmed.to_string()))
    }
}

impl TryFrom<String> for SortMode {
    type Error = crate::error::UnknownSortMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
