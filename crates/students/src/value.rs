//! Value objects owned by the student aggregate.

use serde::{Deserialize, Serialize};

use schoolhub_core::ValueObject;

use crate::student::StudentError;

/// Human-assigned student code (e.g. `"S-2024-017"`).
///
/// Never blank; the stored value is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    pub fn parse(raw: &str) -> Result<Self, StudentError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StudentError::EmptyIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for StudentId {}

impl core::fmt::Display for StudentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StudentId {
    type Error = StudentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for StudentId {
    type Error = StudentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

/// Postal address of a student. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    city: Option<String>,
    street: Option<String>,
    postal_code: Option<String>,
}

impl Address {
    /// Present parts are trimmed; absent parts stay absent.
    pub fn new(city: Option<String>, street: Option<String>, postal_code: Option<String>) -> Self {
        Self {
            city: city.map(trimmed),
            street: street.map(trimmed),
            postal_code: postal_code.map(trimmed),
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }
}

impl ValueObject for Address {}

fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() { s } else { t.to_string() }
}
