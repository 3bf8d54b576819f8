use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use schoolhub_classes::SchoolClass;
use schoolhub_core::{ClassKey, StudentKey};
use schoolhub_students::Student;

// -------------------------
// Inputs
// -------------------------

/// Raw student fields as supplied by a caller (create and update share the shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInput {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClassInput {
    pub name: String,
    pub teacher: String,
}

// -------------------------
// Outputs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: StudentKey,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClassDto {
    pub id: ClassKey,
    pub name: String,
    pub teacher: String,
    pub student_ids: Vec<StudentKey>,
}

impl From<&Student> for StudentDto {
    fn from(s: &Student) -> Self {
        let address = s.address();
        Self {
            id: s.key(),
            student_id: s.student_id().to_string(),
            first_name: s.first_name().to_string(),
            last_name: s.last_name().to_string(),
            birth_date: s.birth_date(),
            city: address.city().map(str::to_string),
            street: address.street().map(str::to_string),
            postal_code: address.postal_code().map(str::to_string),
        }
    }
}

impl From<&SchoolClass> for SchoolClassDto {
    fn from(c: &SchoolClass) -> Self {
        Self {
            id: c.key(),
            name: c.name().to_string(),
            teacher: c.teacher().to_string(),
            student_ids: c.student_ids().to_vec(),
        }
    }
}
