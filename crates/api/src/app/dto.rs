use chrono::NaiveDate;
use serde::Deserialize;

use schoolhub_application::{SchoolClassInput, StudentInput};

// -------------------------
// Request DTOs
// -------------------------
//
// Missing text fields default to "" so they are rejected by the domain's own
// validation instead of failing body parsing.

#[derive(Debug, Deserialize)]
pub struct StudentRequest {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

impl From<StudentRequest> for StudentInput {
    fn from(req: StudentRequest) -> Self {
        Self {
            student_id: req.student_id,
            first_name: req.first_name,
            last_name: req.last_name,
            birth_date: req.birth_date,
            city: req.city,
            street: req.street,
            postal_code: req.postal_code,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SchoolClassRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub teacher: String,
}

impl From<SchoolClassRequest> for SchoolClassInput {
    fn from(req: SchoolClassRequest) -> Self {
        Self {
            name: req.name,
            teacher: req.teacher,
        }
    }
}
