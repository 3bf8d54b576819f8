use chrono::NaiveDate;
use thiserror::Error;

use schoolhub_core::{Entity, StudentKey};

use crate::value::{Address, StudentId};

/// Validation failures raised by the student aggregate and its value objects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StudentError {
    #[error("student id cannot be empty")]
    EmptyIdentifier,
    #[error("first name cannot be empty")]
    EmptyFirstName,
    #[error("last name cannot be empty")]
    EmptyLastName,
    #[error("student id is required")]
    MissingStudentId,
}

/// Everything a caller supplies when creating or editing a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub student_id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Address,
}

/// Validated copy of [`StudentDetails`], ready to be swapped into the entity.
struct ValidDetails {
    student_id: StudentId,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    address: Address,
}

impl StudentDetails {
    fn validate(self) -> Result<ValidDetails, StudentError> {
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(StudentError::EmptyFirstName);
        }
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            return Err(StudentError::EmptyLastName);
        }
        let student_id = self.student_id.ok_or(StudentError::MissingStudentId)?;

        Ok(ValidDetails {
            student_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date: self.birth_date,
            address: self.address,
        })
    }
}

/// Aggregate root: Student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentKey,
    student_id: StudentId,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    address: Address,
}

impl Student {
    /// Create a student with a freshly generated identity.
    pub fn new(details: StudentDetails) -> Result<Self, StudentError> {
        let valid = details.validate()?;
        Ok(Self::from_valid(StudentKey::new(), valid))
    }

    /// Rebuild a previously persisted student. Persistence adapters only.
    pub fn rehydrate(
        id: StudentKey,
        student_id: StudentId,
        first_name: String,
        last_name: String,
        birth_date: NaiveDate,
        address: Address,
    ) -> Self {
        Self {
            id,
            student_id,
            first_name,
            last_name,
            birth_date,
            address,
        }
    }

    /// Replace all mutable fields. Nothing is written unless every field is valid.
    pub fn update(&mut self, details: StudentDetails) -> Result<(), StudentError> {
        let valid = details.validate()?;
        *self = Self::from_valid(self.id, valid);
        Ok(())
    }

    fn from_valid(id: StudentKey, valid: ValidDetails) -> Self {
        Self {
            id,
            student_id: valid.student_id,
            first_name: valid.first_name,
            last_name: valid.last_name,
            birth_date: valid.birth_date,
            address: valid.address,
        }
    }

    pub fn key(&self) -> StudentKey {
        self.id
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl Entity for Student {
    type Id = StudentKey;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2010, 4, 12).unwrap()
    }

    fn details(student_id: &str, first: &str, last: &str) -> StudentDetails {
        StudentDetails {
            student_id: Some(StudentId::parse(student_id).unwrap()),
            first_name: first.to_string(),
            last_name: last.to_string(),
            birth_date: birth_date(),
            address: Address::new(Some("Oslo".to_string()), None, None),
        }
    }

    #[test]
    fn new_trims_names_and_keeps_fields() {
        let student = Student::new(details("S-1", "  Ada ", " Lovelace  ")).unwrap();
        assert_eq!(student.student_id().as_str(), "S-1");
        assert_eq!(student.first_name(), "Ada");
        assert_eq!(student.last_name(), "Lovelace");
        assert_eq!(student.birth_date(), birth_date());
        assert_eq!(student.address().city(), Some("Oslo"));
    }

    #[test]
    fn new_generates_distinct_identities() {
        let a = Student::new(details("S-1", "Ada", "Lovelace")).unwrap();
        let b = Student::new(details("S-1", "Ada", "Lovelace")).unwrap();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.id(), a.key());
    }

    #[test]
    fn new_rejects_blank_first_name() {
        let err = Student::new(details("S-1", "   ", "Lovelace")).unwrap_err();
        assert_eq!(err, StudentError::EmptyFirstName);
    }

    #[test]
    fn new_rejects_blank_last_name() {
        let err = Student::new(details("S-1", "Ada", "")).unwrap_err();
        assert_eq!(err, StudentError::EmptyLastName);
    }

    #[test]
    fn new_rejects_missing_student_id() {
        let mut d = details("S-1", "Ada", "Lovelace");
        d.student_id = None;
        assert_eq!(Student::new(d).unwrap_err(), StudentError::MissingStudentId);
    }

    #[test]
    fn first_name_is_checked_before_the_other_fields() {
        let d = StudentDetails {
            student_id: None,
            first_name: String::new(),
            last_name: String::new(),
            birth_date: birth_date(),
            address: Address::default(),
        };
        assert_eq!(Student::new(d).unwrap_err(), StudentError::EmptyFirstName);
    }

    #[test]
    fn update_replaces_all_fields_and_keeps_identity() {
        let mut student = Student::new(details("S-1", "Ada", "Lovelace")).unwrap();
        let key = student.key();
        let new_date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();

        student
            .update(StudentDetails {
                student_id: Some(StudentId::parse("S-2").unwrap()),
                first_name: " Grace".to_string(),
                last_name: "Hopper ".to_string(),
                birth_date: new_date,
                address: Address::default(),
            })
            .unwrap();

        assert_eq!(student.key(), key);
        assert_eq!(student.student_id().as_str(), "S-2");
        assert_eq!(student.first_name(), "Grace");
        assert_eq!(student.last_name(), "Hopper");
        assert_eq!(student.birth_date(), new_date);
        assert_eq!(student.address(), &Address::default());
    }

    #[test]
    fn failed_update_leaves_student_untouched() {
        let mut student = Student::new(details("S-1", "Ada", "Lovelace")).unwrap();
        let before = student.clone();

        let mut d = details("S-9", "Grace", "Hopper");
        d.last_name = "  ".to_string();
        assert_eq!(student.update(d).unwrap_err(), StudentError::EmptyLastName);
        assert_eq!(student, before);

        let mut d = details("S-9", "Grace", "Hopper");
        d.student_id = None;
        assert_eq!(student.update(d).unwrap_err(), StudentError::MissingStudentId);
        assert_eq!(student, before);
    }
}
