//! Service-level failures.
//!
//! Every variant is an expected, caller-recoverable outcome. Callers match on the
//! variant, never on the message text.

use thiserror::Error;

use schoolhub_classes::SchoolClassError;
use schoolhub_infra::RepositoryError;
use schoolhub_students::StudentError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudentServiceError {
    #[error("student not found")]
    StudentNotFound,
    #[error("student id must be unique")]
    DuplicateStudentId,
    #[error(transparent)]
    Domain(#[from] StudentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchoolClassServiceError {
    #[error("class not found")]
    ClassNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error(transparent)]
    Domain(#[from] SchoolClassError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
