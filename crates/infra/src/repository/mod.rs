//! Repository contracts consumed by the application services.
//!
//! Each contract is a narrow CRUD surface over one aggregate type. Implementations
//! hand out owned copies: mutating a loaded entity has no effect until it is passed
//! back through `update`.

use std::sync::Arc;

use async_trait::async_trait;

use schoolhub_classes::SchoolClass;
use schoolhub_core::{ClassKey, StudentKey};
use schoolhub_students::Student;

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::{InMemorySchoolClassRepository, InMemoryStudentRepository};

/// Persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    AlreadyExists(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn get_by_id(&self, id: StudentKey) -> Result<Option<Student>, RepositoryError>;

    /// Look up by the human-assigned student code (exact match).
    async fn get_by_student_id(&self, value: &str) -> Result<Option<Student>, RepositoryError>;

    /// All students, in insertion order.
    async fn get_all(&self) -> Result<Vec<Student>, RepositoryError>;

    async fn add(&self, student: &Student) -> Result<(), RepositoryError>;

    async fn update(&self, student: &Student) -> Result<(), RepositoryError>;

    async fn remove(&self, student: &Student) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait SchoolClassRepository: Send + Sync {
    async fn get_by_id(&self, id: ClassKey) -> Result<Option<SchoolClass>, RepositoryError>;

    /// All classes, in insertion order.
    async fn get_all(&self) -> Result<Vec<SchoolClass>, RepositoryError>;

    async fn add(&self, class: &SchoolClass) -> Result<(), RepositoryError>;

    async fn update(&self, class: &SchoolClass) -> Result<(), RepositoryError>;

    async fn remove(&self, class: &SchoolClass) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<S> StudentRepository for Arc<S>
where
    S: StudentRepository + ?Sized,
{
    async fn get_by_id(&self, id: StudentKey) -> Result<Option<Student>, RepositoryError> {
        (**self).get_by_id(id).await
    }

    async fn get_by_student_id(&self, value: &str) -> Result<Option<Student>, RepositoryError> {
        (**self).get_by_student_id(value).await
    }

    async fn get_all(&self) -> Result<Vec<Student>, RepositoryError> {
        (**self).get_all().await
    }

    async fn add(&self, student: &Student) -> Result<(), RepositoryError> {
        (**self).add(student).await
    }

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        (**self).update(student).await
    }

    async fn remove(&self, student: &Student) -> Result<(), RepositoryError> {
        (**self).remove(student).await
    }
}

#[async_trait]
impl<S> SchoolClassRepository for Arc<S>
where
    S: SchoolClassRepository + ?Sized,
{
    async fn get_by_id(&self, id: ClassKey) -> Result<Option<SchoolClass>, RepositoryError> {
        (**self).get_by_id(id).await
    }

    async fn get_all(&self) -> Result<Vec<SchoolClass>, RepositoryError> {
        (**self).get_all().await
    }

    async fn add(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        (**self).add(class).await
    }

    async fn update(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        (**self).update(class).await
    }

    async fn remove(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        (**self).remove(class).await
    }
}
