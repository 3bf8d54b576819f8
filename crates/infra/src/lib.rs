//! Infrastructure layer: persistence adapters behind the repository contracts.

pub mod repository;

pub use repository::{
    InMemorySchoolClassRepository, InMemoryStudentRepository, RepositoryError, SchoolClassRepository,
    StudentRepository,
};

#[cfg(feature = "postgres")]
pub use repository::postgres::{PostgresSchoolClassRepository, PostgresStudentRepository, ensure_schema};
