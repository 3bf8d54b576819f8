//! Application services: orchestrate the student and class aggregates against the
//! repository contracts and translate the outcome into caller-facing DTOs.
//!
//! - `student_service.rs`: student CRUD with external id uniqueness
//! - `class_service.rs`: class CRUD plus roster assignment
//! - `dto.rs`: flattened input/output records
//! - `error.rs`: one closed error enum per service

pub mod class_service;
pub mod dto;
pub mod error;
pub mod student_service;

pub use class_service::SchoolClassService;
pub use dto::{SchoolClassDto, SchoolClassInput, StudentDto, StudentInput};
pub use error::{SchoolClassServiceError, StudentServiceError};
pub use student_service::StudentService;
