//! Students domain module.
//!
//! Business rules for students, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod student;
pub mod value;

pub use student::{Student, StudentDetails, StudentError};
pub use value::{Address, StudentId};
