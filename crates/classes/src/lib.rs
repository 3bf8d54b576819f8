//! School classes domain module.
//!
//! A class carries its name, its teacher and a bounded roster of student identities.
//! Student existence is not checked here; the roster only holds opaque keys.

pub mod school_class;

pub use school_class::{MAX_STUDENTS, SchoolClass, SchoolClassError};
