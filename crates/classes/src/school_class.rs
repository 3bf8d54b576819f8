use thiserror::Error;

use schoolhub_core::{ClassKey, Entity, StudentKey};

/// Maximum number of students on a class roster.
pub const MAX_STUDENTS: usize = 20;

/// Failures raised by the school class aggregate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchoolClassError {
    #[error("class name cannot be empty")]
    EmptyClassName,
    #[error("teacher cannot be empty")]
    EmptyTeacher,
    #[error("class already has the maximum of {max} students")]
    CapacityExceeded { max: usize },
    #[error("student {0} is already assigned to this class")]
    DuplicateAssignment(StudentKey),
}

/// Aggregate root: SchoolClass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolClass {
    id: ClassKey,
    name: String,
    teacher: String,
    /// Assignment order; no duplicates; at most [`MAX_STUDENTS`].
    student_ids: Vec<StudentKey>,
}

impl SchoolClass {
    /// Create a class with a freshly generated identity and an empty roster.
    pub fn new(name: &str, teacher: &str) -> Result<Self, SchoolClassError> {
        let (name, teacher) = validate(name, teacher)?;
        Ok(Self {
            id: ClassKey::new(),
            name,
            teacher,
            student_ids: Vec::new(),
        })
    }

    /// Rebuild a previously persisted class. Persistence adapters only.
    pub fn rehydrate(id: ClassKey, name: String, teacher: String, student_ids: Vec<StudentKey>) -> Self {
        Self {
            id,
            name,
            teacher,
            student_ids,
        }
    }

    pub fn update(&mut self, name: &str, teacher: &str) -> Result<(), SchoolClassError> {
        let (name, teacher) = validate(name, teacher)?;
        self.name = name;
        self.teacher = teacher;
        Ok(())
    }

    /// Append a student to the roster.
    ///
    /// Capacity is checked before duplication.
    pub fn add_student(&mut self, student: StudentKey) -> Result<(), SchoolClassError> {
        if self.is_full() {
            return Err(SchoolClassError::CapacityExceeded { max: MAX_STUDENTS });
        }
        if self.contains(student) {
            return Err(SchoolClassError::DuplicateAssignment(student));
        }
        self.student_ids.push(student);
        Ok(())
    }

    /// Remove a student from the roster. Absent students are ignored.
    pub fn remove_student(&mut self, student: StudentKey) {
        self.student_ids.retain(|s| *s != student);
    }

    pub fn key(&self) -> ClassKey {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    pub fn student_ids(&self) -> &[StudentKey] {
        &self.student_ids
    }

    pub fn contains(&self, student: StudentKey) -> bool {
        self.student_ids.contains(&student)
    }

    pub fn is_full(&self) -> bool {
        self.student_ids.len() >= MAX_STUDENTS
    }
}

impl Entity for SchoolClass {
    type Id = ClassKey;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn validate(name: &str, teacher: &str) -> Result<(String, String), SchoolClassError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SchoolClassError::EmptyClassName);
    }
    let teacher = teacher.trim();
    if teacher.is_empty() {
        return Err(SchoolClassError::EmptyTeacher);
    }
    Ok((name.to_string(), teacher.to_string()))
}
