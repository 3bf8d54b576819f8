//! Student use cases.

use schoolhub_core::StudentKey;
use schoolhub_infra::StudentRepository;
use schoolhub_students::{Address, Student, StudentDetails, StudentId};

use crate::dto::{StudentDto, StudentInput};
use crate::error::StudentServiceError;

type Result<T> = std::result::Result<T, StudentServiceError>;

/// Orchestrates the student aggregate against a [`StudentRepository`].
///
/// Nothing is written to the repository until every check has passed, so a failed
/// call never leaves a partial change behind.
#[derive(Debug, Clone)]
pub struct StudentService<R> {
    students: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(students: R) -> Self {
        Self { students }
    }

    pub async fn get_all(&self) -> Result<Vec<StudentDto>> {
        tracing::debug!("listing students");
        let students = self.students.get_all().await?;
        Ok(students.iter().map(StudentDto::from).collect())
    }

    pub async fn get_by_id(&self, id: StudentKey) -> Result<StudentDto> {
        tracing::debug!(%id, "loading student");
        let student = self.load(id).await?;
        Ok(StudentDto::from(&student))
    }

    /// Look up by the human-assigned student code. Surrounding whitespace is ignored.
    pub async fn get_by_student_id(&self, value: &str) -> Result<StudentDto> {
        tracing::debug!(student_id = value.trim(), "looking up student by code");
        let student = self
            .students
            .get_by_student_id(value.trim())
            .await?
            .ok_or(StudentServiceError::StudentNotFound)?;
        Ok(StudentDto::from(&student))
    }

    pub async fn create(&self, input: StudentInput) -> Result<StudentDto> {
        tracing::debug!(student_id = %input.student_id, "creating student");

        if self.students.get_by_student_id(input.student_id.trim()).await?.is_some() {
            tracing::warn!(student_id = %input.student_id, "student id already taken");
            return Err(StudentServiceError::DuplicateStudentId);
        }

        let student = Student::new(details(input)?).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected student");
        })?;
        self.students.add(&student).await?;

        tracing::info!(id = %student.key(), student_id = %student.student_id(), "student created");
        Ok(StudentDto::from(&student))
    }

    pub async fn update(&self, id: StudentKey, input: StudentInput) -> Result<StudentDto> {
        tracing::debug!(%id, "updating student");
        let mut student = self.load(id).await?;

        // The same record keeping its own code is not a conflict.
        if let Some(existing) = self.students.get_by_student_id(input.student_id.trim()).await? {
            if existing.key() != id {
                tracing::warn!(%id, student_id = %input.student_id, "student id already taken");
                return Err(StudentServiceError::DuplicateStudentId);
            }
        }

        student.update(details(input)?).inspect_err(|e| {
            tracing::warn!(%id, error = %e, "rejected student update");
        })?;
        self.students.update(&student).await?;

        tracing::info!(%id, "student updated");
        Ok(StudentDto::from(&student))
    }

    pub async fn delete(&self, id: StudentKey) -> Result<()> {
        tracing::debug!(%id, "deleting student");
        let student = self.load(id).await?;
        self.students.remove(&student).await?;
        tracing::info!(%id, "student deleted");
        Ok(())
    }

    async fn load(&self, id: StudentKey) -> Result<Student> {
        self.students
            .get_by_id(id)
            .await?
            .ok_or(StudentServiceError::StudentNotFound)
    }
}

fn details(input: StudentInput) -> Result<StudentDetails> {
    let student_id = StudentId::parse(&input.student_id)?;
    Ok(StudentDetails {
        student_id: Some(student_id),
        first_name: input.first_name,
        last_name: input.last_name,
        birth_date: input.birth_date,
        address: Address::new(input.city, input.street, input.postal_code),
    })
}
