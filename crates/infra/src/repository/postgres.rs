//! Postgres-backed repositories.
//!
//! Students and classes live in two tables. The class roster is a `UUID[]` column so
//! the assignment order survives a round trip.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use schoolhub_classes::SchoolClass;
use schoolhub_core::{ClassKey, StudentKey};
use schoolhub_students::{Address, Student, StudentId};

use super::{RepositoryError, SchoolClassRepository, StudentRepository};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    seq          BIGSERIAL,
    id           UUID PRIMARY KEY,
    student_id   TEXT NOT NULL UNIQUE,
    first_name   VARCHAR(50) NOT NULL,
    last_name    VARCHAR(50) NOT NULL,
    birth_date   DATE NOT NULL,
    city         VARCHAR(100),
    street       VARCHAR(100),
    postal_code  VARCHAR(20)
);

CREATE TABLE IF NOT EXISTS school_classes (
    seq          BIGSERIAL,
    id           UUID PRIMARY KEY,
    name         VARCHAR(100) NOT NULL,
    teacher      VARCHAR(100) NOT NULL,
    student_ids  UUID[] NOT NULL DEFAULT '{}'
);
"#;

/// Create both tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await.map_err(storage)?;
    Ok(())
}

fn storage(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return RepositoryError::AlreadyExists(db.message().to_string());
        }
    }
    tracing::warn!(error = %err, "postgres repository call failed");
    RepositoryError::Storage(err.to_string())
}

fn require_affected(rows: u64, id: impl ToString) -> Result<(), RepositoryError> {
    if rows == 0 {
        return Err(RepositoryError::NotFound(id.to_string()));
    }
    Ok(())
}

const STUDENT_COLUMNS: &str =
    "id, student_id, first_name, last_name, birth_date, city, street, postal_code";

/// Postgres-backed student store.
#[derive(Debug, Clone)]
pub struct PostgresStudentRepository {
    pool: PgPool,
}

impl PostgresStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_student(row: &PgRow) -> Result<Student, RepositoryError> {
        let id: Uuid = row.try_get("id").map_err(storage)?;
        let code: String = row.try_get("student_id").map_err(storage)?;
        let student_id = StudentId::parse(&code)
            .map_err(|e| RepositoryError::Storage(format!("stored student {id}: {e}")))?;

        Ok(Student::rehydrate(
            StudentKey::from_uuid(id),
            student_id,
            row.try_get("first_name").map_err(storage)?,
            row.try_get("last_name").map_err(storage)?,
            row.try_get("birth_date").map_err(storage)?,
            Address::new(
                row.try_get("city").map_err(storage)?,
                row.try_get("street").map_err(storage)?,
                row.try_get("postal_code").map_err(storage)?,
            ),
        ))
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn get_by_id(&self, id: StudentKey) -> Result<Option<Student>, RepositoryError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(Self::row_to_student).transpose()
    }

    async fn get_by_student_id(&self, value: &str) -> Result<Option<Student>, RepositoryError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(Self::row_to_student).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Student>, RepositoryError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY seq");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await.map_err(storage)?;
        rows.iter().map(Self::row_to_student).collect()
    }

    async fn add(&self, student: &Student) -> Result<(), RepositoryError> {
        let address = student.address();
        sqlx::query(
            r#"
            INSERT INTO students (id, student_id, first_name, last_name, birth_date, city, street, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(*student.key().as_uuid())
        .bind(student.student_id().as_str())
        .bind(student.first_name())
        .bind(student.last_name())
        .bind(student.birth_date())
        .bind(address.city())
        .bind(address.street())
        .bind(address.postal_code())
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        let address = student.address();
        let result = sqlx::query(
            r#"
            UPDATE students
            SET student_id = $2, first_name = $3, last_name = $4, birth_date = $5,
                city = $6, street = $7, postal_code = $8
            WHERE id = $1
            "#,
        )
        .bind(*student.key().as_uuid())
        .bind(student.student_id().as_str())
        .bind(student.first_name())
        .bind(student.last_name())
        .bind(student.birth_date())
        .bind(address.city())
        .bind(address.street())
        .bind(address.postal_code())
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        require_affected(result.rows_affected(), student.key())
    }

    async fn remove(&self, student: &Student) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(*student.key().as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        require_affected(result.rows_affected(), student.key())
    }
}

/// Postgres-backed school class store.
#[derive(Debug, Clone)]
pub struct PostgresSchoolClassRepository {
    pool: PgPool,
}

impl PostgresSchoolClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_class(row: &PgRow) -> Result<SchoolClass, RepositoryError> {
        let id: Uuid = row.try_get("id").map_err(storage)?;
        let roster: Vec<Uuid> = row.try_get("student_ids").map_err(storage)?;
        Ok(SchoolClass::rehydrate(
            ClassKey::from_uuid(id),
            row.try_get("name").map_err(storage)?,
            row.try_get("teacher").map_err(storage)?,
            roster.into_iter().map(StudentKey::from_uuid).collect(),
        ))
    }

    fn roster(class: &SchoolClass) -> Vec<Uuid> {
        class.student_ids().iter().map(|s| *s.as_uuid()).collect()
    }
}

#[async_trait]
impl SchoolClassRepository for PostgresSchoolClassRepository {
    async fn get_by_id(&self, id: ClassKey) -> Result<Option<SchoolClass>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, teacher, student_ids FROM school_classes WHERE id = $1")
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.as_ref().map(Self::row_to_class).transpose()
    }

    async fn get_all(&self) -> Result<Vec<SchoolClass>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, teacher, student_ids FROM school_classes ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter().map(Self::row_to_class).collect()
    }

    async fn add(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO school_classes (id, name, teacher, student_ids) VALUES ($1, $2, $3, $4)")
            .bind(*class.key().as_uuid())
            .bind(class.name())
            .bind(class.teacher())
            .bind(Self::roster(class))
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn update(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE school_classes SET name = $2, teacher = $3, student_ids = $4 WHERE id = $1",
        )
        .bind(*class.key().as_uuid())
        .bind(class.name())
        .bind(class.teacher())
        .bind(Self::roster(class))
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        require_affected(result.rows_affected(), class.key())
    }

    async fn remove(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM school_classes WHERE id = $1")
            .bind(*class.key().as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        require_affected(result.rows_affected(), class.key())
    }
}
