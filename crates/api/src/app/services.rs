//! Service wiring: pick the repositories, build the application services.

use std::sync::Arc;

use schoolhub_application::{SchoolClassService, StudentService};
use schoolhub_infra::{
    InMemorySchoolClassRepository, InMemoryStudentRepository, SchoolClassRepository, StudentRepository,
};

use crate::config::StoreConfig;

pub type StudentStore = Arc<dyn StudentRepository>;
pub type ClassStore = Arc<dyn SchoolClassRepository>;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    pub students: StudentService<StudentStore>,
    pub classes: SchoolClassService<ClassStore, StudentStore>,
}

impl AppServices {
    pub fn new(students: StudentStore, classes: ClassStore) -> Self {
        Self {
            students: StudentService::new(students.clone()),
            classes: SchoolClassService::new(classes, students),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStudentRepository::new()),
            Arc::new(InMemorySchoolClassRepository::new()),
        )
    }
}

pub async fn build_services(store: &StoreConfig) -> anyhow::Result<AppServices> {
    match store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory stores");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres { database_url } => build_persistent_services(database_url).await,
    }
}

#[cfg(feature = "postgres")]
async fn build_persistent_services(database_url: &str) -> anyhow::Result<AppServices> {
    use anyhow::Context;
    use schoolhub_infra::{PostgresSchoolClassRepository, PostgresStudentRepository, ensure_schema};

    let pool = sqlx::PgPool::connect(database_url)
        .await
        .context("failed to connect to Postgres")?;
    ensure_schema(&pool).await.context("failed to prepare schema")?;

    tracing::info!("using postgres stores");
    Ok(AppServices::new(
        Arc::new(PostgresStudentRepository::new(pool.clone())),
        Arc::new(PostgresSchoolClassRepository::new(pool)),
    ))
}

#[cfg(not(feature = "postgres"))]
async fn build_persistent_services(_database_url: &str) -> anyhow::Result<AppServices> {
    tracing::warn!("USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory");
    Ok(AppServices::in_memory())
}
