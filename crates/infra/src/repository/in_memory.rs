//! In-memory repositories for tests/dev.

use std::fmt::Display;
use std::sync::RwLock;

use async_trait::async_trait;

use schoolhub_classes::SchoolClass;
use schoolhub_core::{ClassKey, Entity, StudentKey};
use schoolhub_students::Student;

use super::{RepositoryError, SchoolClassRepository, StudentRepository};

/// Ordered entity list keyed by entity identity.
#[derive(Debug)]
struct EntityStore<E> {
    inner: RwLock<Vec<E>>,
}

impl<E> EntityStore<E>
where
    E: Entity + Clone,
    E::Id: Display,
{
    fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }

    fn find(&self, pred: impl Fn(&E) -> bool) -> Result<Option<E>, RepositoryError> {
        let items = self.inner.read().map_err(|_| poisoned())?;
        Ok(items.iter().find(|e| pred(e)).cloned())
    }

    fn all(&self) -> Result<Vec<E>, RepositoryError> {
        let items = self.inner.read().map_err(|_| poisoned())?;
        Ok(items.clone())
    }

    fn insert(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut items = self.inner.write().map_err(|_| poisoned())?;
        if items.iter().any(|e| e.id() == entity.id()) {
            return Err(RepositoryError::AlreadyExists(entity.id().to_string()));
        }
        items.push(entity.clone());
        Ok(())
    }

    fn replace(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut items = self.inner.write().map_err(|_| poisoned())?;
        let slot = items
            .iter_mut()
            .find(|e| e.id() == entity.id())
            .ok_or_else(|| RepositoryError::NotFound(entity.id().to_string()))?;
        *slot = entity.clone();
        Ok(())
    }

    fn delete(&self, id: E::Id) -> Result<(), RepositoryError> {
        let mut items = self.inner.write().map_err(|_| poisoned())?;
        let pos = items
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        items.remove(pos);
        Ok(())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("in-memory store lock poisoned".to_string())
}

/// In-memory student store.
#[derive(Debug)]
pub struct InMemoryStudentRepository {
    store: EntityStore<Student>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(),
        }
    }
}

impl Default for InMemoryStudentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn get_by_id(&self, id: StudentKey) -> Result<Option<Student>, RepositoryError> {
        self.store.find(|s| s.key() == id)
    }

    async fn get_by_student_id(&self, value: &str) -> Result<Option<Student>, RepositoryError> {
        self.store.find(|s| s.student_id().as_str() == value)
    }

    async fn get_all(&self) -> Result<Vec<Student>, RepositoryError> {
        self.store.all()
    }

    async fn add(&self, student: &Student) -> Result<(), RepositoryError> {
        self.store.insert(student)
    }

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        self.store.replace(student)
    }

    async fn remove(&self, student: &Student) -> Result<(), RepositoryError> {
        self.store.delete(student.key())
    }
}

/// In-memory school class store.
#[derive(Debug)]
pub struct InMemorySchoolClassRepository {
    store: EntityStore<SchoolClass>,
}

impl InMemorySchoolClassRepository {
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(),
        }
    }
}

impl Default for InMemorySchoolClassRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchoolClassRepository for InMemorySchoolClassRepository {
    async fn get_by_id(&self, id: ClassKey) -> Result<Option<SchoolClass>, RepositoryError> {
        self.store.find(|c| c.key() == id)
    }

    async fn get_all(&self) -> Result<Vec<SchoolClass>, RepositoryError> {
        self.store.all()
    }

    async fn add(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        self.store.insert(class)
    }

    async fn update(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        self.store.replace(class)
    }

    async fn remove(&self, class: &SchoolClass) -> Result<(), RepositoryError> {
        self.store.delete(class.key())
    }
}
