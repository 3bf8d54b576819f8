//! School class use cases, including roster assignment.

use schoolhub_classes::SchoolClass;
use schoolhub_core::{ClassKey, StudentKey};
use schoolhub_infra::{SchoolClassRepository, StudentRepository};

use crate::dto::{SchoolClassDto, SchoolClassInput};
use crate::error::SchoolClassServiceError;

type Result<T> = std::result::Result<T, SchoolClassServiceError>;

/// Orchestrates the class aggregate against a [`SchoolClassRepository`].
///
/// Student existence is resolved through the [`StudentRepository`]; the class only
/// ever stores student keys.
#[derive(Debug, Clone)]
pub struct SchoolClassService<C, S> {
    classes: C,
    students: S,
}

impl<C, S> SchoolClassService<C, S>
where
    C: SchoolClassRepository,
    S: StudentRepository,
{
    pub fn new(classes: C, students: S) -> Self {
        Self { classes, students }
    }

    pub async fn get_all(&self) -> Result<Vec<SchoolClassDto>> {
        tracing::debug!("listing classes");
        let classes = self.classes.get_all().await?;
        Ok(classes.iter().map(SchoolClassDto::from).collect())
    }

    pub async fn get_by_id(&self, id: ClassKey) -> Result<SchoolClassDto> {
        tracing::debug!(%id, "loading class");
        let class = self.load(id).await?;
        Ok(SchoolClassDto::from(&class))
    }

    pub async fn create(&self, input: SchoolClassInput) -> Result<SchoolClassDto> {
        tracing::debug!(name = %input.name, "creating class");
        let class = SchoolClass::new(&input.name, &input.teacher).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected class");
        })?;
        self.classes.add(&class).await?;

        tracing::info!(id = %class.key(), name = class.name(), "class created");
        Ok(SchoolClassDto::from(&class))
    }

    pub async fn update(&self, id: ClassKey, input: SchoolClassInput) -> Result<SchoolClassDto> {
        tracing::debug!(%id, "updating class");
        let mut class = self.load(id).await?;
        class.update(&input.name, &input.teacher).inspect_err(|e| {
            tracing::warn!(%id, error = %e, "rejected class update");
        })?;
        self.classes.update(&class).await?;

        tracing::info!(%id, "class updated");
        Ok(SchoolClassDto::from(&class))
    }

    pub async fn delete(&self, id: ClassKey) -> Result<()> {
        tracing::debug!(%id, "deleting class");
        let class = self.load(id).await?;
        self.classes.remove(&class).await?;
        tracing::info!(%id, "class deleted");
        Ok(())
    }

    /// Put a student on the class roster.
    ///
    /// Checks run in order: class exists, student exists, capacity, duplicate.
    pub async fn assign_student(&self, id: ClassKey, student: StudentKey) -> Result<SchoolClassDto> {
        tracing::debug!(class_id = %id, student_id = %student, "assigning student");
        let mut class = self.load(id).await?;

        if self.students.get_by_id(student).await?.is_none() {
            tracing::warn!(class_id = %id, student_id = %student, "assignment rejected: unknown student");
            return Err(SchoolClassServiceError::StudentNotFound);
        }

        class.add_student(student).inspect_err(|e| {
            tracing::warn!(class_id = %id, student_id = %student, error = %e, "assignment rejected");
        })?;
        self.classes.update(&class).await?;

        tracing::info!(class_id = %id, student_id = %student, roster = class.student_ids().len(), "student assigned");
        Ok(SchoolClassDto::from(&class))
    }

    /// Take a student off the roster. Unknown or unassigned students are ignored.
    pub async fn unassign_student(&self, id: ClassKey, student: StudentKey) -> Result<SchoolClassDto> {
        tracing::debug!(class_id = %id, student_id = %student, "unassigning student");
        let mut class = self.load(id).await?;
        class.remove_student(student);
        self.classes.update(&class).await?;

        tracing::info!(class_id = %id, student_id = %student, "student unassigned");
        Ok(SchoolClassDto::from(&class))
    }

    async fn load(&self, id: ClassKey) -> Result<SchoolClass> {
        self.classes
            .get_by_id(id)
            .await?
            .ok_or(SchoolClassServiceError::ClassNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use schoolhub_classes::{MAX_STUDENTS, SchoolClassError};
    use schoolhub_infra::{InMemorySchoolClassRepository, InMemoryStudentRepository};
    use schoolhub_students::{Address, Student, StudentDetails, StudentId};

    use super::*;

    type Service = SchoolClassService<Arc<InMemorySchoolClassRepository>, Arc<InMemoryStudentRepository>>;

    struct Fixture {
        svc: Service,
        classes: Arc<InMemorySchoolClassRepository>,
        students: Arc<InMemoryStudentRepository>,
    }

    fn fixture() -> Fixture {
        let classes = Arc::new(InMemorySchoolClassRepository::new());
        let students = Arc::new(InMemoryStudentRepository::new());
        Fixture {
            svc: SchoolClassService::new(classes.clone(), students.clone()),
            classes,
            students,
        }
    }

    impl Fixture {
        async fn enrol(&self, code: &str) -> StudentKey {
            let student = Student::new(StudentDetails {
                student_id: Some(StudentId::parse(code).unwrap()),
                first_name: "Test".to_string(),
                last_name: "Student".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2012, 5, 5).unwrap(),
                address: Address::default(),
            })
            .unwrap();
            self.students.add(&student).await.unwrap();
            student.key()
        }

        async fn math(&self) -> SchoolClassDto {
            self.svc.create(class_input("Math", "Mr. Smith")).await.unwrap()
        }

        async fn stored_roster(&self, id: ClassKey) -> Vec<StudentKey> {
            self.classes.get_by_id(id).await.unwrap().unwrap().student_ids().to_vec()
        }
    }

    fn class_input(name: &str, teacher: &str) -> SchoolClassInput {
        SchoolClassInput {
            name: name.to_string(),
            teacher: teacher.to_string(),
        }
    }

    #[tokio::test]
    async fn create_returns_class_with_empty_roster() {
        let f = fixture();
        let dto = f.math().await;
        assert_eq!(dto.name, "Math");
        assert_eq!(dto.teacher, "Mr. Smith");
        assert!(dto.student_ids.is_empty());
        assert_eq!(f.svc.get_by_id(dto.id).await.unwrap(), dto);
    }

    #[tokio::test]
    async fn create_propagates_validation_and_persists_nothing() {
        let f = fixture();
        let err = f.svc.create(class_input(" ", "Mr. Smith")).await.unwrap_err();
        assert_eq!(err, SchoolClassServiceError::Domain(SchoolClassError::EmptyClassName));
        let err = f.svc.create(class_input("Math", "")).await.unwrap_err();
        assert_eq!(err, SchoolClassServiceError::Domain(SchoolClassError::EmptyTeacher));
        assert!(f.svc.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_lists_classes_in_creation_order() {
        let f = fixture();
        f.math().await;
        f.svc.create(class_input("Science", "Ms. Johnson")).await.unwrap();
        let names: Vec<_> = f.svc.get_all().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Math", "Science"]);
    }

    #[tokio::test]
    async fn missing_class_is_reported_everywhere() {
        let f = fixture();
        let id = ClassKey::new();
        let student = f.enrol("S-1").await;
        let nf = Err(SchoolClassServiceError::ClassNotFound);

        assert_eq!(f.svc.get_by_id(id).await, nf);
        assert_eq!(f.svc.update(id, class_input("Math", "Mr. Smith")).await, nf);
        assert_eq!(f.svc.delete(id).await, Err(SchoolClassServiceError::ClassNotFound));
        assert_eq!(f.svc.assign_student(id, student).await, nf);
        assert_eq!(f.svc.unassign_student(id, student).await, nf);
    }

    #[tokio::test]
    async fn update_changes_fields_and_keeps_roster() {
        let f = fixture();
        let class = f.math().await;
        let student = f.enrol("S-1").await;
        f.svc.assign_student(class.id, student).await.unwrap();

        let updated = f.svc.update(class.id, class_input("Science", "Ms. Johnson")).await.unwrap();
        assert_eq!(updated.name, "Science");
        assert_eq!(updated.teacher, "Ms. Johnson");
        assert_eq!(updated.student_ids, vec![student]);
    }

    #[tokio::test]
    async fn update_checks_existence_before_validation() {
        let f = fixture();
        let err = f.svc.update(ClassKey::new(), class_input("", "")).await.unwrap_err();
        assert_eq!(err, SchoolClassServiceError::ClassNotFound);
    }

    #[tokio::test]
    async fn delete_removes_class() {
        let f = fixture();
        let class = f.math().await;
        f.svc.delete(class.id).await.unwrap();
        assert_eq!(f.svc.get_by_id(class.id).await, Err(SchoolClassServiceError::ClassNotFound));
    }

    #[tokio::test]
    async fn assign_persists_roster_in_order() {
        let f = fixture();
        let class = f.math().await;
        let a = f.enrol("S-1").await;
        let b = f.enrol("S-2").await;

        f.svc.assign_student(class.id, b).await.unwrap();
        let dto = f.svc.assign_student(class.id, a).await.unwrap();

        assert_eq!(dto.student_ids, vec![b, a]);
        assert_eq!(f.stored_roster(class.id).await, vec![b, a]);
    }

    #[tokio::test]
    async fn assign_rejects_unknown_student() {
        let f = fixture();
        let class = f.math().await;
        let err = f.svc.assign_student(class.id, StudentKey::new()).await.unwrap_err();
        assert_eq!(err, SchoolClassServiceError::StudentNotFound);
        assert!(f.stored_roster(class.id).await.is_empty());
    }

    #[tokio::test]
    async fn assigning_twice_is_a_duplicate() {
        let f = fixture();
        let class = f.math().await;
        let x = f.enrol("S-X").await;
        f.svc.assign_student(class.id, x).await.unwrap();

        let err = f.svc.assign_student(class.id, x).await.unwrap_err();
        assert_eq!(err, SchoolClassServiceError::Domain(SchoolClassError::DuplicateAssignment(x)));
        assert_eq!(f.stored_roster(class.id).await, vec![x]);
    }

    #[tokio::test]
    async fn twenty_first_assignment_exceeds_capacity() {
        let f = fixture();
        let class = f.math().await;
        for i in 0..MAX_STUDENTS {
            let s = f.enrol(&format!("S-{i}")).await;
            f.svc.assign_student(class.id, s).await.unwrap();
        }

        let late = f.enrol("S-late").await;
        let err = f.svc.assign_student(class.id, late).await.unwrap_err();
        assert_eq!(
            err,
            SchoolClassServiceError::Domain(SchoolClassError::CapacityExceeded { max: MAX_STUDENTS })
        );
        assert_eq!(f.stored_roster(class.id).await.len(), MAX_STUDENTS);
    }

    #[tokio::test]
    async fn full_class_reports_capacity_even_for_an_assigned_student() {
        let f = fixture();
        let class = f.math().await;
        let mut first = None;
        for i in 0..MAX_STUDENTS {
            let s = f.enrol(&format!("S-{i}")).await;
            first.get_or_insert(s);
            f.svc.assign_student(class.id, s).await.unwrap();
        }
        let err = f.svc.assign_student(class.id, first.unwrap()).await.unwrap_err();
        assert_eq!(
            err,
            SchoolClassServiceError::Domain(SchoolClassError::CapacityExceeded { max: MAX_STUDENTS })
        );
    }

    #[tokio::test]
    async fn unassign_removes_student_and_persists() {
        let f = fixture();
        let class = f.math().await;
        let a = f.enrol("S-1").await;
        let b = f.enrol("S-2").await;
        f.svc.assign_student(class.id, a).await.unwrap();
        f.svc.assign_student(class.id, b).await.unwrap();

        let dto = f.svc.unassign_student(class.id, a).await.unwrap();
        assert_eq!(dto.student_ids, vec![b]);
        assert_eq!(f.stored_roster(class.id).await, vec![b]);
    }

    #[tokio::test]
    async fn unassigning_a_student_never_assigned_changes_nothing() {
        let f = fixture();
        let class = f.math().await;
        let a = f.enrol("S-1").await;
        f.svc.assign_student(class.id, a).await.unwrap();

        let dto = f.svc.unassign_student(class.id, StudentKey::new()).await.unwrap();
        assert_eq!(dto.student_ids, vec![a]);
        assert_eq!(f.stored_roster(class.id).await, vec![a]);
    }

    #[tokio::test]
    async fn deleting_a_student_leaves_rosters_alone() {
        let f = fixture();
        let class = f.math().await;
        let a = f.enrol("S-1").await;
        f.svc.assign_student(class.id, a).await.unwrap();

        let student = f.students.get_by_id(a).await.unwrap().unwrap();
        f.students.remove(&student).await.unwrap();

        assert_eq!(f.stored_roster(class.id).await, vec![a]);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn operations_log_entry_and_rejections() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let f = fixture();
        let class = f.math().await;
        let unknown = StudentKey::new();
        let err = f.svc.assign_student(class.id, unknown).await.unwrap_err();
        assert_eq!(err, SchoolClassServiceError::StudentNotFound);
        f.svc.unassign_student(class.id, unknown).await.unwrap();
        f.svc.delete(class.id).await.unwrap();

        let text = logs.text();
        for line in ["creating class", "unassigning student", "deleting class"] {
            assert!(text.contains(line), "missing {line:?} in:\n{text}");
        }
        let rejected = text
            .lines()
            .find(|l| l.contains("assignment rejected: unknown student"))
            .unwrap_or_else(|| panic!("no rejection event in:\n{text}"));
        assert!(rejected.contains("WARN"));
    }
}
