use crate::{
    data::{
        StudentStore,
        student::{Student, StudentForm},
    },
    error::{RegistryError, RegistryResult, StudentAction},
};
use async_trait::async_trait;
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

/// A `students` table in a `Vec`, for exercising the routes without PostgreSQL.
#[derive(Debug)]
pub struct MemoryStudentStore {
    rows: Mutex<MemoryRows>,
    broken: AtomicBool,
}

#[derive(Debug)]
struct MemoryRows {
    last_id: i32,
    students: Vec<Student>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(MemoryRows {
                last_id: 0,
                students: Vec::new(),
            }),
            broken: AtomicBool::new(false),
        }
    }

    /// Makes every following call fail as though the pool had been closed.
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Student> {
        self.rows.lock().unwrap().students.clone()
    }

    fn check(&self, action: StudentAction) -> RegistryResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(RegistryError::MakeQuery {
                source: sqlx::Error::PoolClosed,
                action,
            });
        }
        Ok(())
    }
}

fn row(id: i32, form: StudentForm) -> Student {
    let StudentForm {
        first_name,
        last_name,
        email,
        course,
    } = form;

    Student {
        id,
        first_name,
        last_name,
        email,
        course,
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn get_all(&self) -> RegistryResult<Vec<Student>> {
        self.check(StudentAction::Fetch)?;
        // ids are handed out in order and never reused, so insertion order is id order
        Ok(self.snapshot())
    }

    async fn insert_into_database(&self, to_be_added: StudentForm) -> RegistryResult<Student> {
        self.check(StudentAction::Register)?;
        let mut rows = self.rows.lock().unwrap();
        rows.last_id += 1;
        let student = row(rows.last_id, to_be_added);
        rows.students.push(student.clone());
        Ok(student)
    }

    async fn update_in_database(
        &self,
        id: i32,
        replacement: StudentForm,
    ) -> RegistryResult<Option<Student>> {
        self.check(StudentAction::Update)?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .students
            .iter_mut()
            .find(|student| student.id == id)
            .map(|student| {
                *student = row(id, replacement);
                student.clone()
            }))
    }

    async fn remove_from_database(&self, id: i32) -> RegistryResult<bool> {
        self.check(StudentAction::Delete)?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.students.len();
        rows.students.retain(|student| student.id != id);
        Ok(rows.students.len() != before)
    }
}
