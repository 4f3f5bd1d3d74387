use crate::{
    data::{
        StudentStore,
        student::{Student, StudentForm},
    },
    error::{GetDatabaseConnectionSnafu, MakeQuerySnafu, RegistryResult, StudentAction},
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{Pool, Postgres};

// runtime-checked queries, so building doesn't need a live database
const INSERT_STUDENT: &str = "INSERT INTO students (first_name, last_name, email, course) VALUES ($1, $2, $3, $4) RETURNING *";
const SELECT_ALL_STUDENTS: &str = "SELECT * FROM students ORDER BY id ASC";
const UPDATE_STUDENT: &str = "UPDATE students SET first_name = $2, last_name = $3, email = $4, course = $5 WHERE id = $1 RETURNING *";
const DELETE_STUDENT: &str = "DELETE FROM students WHERE id = $1";

#[derive(Debug, Clone)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Checks a connection out of the pool once, so a misconfigured database shows up in the logs at startup.
    pub async fn check_connection(&self) -> RegistryResult<()> {
        let _conn = self
            .pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn get_all(&self) -> RegistryResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(SELECT_ALL_STUDENTS)
            .fetch_all(&self.pool)
            .await
            .context(MakeQuerySnafu {
                action: StudentAction::Fetch,
            })
    }

    async fn insert_into_database(&self, to_be_added: StudentForm) -> RegistryResult<Student> {
        let StudentForm {
            first_name,
            last_name,
            email,
            course,
        } = to_be_added;

        sqlx::query_as::<_, Student>(INSERT_STUDENT)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .bind(course)
            .fetch_one(&self.pool)
            .await
            .context(MakeQuerySnafu {
                action: StudentAction::Register,
            })
    }

    async fn update_in_database(
        &self,
        id: i32,
        replacement: StudentForm,
    ) -> RegistryResult<Option<Student>> {
        let StudentForm {
            first_name,
            last_name,
            email,
            course,
        } = replacement;

        sqlx::query_as::<_, Student>(UPDATE_STUDENT)
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .bind(course)
            .fetch_optional(&self.pool)
            .await
            .context(MakeQuerySnafu {
                action: StudentAction::Update,
            })
    }

    async fn remove_from_database(&self, id: i32) -> RegistryResult<bool> {
        let result = sqlx::query(DELETE_STUDENT)
            .bind(id)
            .execute(&self.pool)
            .await
            .context(MakeQuerySnafu {
                action: StudentAction::Delete,
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn form(first_name: &str, email: &str, course: &str) -> StudentForm {
        StudentForm {
            first_name: Some(first_name.to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some(email.to_string()),
            course: Some(course.to_string()),
        }
    }

    #[sqlx::test]
    #[ignore = "needs a live DATABASE_URL"]
    async fn ids_increase_and_rows_come_back_in_order(pool: PgPool) {
        let store = PostgresStudentStore::new(pool);

        let first = store
            .insert_into_database(form("Ada", "ada@example.com", "Math"))
            .await
            .unwrap();
        let second = store
            .insert_into_database(form("Ada", "ada@example.com", "Math"))
            .await
            .unwrap();
        assert!(first.id > 0);
        assert!(second.id > first.id, "duplicate emails are fine, ids are not");

        let all = store.get_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[sqlx::test]
    #[ignore = "needs a live DATABASE_URL"]
    async fn update_replaces_every_field(pool: PgPool) {
        let store = PostgresStudentStore::new(pool);
        let created = store
            .insert_into_database(form("Ada", "ada@example.com", "Math"))
            .await
            .unwrap();

        let updated = store
            .update_in_database(
                created.id,
                StudentForm {
                    email: Some("ada@x.com".into()),
                    ..StudentForm::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email.as_deref(), Some("ada@x.com"));
        assert_eq!(updated.first_name, None);
        assert_eq!(updated.course, None);

        assert_eq!(
            store
                .update_in_database(created.id + 1000, StudentForm::default())
                .await
                .unwrap(),
            None
        );
    }

    #[sqlx::test]
    #[ignore = "needs a live DATABASE_URL"]
    async fn delete_reports_whether_anything_went(pool: PgPool) {
        let store = PostgresStudentStore::new(pool);
        let created = store
            .insert_into_database(form("Ada", "ada@example.com", "Math"))
            .await
            .unwrap();

        assert!(store.remove_from_database(created.id).await.unwrap());
        assert!(!store.remove_from_database(created.id).await.unwrap());
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
