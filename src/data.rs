use crate::data::student::{Student, StudentForm};
use crate::error::RegistryResult;
use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
pub mod memory_store;
pub mod postgres_store;
pub mod student;

/// Everything the API needs from wherever the `students` rows live.
///
/// Each method maps onto exactly one statement, so implementations never need
/// to coordinate between calls: concurrent writers to the same row just race.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// All rows, ordered by ascending id.
    async fn get_all(&self) -> RegistryResult<Vec<Student>>;
    async fn insert_into_database(&self, to_be_added: StudentForm) -> RegistryResult<Student>;
    /// Replaces every field of the row, returning `None` if no row has that id.
    async fn update_in_database(
        &self,
        id: i32,
        replacement: StudentForm,
    ) -> RegistryResult<Option<Student>>;
    /// Returns whether a row was actually removed.
    async fn remove_from_database(&self, id: i32) -> RegistryResult<bool>;
}
