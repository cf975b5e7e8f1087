use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::Employee;
use crate::filter::{Pagination, StoreQuery};

/// Errors from an [`EmployeeStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::DuplicateKey(db.message().to_string());
            }
        }
        if matches!(
            err,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        ) {
            return StoreError::Unavailable(err.to_string());
        }
        StoreError::Sqlx(err)
    }
}

/// The employee collection. Records are unique by email; every paginated
/// read is sorted by email ascending.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::DuplicateKey`] if the
    /// email is already present.
    async fn insert(&self, employee: &Employee) -> Result<(), StoreError>;

    async fn find_one(&self, email: &str) -> Result<Option<Employee>, StoreError>;

    /// Exact match on both email and password.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Employee>, StoreError>;

    async fn find_page(
        &self,
        query: &StoreQuery,
        page: Pagination,
    ) -> Result<Vec<Employee>, StoreError>;

    /// Every record, unpaginated and in no particular order.
    async fn scan(&self) -> Result<Vec<Employee>, StoreError>;

    /// Overwrite only the `manager` field. Returns false if no record has
    /// this email.
    async fn set_manager(&self, email: &str, manager: Option<&str>) -> Result<bool, StoreError>;

    /// Remove every record; returns how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self) {}
}
