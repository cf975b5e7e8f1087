use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::database::models::{Employee, EmployeeView};
use crate::database::store::{EmployeeStore, StoreError};
use crate::filter::age::filter_by_age;
use crate::filter::{Criterion, Pagination, QueryPlan};
use crate::validation::{validate_employee, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("manager not set")]
    ManagerNotSet,
    #[error("manager not found")]
    InvalidManager,
    #[error("employee with this email already exists")]
    Conflict,
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for EmployeeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => EmployeeError::Conflict,
            other => EmployeeError::Store(other),
        }
    }
}

/// Bound one service operation by `deadline`. The future is dropped on
/// expiry, abandoning any store call still in flight.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, EmployeeError>
where
    F: Future<Output = Result<T, EmployeeError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(EmployeeError::Timeout(deadline)),
    }
}

fn into_views(employees: Vec<Employee>) -> Vec<EmployeeView> {
    employees.into_iter().map(EmployeeView::from).collect()
}

/// Creation, credential lookup, listing and bulk deletion of employees.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    timeout: Duration,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Validate and insert a new employee, returning it without password.
    pub async fn create_employee(&self, mut employee: Employee) -> Result<EmployeeView, EmployeeError> {
        with_deadline(self.timeout, async {
            validate_employee(&employee, Utc::now().date_naive())?;

            employee.manager = employee.manager.take().filter(|m| !m.is_empty());
            if let Some(manager) = employee.manager.as_deref() {
                if self.store.find_one(manager).await?.is_none() {
                    return Err(EmployeeError::InvalidManager);
                }
            }

            self.store.insert(&employee).await?;
            info!("Created employee {}", employee.email);
            Ok(EmployeeView::from(employee))
        })
        .await
    }

    pub async fn get_employee(&self, email: &str, password: &str) -> Result<EmployeeView, EmployeeError> {
        with_deadline(self.timeout, async {
            self.store
                .find_by_credentials(email, password)
                .await?
                .map(EmployeeView::from)
                .ok_or(EmployeeError::NotFound("employee not found"))
        })
        .await
    }

    /// List one page of employees matching `criterion`. Ages are computed
    /// against `reference`.
    pub async fn list_employees(
        &self,
        criterion: &Criterion,
        page: Pagination,
        reference: DateTime<Utc>,
    ) -> Result<Vec<EmployeeView>, EmployeeError> {
        with_deadline(self.timeout, async {
            let employees = match criterion.plan() {
                QueryPlan::Store(query) => self.store.find_page(&query, page).await?,
                QueryPlan::ScanByAge(years) => {
                    let all = self.store.scan().await?;
                    debug!("Age filter scanned {} employees", all.len());
                    filter_by_age(all, years, reference.date_naive(), page)
                }
            };
            Ok(into_views(employees))
        })
        .await
    }

    pub async fn delete_all(&self) -> Result<u64, EmployeeError> {
        with_deadline(self.timeout, async {
            let removed = self.store.delete_all().await?;
            info!("Deleted all employees ({} removed)", removed);
            Ok(removed)
        })
        .await
    }

    pub async fn health_check(&self) -> Result<(), EmployeeError> {
        with_deadline(self.timeout, async { Ok(self.store.ping().await?) }).await
    }
}
