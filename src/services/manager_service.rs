use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::database::models::EmployeeView;
use crate::database::store::EmployeeStore;
use crate::filter::{Pagination, StoreQuery};

use super::employee_service::{with_deadline, EmployeeError};

/// Maintains the `manager` back-reference and answers the reverse
/// (subordinates) lookup. References are checked only when set; deleting a
/// manager later leaves them dangling.
#[derive(Clone)]
pub struct ManagerService {
    store: Arc<dyn EmployeeStore>,
    timeout: Duration,
}

impl ManagerService {
    pub fn new(store: Arc<dyn EmployeeStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Point `employee_email` at `manager_email`. An empty manager email
    /// clears the reference.
    pub async fn set_manager(&self, employee_email: &str, manager_email: &str) -> Result<(), EmployeeError> {
        with_deadline(self.timeout, async {
            if self.store.find_one(employee_email).await?.is_none() {
                return Err(EmployeeError::NotFound("employee not found"));
            }

            let manager = Some(manager_email).filter(|m| !m.is_empty());
            if let Some(manager) = manager {
                if self.store.find_one(manager).await?.is_none() {
                    return Err(EmployeeError::InvalidManager);
                }
            }

            // The employee may have been removed since the lookup above.
            if !self.store.set_manager(employee_email, manager).await? {
                return Err(EmployeeError::NotFound("employee not found"));
            }
            info!("Set manager of {} to {:?}", employee_email, manager);
            Ok(())
        })
        .await
    }

    pub async fn get_manager(&self, employee_email: &str) -> Result<EmployeeView, EmployeeError> {
        with_deadline(self.timeout, async {
            let employee = self
                .store
                .find_one(employee_email)
                .await?
                .ok_or(EmployeeError::NotFound("employee not found"))?;

            let manager_email = employee.manager.ok_or(EmployeeError::ManagerNotSet)?;

            self.store
                .find_one(&manager_email)
                .await?
                .map(EmployeeView::from)
                .ok_or(EmployeeError::NotFound("manager not found"))
        })
        .await
    }

    /// Clear the reference. Succeeds whether or not one was set, and
    /// whether or not the employee exists.
    pub async fn remove_manager(&self, employee_email: &str) -> Result<(), EmployeeError> {
        with_deadline(self.timeout, async {
            self.store.set_manager(employee_email, None).await?;
            info!("Removed manager of {}", employee_email);
            Ok(())
        })
        .await
    }

    pub async fn get_subordinates(
        &self,
        manager_email: &str,
        page: Pagination,
    ) -> Result<Vec<EmployeeView>, EmployeeError> {
        with_deadline(self.timeout, async {
            let query = StoreQuery::Manager(manager_email.to_string());
            let subordinates = self.store.find_page(&query, page).await?;
            Ok(subordinates.into_iter().map(EmployeeView::from).collect())
        })
        .await
    }
}
