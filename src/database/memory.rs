use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::Employee;
use crate::database::store::{EmployeeStore, StoreError};
use crate::filter::{Pagination, StoreQuery};

/// In-process employee collection keyed by email. The map ordering gives
/// the email sort for free.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    records: RwLock<BTreeMap<String, Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(query: &StoreQuery, employee: &Employee) -> bool {
        match query {
            StoreQuery::All => true,
            StoreQuery::EmailDomain(domain) => {
                let suffix = format!("@{}", domain.to_lowercase());
                employee.email.to_lowercase().ends_with(&suffix)
            }
            StoreQuery::Role(role) => employee.roles.iter().any(|r| r == role),
            StoreQuery::Manager(manager) => employee.manager.as_deref() == Some(manager.as_str()),
        }
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn insert(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&employee.email) {
            return Err(StoreError::DuplicateKey(employee.email.clone()));
        }
        records.insert(employee.email.clone(), employee.clone());
        Ok(())
    }

    async fn find_one(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(email)
            .filter(|employee| employee.password == password)
            .cloned())
    }

    async fn find_page(
        &self,
        query: &StoreQuery,
        page: Pagination,
    ) -> Result<Vec<Employee>, StoreError> {
        let records = self.records.read().await;
        let matched: Vec<Employee> = records
            .values()
            .filter(|employee| Self::matches(query, employee))
            .cloned()
            .collect();
        Ok(page.slice(matched))
    }

    async fn scan(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn set_manager(&self, email: &str, manager: Option<&str>) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(email) {
            Some(employee) => {
                employee.manager = manager.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let removed = records.len() as u64;
        records.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
