//! Fixtures shared by unit tests.

use std::sync::Arc;
use std::time::Duration;

use crate::database::memory::MemoryEmployeeStore;
use crate::database::models::{Birthdate, Employee};
use crate::services::EmployeeService;

/// A valid employee born 1990-05-20 with password `Test1` and no roles.
pub fn employee(email: &str) -> Employee {
    employee_born(email, "20", "05", "1990")
}

pub fn employee_born(email: &str, day: &str, month: &str, year: &str) -> Employee {
    Employee {
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        password: "Test1".to_string(),
        birthdate: Birthdate::new(day, month, year),
        roles: vec![],
        manager: None,
    }
}

pub fn employee_with_roles(email: &str, roles: &[&str]) -> Employee {
    Employee {
        roles: roles.iter().map(|r| r.to_string()).collect(),
        ..employee(email)
    }
}

/// Service over a fresh in-memory store, plus the store for direct setup.
pub fn memory_service() -> (EmployeeService, Arc<MemoryEmployeeStore>) {
    let store = Arc::new(MemoryEmployeeStore::new());
    let service = EmployeeService::new(store.clone(), Duration::from_secs(10));
    (service, store)
}
