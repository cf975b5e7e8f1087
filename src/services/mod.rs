pub mod employee_service;
pub mod manager_service;

pub use employee_service::{EmployeeError, EmployeeService};
pub use manager_service::ManagerService;
