pub mod employee;

pub use employee::{Birthdate, Employee, EmployeeRow, EmployeeView, ManagerEmail};
