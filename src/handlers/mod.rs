// handlers/mod.rs - HTTP handlers for the employee directory
//
// employees: /employees and /employees/:email
// manager:   /employees/:email/manager and /employees/:email/subordinates
// system:    /, /health and the JSON 404 fallback

pub mod employees;
pub mod manager;
pub mod system;
pub mod utils;

pub use employees::*;
pub use manager::*;
