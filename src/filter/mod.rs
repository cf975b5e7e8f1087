pub mod types;
pub mod filter;
pub mod age;
pub mod error;

pub use types::*;
pub use filter::{Criterion, QueryPlan};
pub use error::FilterError;
