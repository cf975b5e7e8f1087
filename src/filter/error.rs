use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid page parameter")]
    InvalidPage,

    #[error("Invalid size parameter")]
    InvalidSize,

    #[error("Missing {0} value")]
    MissingValue(&'static str),

    #[error("Invalid age value")]
    InvalidAge,
}
