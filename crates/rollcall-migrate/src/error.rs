use thiserror::Error;

use crate::rule::error::ParseError;

/// Migration errors
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid source date \"{0}\"")]
    InvalidSourceDate(String),

    #[error("Record has no source dates")]
    NoSourceDates,

    #[error(transparent)]
    Core(#[from] rollcall_core::error::CoreError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type MigrateResult<T> = std::result::Result<T, MigrateError>;
