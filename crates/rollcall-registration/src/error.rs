use thiserror::Error;

/// Registration availability errors
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid registration policy: {0}")]
    InvalidPolicy(String),

    #[error("Scheduled series registration is missing its open/close window")]
    MissingSeriesWindow,

    #[error("Series-scoped registration on an instance with no parent series")]
    MissingSeries,

    #[error("Schedule window out of datetime range")]
    WindowOutOfRange,

    #[error("Registrant count lookup failed: {0}")]
    Counter(#[from] anyhow::Error),
}

pub type RegistrationResult<T> = std::result::Result<T, RegistrationError>;
