use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Customer '{customer_id}' not found")]
    CustomerNotFound { customer_id: String },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidAttribute { field: &'static str, value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GuardError {
    /// True for the one user-correctable outcome of an analysis request.
    pub fn is_customer_not_found(&self) -> bool {
        matches!(self, GuardError::CustomerNotFound { .. })
    }
}

pub type GuardResult<T> = Result<T, GuardError>;
