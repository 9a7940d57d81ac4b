use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Whether the caller can recover by correcting its input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::BadRequest(_)
                | AppError::ValidationError(_)
                | AppError::Conflict(_)
        )
    }

    /// Log the error at a level matching its severity and hand it back.
    pub fn logged(self) -> Self {
        if self.is_user_correctable() {
            tracing::debug!("Rejected request: {}", self);
        } else {
            tracing::error!("Error: {}", self);
        }
        self
    }
}
