use thiserror::Error;

/// Service layer errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{label} does not exist")]
    NotFound { label: &'static str },

    #[error("{label} with that name already exist")]
    DuplicateName { label: &'static str },

    #[error("sorry, you cannot {action} an order past {closing}")]
    PastClosing {
        action: OrderAction,
        closing: String,
    },

    #[error("failed to decode request body: {message}")]
    MalformedBody { message: String },
}

/// Order mutations guarded by the closing time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Make,
    Modify,
}

impl std::fmt::Display for OrderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderAction::Make => write!(f, "make"),
            OrderAction::Modify => write!(f, "modify"),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Short outcome label for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            ServiceError::Validation { .. } | ServiceError::MalformedBody { .. } => "invalid",
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::DuplicateName { .. } => "duplicate",
            ServiceError::PastClosing { .. } => "closed",
        }
    }
}
