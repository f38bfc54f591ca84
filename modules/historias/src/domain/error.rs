use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: String },

    #[error("Document number '{document_number}' is already registered to a different patient")]
    DuplicateIdentity { document_number: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Store error: {message}")]
    Store { message: String },
}

impl DomainError {
    pub fn record_not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    pub fn profile_not_found(id: impl Into<String>) -> Self {
        Self::ProfileNotFound { id: id.into() }
    }

    pub fn duplicate_identity(document_number: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            document_number: document_number.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
