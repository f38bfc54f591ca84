use thiserror::Error;

/// Errors that are safe to expose to consumers of the module.
#[derive(Error, Debug, Clone)]
pub enum HistoriasError {
    #[error("Record not found: {id}")]
    NotFound { id: String },

    #[error("A record with document number '{document_number}' already belongs to a different patient")]
    DuplicateIdentity { document_number: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Internal error")]
    Internal,
}

impl HistoriasError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn duplicate_identity(document_number: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            document_number: document_number.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_authorized() -> Self {
        Self::NotAuthorized
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
