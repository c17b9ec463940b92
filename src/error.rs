//! Error types shared by the capabilities and the session.

use crate::models::Domain;

/// Failure reported by an auth provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The user closed or dismissed the sign-in flow.
    #[error("sign-in cancelled")]
    Cancelled,

    #[error("unsupported sign-in provider: {0}")]
    UnsupportedProvider(String),

    #[error("{provider} sign-in failed: {message}")]
    Provider { provider: String, message: String },

    #[error("failed to persist session: {0}")]
    Persist(String),
}

impl AuthError {
    /// Cancellation is not an error the user needs to see.
    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, AuthError::Cancelled)
    }
}

/// Failure reported by the profile or submission store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Submission rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("unknown category '{category}' for {domain}")]
    UnknownCategory { domain: Domain, category: String },

    #[error("'{0}' is not an http(s) link")]
    InvalidLink(String),

    #[error("an item with id '{id}' already exists in {domain}")]
    Duplicate { domain: Domain, id: String },
}

/// Failure of a favorites toggle.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    /// No identity is present; the caller should start sign-in.
    #[error("sign in to save favorites")]
    SignInRequired,

    /// The remote mutation failed and the local change was rolled back.
    #[error("failed to update favorites: {0}")]
    Remote(#[source] StoreError),
}
