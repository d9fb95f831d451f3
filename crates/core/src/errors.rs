use thiserror::Error;

/// Fallback shown when a failed call carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Network error or server issue";

/// Unified error type for the entire mint-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid event kind: '{0}' (expected 'long' or 'short')")]
    InvalidEventKind(String),

    #[error("Invalid append: {0}")]
    InvalidAppend(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error ({status}): {message}")]
    Service {
        status: u16,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Lifetime ────────────────────────────────────────────────────
    #[error("Operation cancelled: owning component was torn down")]
    Cancelled,
}

impl CoreError {
    /// Text to put in front of the user.
    ///
    /// Remote messages are passed through verbatim; transport failures
    /// collapse to the generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            CoreError::Service { .. } | CoreError::Network(_) | CoreError::Deserialization(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            CoreError::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the failure came from talking to the remote service.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_) | CoreError::Service { .. } | CoreError::Deserialization(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full URL; drop any query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
