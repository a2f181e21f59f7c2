use thiserror::Error;

/// Unified error type for the entire carvalue-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // ── Input / Preferences ─────────────────────────────────────────
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Page / DOM ──────────────────────────────────────────────────
    #[error("DOM error: {0}")]
    Dom(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; keep the path, drop the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
