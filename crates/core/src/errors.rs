use thiserror::Error;

/// Unified error type for the entire trading-values-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input Validation ────────────────────────────────────────────
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    // ── Lookup ──────────────────────────────────────────────────────
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("An item named '{0}' already exists")]
    DuplicateName(String),

    #[error("Index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    // ── Data-Model Invariants ───────────────────────────────────────
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    // ── Serialization (snapshot boundary) ───────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
