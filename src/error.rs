use thiserror::Error;

/// Main error type for the paper desk
#[derive(Error, Debug)]
pub enum PaperdeskError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Request validation errors (every violated rule, collected)
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    // Allocation errors
    #[error("Attempting to purchase {requested} papers but only {available} are available for purchase")]
    InsufficientSupply { requested: u64, available: u64 },

    // Ledger collaborator errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for PaperdeskError
pub type Result<T> = std::result::Result<T, PaperdeskError>;

/// Errors surfaced by the ledger collaborator.
///
/// Always fatal to the enclosing transaction; the core never retries them
/// internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: RecordKind, id: String },

    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Storage failure: {0}")]
    Backend(String),
}

/// Record kinds the ledger stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Paper,
    Ownership,
    Participant,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Paper => write!(f, "Commercial paper"),
            RecordKind::Ownership => write!(f, "Ownership"),
            RecordKind::Participant => write!(f, "Participant"),
        }
    }
}

/// Rule violations for a single request, reported together.
///
/// A rejected request carries every failed rule, not just the first, so the
/// caller can fix all of them in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.errors
    }

    /// Empty -> Ok, otherwise the collected violations as the error.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}
