use thiserror::Error;

/// Why a record source was skipped. Never shown to site visitors.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("{source_name} malformed: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("{source_name} yielded no records")]
    Empty { source_name: String },
}

/// Failure class, used as a structured logging field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Malformed,
    Empty,
}

impl SourceErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceErrorKind::Unavailable => "unavailable",
            SourceErrorKind::Malformed => "malformed",
            SourceErrorKind::Empty => "empty",
        }
    }
}

impl SourceError {
    pub fn unavailable(source_name: &str, reason: impl ToString) -> Self {
        SourceError::Unavailable {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(source_name: &str, reason: impl ToString) -> Self {
        SourceError::Malformed {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty(source_name: &str) -> Self {
        SourceError::Empty {
            source_name: source_name.to_string(),
        }
    }

    pub fn kind(&self) -> SourceErrorKind {
        match self {
            SourceError::Unavailable { .. } => SourceErrorKind::Unavailable,
            SourceError::Malformed { .. } => SourceErrorKind::Malformed,
            SourceError::Empty { .. } => SourceErrorKind::Empty,
        }
    }
}
