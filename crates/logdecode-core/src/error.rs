//! Error types for the logdecode pipeline.

use thiserror::Error;

/// Per-log decode problems.
///
/// These never escape the decoder as `Err`: they are attached to the
/// `DecodedEvent` and their `Display` text becomes the output `note`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    #[error("Missing topics")]
    MissingTopics,

    #[error("No ABI spec for event")]
    UnknownSignature,

    #[error("Error decoding: {reason}")]
    DecodeFailure { reason: String },
}

impl DecodeIssue {
    pub fn failure(reason: impl Into<String>) -> Self {
        DecodeIssue::DecodeFailure {
            reason: reason.into(),
        }
    }

    /// Short machine-friendly label, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeIssue::MissingTopics => "missing_topics",
            DecodeIssue::UnknownSignature => "unknown_signature",
            DecodeIssue::DecodeFailure { .. } => "decode_failure",
        }
    }
}

/// Errors raised while building the signature registry or the address book.
/// All of them are configuration errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Signature hash collision: '{first}' and '{second}' both hash to {hash}")]
    HashCollision {
        hash: String,
        first: String,
        second: String,
    },

    #[error("Event name '{name}' registered twice")]
    DuplicateName { name: String },

    #[error("Invalid event signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("Invalid parameter type '{ty}': {reason}")]
    InvalidType { ty: String, reason: String },

    #[error("Declared inputs for '{signature}' do not match its parameter list")]
    InputMismatch { signature: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a whole batch run. A single bad log never produces one.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_notes_match_output_contract() {
        assert_eq!(DecodeIssue::MissingTopics.to_string(), "Missing topics");
        assert_eq!(
            DecodeIssue::UnknownSignature.to_string(),
            "No ABI spec for event"
        );
        assert_eq!(
            DecodeIssue::failure("buffer overrun").to_string(),
            "Error decoding: buffer overrun"
        );
    }

    #[test]
    fn issue_kind_labels() {
        assert_eq!(DecodeIssue::MissingTopics.kind(), "missing_topics");
        assert_eq!(DecodeIssue::failure("x").kind(), "decode_failure");
    }
}
