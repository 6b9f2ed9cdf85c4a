use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed contract interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DeploymentError,
    AttachError,
    CallRevertedError,
    SubmissionError,
    TransactionRevertedError,
    TransactionDroppedError,
    InvalidArgumentsError,
    ConfigurationError,
    ProviderError,
}

impl ErrorKind {
    /// Whether the remote contract itself rejected the request.
    pub fn is_revert(&self) -> bool {
        matches!(
            self,
            ErrorKind::CallRevertedError | ErrorKind::TransactionRevertedError
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::DeploymentError => write!(f, "DeploymentError"),
            ErrorKind::AttachError => write!(f, "AttachError"),
            ErrorKind::CallRevertedError => write!(f, "CallRevertedError"),
            ErrorKind::SubmissionError => write!(f, "SubmissionError"),
            ErrorKind::TransactionRevertedError => write!(f, "TransactionRevertedError"),
            ErrorKind::TransactionDroppedError => write!(f, "TransactionDroppedError"),
            ErrorKind::InvalidArgumentsError => write!(f, "InvalidArgumentsError"),
            ErrorKind::ConfigurationError => write!(f, "ConfigurationError"),
            ErrorKind::ProviderError => write!(f, "ProviderError"),
        }
    }
}

/// Serializable snapshot of a failure, printed by scripts before they exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub kind: ErrorKind,
    /// Provider payload (JSON-RPC error object) when the failure came from the node.
    pub raw: serde_json::Value,
}

impl ErrorReport {
    pub fn new(kind: ErrorKind, message: impl Into<String>, raw: serde_json::Value) -> Self {
        Self {
            message: message.into(),
            kind,
            raw,
        }
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{}: {}", self.kind, self.message))
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome recorded on a mined transaction's receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    Confirmed,
    Failed,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionState::Confirmed => write!(f, "confirmed"),
            TransactionState::Failed => write!(f, "failed"),
        }
    }
}
