use crate::blockchain::revert::RpcFailure;
use ethers::providers::MiddlewareError;
use ethers::types::TxHash;
use lottery_contracts::ArtifactError;
use lottery_shared::{ErrorKind, ErrorReport};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("deployment of {contract} failed: {message}")]
    Deployment {
        contract: String,
        message: String,
        raw: Value,
    },

    #[error("cannot attach {contract}: {source}")]
    Attach {
        contract: String,
        #[source]
        source: ArtifactError,
    },

    #[error("call to {method} reverted{}", reason_suffix(.reason))]
    CallReverted {
        method: String,
        reason: Option<String>,
        raw: Value,
    },

    #[error("transaction for {method} rejected by provider: {message}")]
    Submission {
        method: String,
        message: String,
        raw: Value,
    },

    #[error("transaction {tx_hash:?} reverted{}", reason_suffix(.reason))]
    TransactionReverted {
        tx_hash: TxHash,
        reason: Option<String>,
        raw: Value,
    },

    #[error("transaction {tx_hash:?} dropped: {message}")]
    TransactionDropped { tx_hash: TxHash, message: String },

    #[error("invalid arguments for {method}: {message}")]
    InvalidArguments { method: String, message: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("provider error: {message}")]
    Provider { message: String, raw: Value },
}

pub type ClientResult<T> = Result<T, ClientError>;

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {}", reason),
        None => String::new(),
    }
}

impl ClientError {
    /// Wrap a provider failure that is not attributable to contract execution.
    pub(crate) fn provider<E: MiddlewareError>(err: E) -> Self {
        let failure = RpcFailure::from_middleware_error(&err);
        ClientError::Provider {
            message: failure.message,
            raw: failure.raw,
        }
    }

    /// Fold any failure during a deployment into `Deployment`, keeping the
    /// underlying message and provider payload.
    pub(crate) fn into_deployment(self, contract: &str) -> Self {
        match self {
            err @ ClientError::Deployment { .. } => err,
            other => ClientError::Deployment {
                contract: contract.to_string(),
                message: other.to_string(),
                raw: other.raw(),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Deployment { .. } => ErrorKind::DeploymentError,
            ClientError::Attach { .. } => ErrorKind::AttachError,
            ClientError::CallReverted { .. } => ErrorKind::CallRevertedError,
            ClientError::Submission { .. } => ErrorKind::SubmissionError,
            ClientError::TransactionReverted { .. } => ErrorKind::TransactionRevertedError,
            ClientError::TransactionDropped { .. } => ErrorKind::TransactionDroppedError,
            ClientError::InvalidArguments { .. } => ErrorKind::InvalidArgumentsError,
            ClientError::Configuration(_) | ClientError::Config(_) => ErrorKind::ConfigurationError,
            ClientError::Provider { .. } => ErrorKind::ProviderError,
        }
    }

    /// Revert reason reported by the contract, if any.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            ClientError::CallReverted { reason, .. }
            | ClientError::TransactionReverted { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// Raw provider payload attached to the failure.
    pub fn raw(&self) -> Value {
        match self {
            ClientError::Deployment { raw, .. }
            | ClientError::CallReverted { raw, .. }
            | ClientError::Submission { raw, .. }
            | ClientError::TransactionReverted { raw, .. }
            | ClientError::Provider { raw, .. } => raw.clone(),
            ClientError::TransactionDropped { tx_hash, .. } => {
                serde_json::json!({ "transactionHash": tx_hash })
            }
            _ => Value::Null,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::new(self.kind(), self.to_string(), self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::H256;

    #[test]
    fn reverted_call_message_includes_reason() {
        let err = ClientError::CallReverted {
            method: "registerAddress".to_string(),
            reason: Some("Address already playing".to_string()),
            raw: Value::Null,
        };

        assert_eq!(err.to_string(), "call to registerAddress reverted: Address already playing");
        assert_eq!(err.kind(), ErrorKind::CallRevertedError);
        assert_eq!(err.revert_reason(), Some("Address already playing"));
    }

    #[test]
    fn reverted_without_reason_has_no_suffix() {
        let err = ClientError::TransactionReverted {
            tx_hash: H256::zero(),
            reason: None,
            raw: Value::Null,
        };

        assert!(err.to_string().ends_with("reverted"));
        assert_eq!(err.revert_reason(), None);
    }

    #[test]
    fn deployment_wraps_underlying_failure() {
        let raw = serde_json::json!({ "code": -32000, "message": "insufficient funds for gas * price + value" });
        let err = ClientError::Submission {
            method: "constructor".to_string(),
            message: "insufficient funds for gas * price + value".to_string(),
            raw: raw.clone(),
        }
        .into_deployment("Lottery");

        assert_eq!(err.kind(), ErrorKind::DeploymentError);
        assert!(err.to_string().contains("insufficient funds"));

        let report = err.report();
        assert_eq!(report.kind, ErrorKind::DeploymentError);
        assert_eq!(report.raw, raw);
    }
}
