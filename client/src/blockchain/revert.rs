use ethers::abi::{self, ParamType};
use ethers::providers::{JsonRpcError, MiddlewareError};
use ethers::utils::hex;
use lottery_shared::{ERROR_STRING_SELECTOR, PANIC_SELECTOR};
use serde_json::{json, Value};

/// What a failed JSON-RPC request tells us about contract execution.
#[derive(Debug, Clone)]
pub(crate) struct RpcFailure {
    pub message: String,
    pub reason: Option<String>,
    /// The node executed the call and it reverted.
    pub reverted: bool,
    pub raw: Value,
}

impl RpcFailure {
    pub(crate) fn from_middleware_error<E: MiddlewareError>(err: &E) -> Self {
        match err.as_error_response() {
            Some(response) => Self::from_response(response),
            None => {
                let message = err.to_string();
                let reason = reason_from_message(&message);
                let reverted = reason.is_some() || mentions_revert(&message);
                Self {
                    raw: Value::String(message.clone()),
                    message,
                    reason,
                    reverted,
                }
            }
        }
    }

    pub(crate) fn from_response(response: &JsonRpcError) -> Self {
        let data = response.as_revert_data().filter(|d| !d.is_empty());
        let reason = data
            .as_ref()
            .and_then(|d| decode_revert_reason(d))
            .or_else(|| reason_from_message(&response.message));
        let reverted = response.is_revert() || data.is_some() || reason.is_some();

        Self {
            message: response.message.clone(),
            reason,
            reverted,
            raw: json!({
                "code": response.code,
                "message": response.message,
                "data": response.data,
            }),
        }
    }
}

/// Decode `Error(string)`, `Panic(uint256)` or name the custom error selector.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if data.len() < 4 {
        return None;
    }
    let (selector, payload) = data.split_at(4);

    if selector == ERROR_STRING_SELECTOR {
        return abi::decode(&[ParamType::String], payload)
            .ok()?
            .into_iter()
            .next()?
            .into_string();
    }

    if selector == PANIC_SELECTOR {
        let code = abi::decode(&[ParamType::Uint(256)], payload)
            .ok()?
            .into_iter()
            .next()?
            .into_uint()?;
        return Some(format!("panic code {:#x}", code));
    }

    Some(format!("custom error 0x{}", hex::encode(selector)))
}

/// Pull a reason out of node error messages, e.g.
/// `VM Exception while processing transaction: reverted with reason string 'x'`.
pub fn reason_from_message(message: &str) -> Option<String> {
    const QUOTED: &[&str] = &["reverted with reason string '", "reverted with custom error '"];
    for marker in QUOTED {
        if let Some(start) = message.find(marker) {
            let rest = &message[start + marker.len()..];
            let reason = match rest.rfind('\'') {
                Some(end) => &rest[..end],
                None => rest,
            };
            return Some(reason.to_string());
        }
    }

    for marker in ["execution reverted: ", "revert "] {
        if let Some(start) = message.find(marker) {
            let reason = message[start + marker.len()..].trim();
            if !reason.is_empty() {
                return Some(reason.to_string());
            }
        }
    }

    None
}

fn mentions_revert(message: &str) -> bool {
    message.to_ascii_lowercase().contains("revert")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::Token;
    use ethers::types::U256;

    fn error_string(reason: &str) -> Vec<u8> {
        let mut data = ERROR_STRING_SELECTOR.to_vec();
        data.extend(abi::encode(&[Token::String(reason.to_string())]));
        data
    }

    fn rpc_error(message: &str, data: Option<Value>) -> JsonRpcError {
        JsonRpcError {
            code: -32603,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn decodes_error_string() {
        assert_eq!(
            decode_revert_reason(&error_string("Address already playing")).as_deref(),
            Some("Address already playing")
        );
    }

    #[test]
    fn decodes_panic_code() {
        let mut data = PANIC_SELECTOR.to_vec();
        data.extend(abi::encode(&[Token::Uint(U256::from(0x11))]));

        assert_eq!(decode_revert_reason(&data).as_deref(), Some("panic code 0x11"));
    }

    #[test]
    fn names_unknown_selectors() {
        assert_eq!(
            decode_revert_reason(&[0xde, 0xad, 0xbe, 0xef]).as_deref(),
            Some("custom error 0xdeadbeef")
        );
        assert_eq!(decode_revert_reason(&[0x01]), None);
    }

    #[test]
    fn parses_node_messages() {
        assert_eq!(
            reason_from_message(
                "Error: VM Exception while processing transaction: reverted with reason string 'Contract disabled'"
            )
            .as_deref(),
            Some("Contract disabled")
        );
        assert_eq!(
            reason_from_message("VM Exception while processing transaction: revert Not enough funds").as_deref(),
            Some("Not enough funds")
        );
        assert_eq!(
            reason_from_message("execution reverted: Only owner").as_deref(),
            Some("Only owner")
        );
        assert_eq!(reason_from_message("nonce too low"), None);
    }

    #[test]
    fn response_with_revert_data_is_a_revert() {
        let data = format!("0x{}", hex::encode(error_string("Lottery closed")));
        let failure = RpcFailure::from_response(&rpc_error(
            "Error: VM Exception while processing transaction: reverted with reason string 'Lottery closed'",
            Some(Value::String(data)),
        ));

        assert!(failure.reverted);
        assert_eq!(failure.reason.as_deref(), Some("Lottery closed"));
        assert_eq!(failure.raw["code"], -32603);
    }

    #[test]
    fn nested_and_empty_revert_data() {
        let nested = RpcFailure::from_response(&rpc_error(
            "execution reverted",
            Some(json!({ "data": format!("0x{}", hex::encode(error_string("nested"))) })),
        ));
        assert_eq!(nested.reason.as_deref(), Some("nested"));

        let wrapped = RpcFailure::from_response(&rpc_error(
            "execution reverted",
            Some(json!({
                "originalError": { "data": format!("0x{}", hex::encode(error_string("wrapped"))) }
            })),
        ));
        assert!(wrapped.reverted);
        assert_eq!(wrapped.reason.as_deref(), Some("wrapped"));

        let bare = RpcFailure::from_response(&rpc_error(
            "Transaction reverted without a reason string",
            Some(Value::String("0x".to_string())),
        ));
        assert!(bare.reverted);
        assert_eq!(bare.reason, None);
    }

    #[test]
    fn rejection_without_revert() {
        let failure = RpcFailure::from_response(&rpc_error(
            "sender doesn't have enough funds to send tx",
            None,
        ));

        assert!(!failure.reverted);
        assert_eq!(failure.reason, None);
        assert_eq!(failure.message, "sender doesn't have enough funds to send tx");
    }
}
