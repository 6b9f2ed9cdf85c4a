//! Mocked-provider fixtures shared by the unit tests.

use crate::blockchain::{ClientSettings, ContractClient};
use ethers::abi::{self, Token};
use ethers::prelude::*;
use ethers::providers::{JsonRpcError, MockProvider, MockResponse};
use ethers::utils::hex;
use lottery_contracts::ArtifactStore;
use lottery_shared::{ERROR_STRING_SELECTOR, LOTTERY_CONTRACT, MUSICSLAYER_LOTTERY_CONTRACT};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub type MockClient = ContractClient<Provider<MockProvider>>;

pub const FAKE_BYTECODE: [u8; 5] = [0x60, 0x80, 0x60, 0x40, 0x52];

/// Client over a mocked provider, with deployable `Lottery` and
/// `MusicslayerLottery` artifacts and fixed gas so the provider is never
/// asked to fill anything in.
pub fn mock_client() -> (MockClient, MockProvider) {
    let (provider, mock) = Provider::mocked();

    let mut artifacts = ArtifactStore::with_builtin_interfaces().unwrap();
    for name in [LOTTERY_CONTRACT, MUSICSLAYER_LOTTERY_CONTRACT] {
        let deployable = artifacts
            .resolve(name)
            .unwrap()
            .clone()
            .with_bytecode(Bytes::from(FAKE_BYTECODE.to_vec()));
        artifacts.insert(deployable);
    }

    let settings = ClientSettings {
        confirmations: 1,
        poll_interval: Duration::from_millis(5),
        confirm_timeout: Duration::from_secs(5),
        gas_limit: Some(U256::from(3_000_000u64)),
        gas_price: Some(U256::from(1_000_000_000u64)),
    };

    (ContractClient::new(Arc::new(provider), artifacts, settings), mock)
}

/// Queue responses in the order the requests will be made.
pub fn expect(mock: &MockProvider, responses: Vec<MockResponse>) {
    // MockProvider pops responses from the back
    for response in responses.into_iter().rev() {
        mock.push_response(response);
    }
}

pub fn ok<T: Serialize>(value: T) -> MockResponse {
    MockResponse::Value(serde_json::to_value(value).unwrap())
}

pub fn null() -> MockResponse {
    MockResponse::Value(Value::Null)
}

pub fn rpc_error(message: &str, data: Option<Value>) -> MockResponse {
    MockResponse::Error(JsonRpcError {
        code: -32603,
        message: message.to_string(),
        data,
    })
}

/// `eth_call` / `eth_sendTransaction` failure as reported by a Hardhat node.
pub fn reverted(reason: &str) -> MockResponse {
    let mut data = ERROR_STRING_SELECTOR.to_vec();
    data.extend(abi::encode(&[Token::String(reason.to_string())]));

    rpc_error(
        &format!(
            "Error: VM Exception while processing transaction: reverted with reason string '{}'",
            reason
        ),
        Some(Value::String(format!("0x{}", hex::encode(data)))),
    )
}

pub fn returns(tokens: &[Token]) -> MockResponse {
    ok(Bytes::from(abi::encode(tokens)))
}

pub fn tx_hash(n: u64) -> H256 {
    H256::from_low_u64_be(n)
}

pub fn mined(hash: H256, block: u64) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: hash,
        block_number: Some(U64::from(block)),
        gas_used: Some(U256::from(21_000u64)),
        status: Some(U64::from(1u64)),
        ..Default::default()
    }
}

pub fn mined_reverted(hash: H256, block: u64) -> TransactionReceipt {
    TransactionReceipt {
        status: Some(U64::zero()),
        ..mined(hash, block)
    }
}

pub fn deployed(hash: H256, block: u64, contract: Address) -> TransactionReceipt {
    TransactionReceipt {
        contract_address: Some(contract),
        ..mined(hash, block)
    }
}

/// `eth_getCode` answer for an address holding a contract.
pub fn has_code() -> MockResponse {
    ok(Bytes::from(FAKE_BYTECODE.to_vec()))
}

pub fn no_code() -> MockResponse {
    ok(Bytes::default())
}

/// Responses for one submitted-then-confirmed call to a contract.
pub fn sent_and_mined(hash: H256, block: u64) -> Vec<MockResponse> {
    vec![has_code(), ok(hash), ok(mined(hash, block))]
}

/// A contract call the node refuses to accept.
pub fn send_rejected(rejection: MockResponse) -> Vec<MockResponse> {
    vec![has_code(), rejection]
}

pub fn sent_and_deployed(hash: H256, block: u64, contract: Address) -> Vec<MockResponse> {
    vec![ok(hash), ok(deployed(hash, block, contract))]
}
