use crate::error::{ClientError, ClientResult};
use ethers::abi::{Abi, Function};
use ethers::prelude::*;
use lottery_shared::{
    DEFAULT_CONFIRMATIONS, DEFAULT_CONFIRM_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS,
};
use std::sync::Arc;
use std::time::Duration;

/// A deployed (or attached) contract: address plus its interface descriptor.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    address: Address,
    name: String,
    abi: Arc<Abi>,
}

impl ContractHandle {
    pub(crate) fn new(address: Address, name: impl Into<String>, abi: Arc<Abi>) -> Self {
        Self {
            address,
            name: name.into(),
            abi,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    /// Resolve `method`, picking the overload that takes `arity` arguments.
    pub fn function(&self, method: &str, arity: usize) -> ClientResult<&Function> {
        let overloads = self
            .abi
            .functions_by_name(method)
            .map_err(|_| ClientError::InvalidArguments {
                method: method.to_string(),
                message: format!("{} has no method named {}", self.name, method),
            })?;

        overloads
            .iter()
            .find(|f| f.inputs.len() == arity)
            .ok_or_else(|| {
                let expected: Vec<String> =
                    overloads.iter().map(|f| f.inputs.len().to_string()).collect();
                ClientError::InvalidArguments {
                    method: method.to_string(),
                    message: format!(
                        "expected {} argument(s), got {}",
                        expected.join(" or "),
                        arity
                    ),
                }
            })
    }
}

/// Per-request overrides. Unset fields fall back to client settings, then to
/// whatever the provider fills in.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    pub value: Option<U256>,
    pub gas: Option<U256>,
    pub gas_price: Option<U256>,
    pub from: Option<Address>,
}

impl TxOptions {
    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn gas(mut self, gas: U256) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub confirmations: usize,
    pub poll_interval: Duration,
    /// Horizon after which an unconfirmed transaction counts as dropped.
    pub confirm_timeout: Duration,
    pub gas_limit: Option<U256>,
    pub gas_price: Option<U256>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            confirmations: DEFAULT_CONFIRMATIONS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            confirm_timeout: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
            gas_limit: None,
            gas_price: None,
        }
    }
}
