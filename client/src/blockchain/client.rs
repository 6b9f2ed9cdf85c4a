use crate::blockchain::revert::RpcFailure;
use crate::blockchain::transaction::{receipt_reverted, PendingTransaction, Receipt};
use crate::blockchain::types::*;
use crate::config::Settings;
use crate::error::{ClientError, ClientResult};
use ethers::abi::{Detokenize, Token};
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use lottery_contracts::ArtifactStore;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

/// Signing HTTP middleware used by the scripts.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Deploys contracts and issues typed calls against them. Holds no remote
/// state: every read goes to the provider.
pub struct ContractClient<M> {
    middleware: Arc<M>,
    artifacts: Arc<ArtifactStore>,
    settings: ClientSettings,
}

impl<M> Clone for ContractClient<M> {
    fn clone(&self) -> Self {
        Self {
            middleware: self.middleware.clone(),
            artifacts: self.artifacts.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl ContractClient<SignerClient> {
    /// Connect to the configured node with the configured signing key.
    pub async fn connect(settings: &Settings) -> ClientResult<Self> {
        let provider = Provider::<Http>::try_from(settings.rpc_url.as_str())
            .map_err(|e| ClientError::Configuration(format!("Invalid RPC URL: {}", e)))?
            .interval(settings.poll_interval());

        let wallet: LocalWallet = settings
            .private_key
            .parse()
            .map_err(|e| ClientError::Configuration(format!("Invalid private key: {}", e)))?;

        let chain_id = match settings.chain_id {
            Some(chain_id) => chain_id,
            None => provider
                .get_chainid()
                .await
                .map_err(ClientError::provider)?
                .as_u64(),
        };
        let wallet = wallet.with_chain_id(chain_id);
        let sender = wallet.address();

        let artifacts = load_artifacts(&settings.artifacts_dir)?;

        info!(
            "Connected to {} (chain_id: {}) as {:?}, {} contract interface(s) available",
            settings.rpc_url,
            chain_id,
            sender,
            artifacts.len()
        );

        Ok(Self::new(
            Arc::new(SignerMiddleware::new(provider, wallet)),
            artifacts,
            settings.client_settings(),
        ))
    }
}

fn load_artifacts(dir: &Path) -> ClientResult<ArtifactStore> {
    let mut artifacts = ArtifactStore::with_builtin_interfaces()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    if dir.is_dir() {
        let loaded = artifacts
            .load_dir(dir)
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        debug!("Loaded {} artifact(s) from {}", loaded, dir.display());
    } else {
        warn!(
            "Artifacts directory {} not found; only built-in interfaces are available and deployment is disabled",
            dir.display()
        );
    }

    Ok(artifacts)
}

impl<M: Middleware + 'static> ContractClient<M> {
    pub fn new(middleware: Arc<M>, artifacts: ArtifactStore, settings: ClientSettings) -> Self {
        Self {
            middleware,
            artifacts: Arc::new(artifacts),
            settings,
        }
    }

    pub fn middleware(&self) -> Arc<M> {
        self.middleware.clone()
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Bind the interface of `contract_name` to an existing address. No
    /// network round trip.
    pub fn attach(&self, contract_name: &str, address: Address) -> ClientResult<ContractHandle> {
        let artifact = self
            .artifacts
            .resolve(contract_name)
            .map_err(|source| ClientError::Attach {
                contract: contract_name.to_string(),
                source,
            })?;

        debug!("Attached {} at {:?}", artifact.contract_name, address);
        Ok(ContractHandle::new(
            address,
            artifact.contract_name.clone(),
            artifact.abi.clone(),
        ))
    }

    /// Deploy a new instance and wait until the creation is mined.
    pub async fn deploy(
        &self,
        contract_name: &str,
        constructor_args: Vec<Token>,
        value: U256,
    ) -> ClientResult<ContractHandle> {
        self.deploy_with(contract_name, constructor_args, TxOptions::default().value(value))
            .await
    }

    pub async fn deploy_with(
        &self,
        contract_name: &str,
        constructor_args: Vec<Token>,
        options: TxOptions,
    ) -> ClientResult<ContractHandle> {
        let deployment_error = |message: String| ClientError::Deployment {
            contract: contract_name.to_string(),
            message,
            raw: Value::Null,
        };

        let artifact = self
            .artifacts
            .resolve(contract_name)
            .map_err(|e| deployment_error(e.to_string()))?;

        let bytecode = artifact
            .bytecode
            .as_ref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                deployment_error("no creation bytecode available; compile the contracts first".to_string())
            })?;

        let data = match artifact.abi.constructor() {
            Some(constructor) => constructor
                .encode_input(bytecode.to_vec(), &constructor_args)
                .map_err(|e| deployment_error(format!("constructor arguments do not match: {}", e)))?,
            None if constructor_args.is_empty() => bytecode.to_vec(),
            None => {
                return Err(deployment_error(format!(
                    "contract has no constructor but {} argument(s) were given",
                    constructor_args.len()
                )))
            }
        };

        info!(
            "Deploying {} with {} constructor argument(s)",
            artifact.contract_name,
            constructor_args.len()
        );

        let request = self.build_request(None, data.into(), &options);
        let pending = self
            .submit("constructor", request)
            .await
            .map_err(|e| e.into_deployment(contract_name))?;
        let receipt = self
            .confirm(&pending)
            .await
            .map_err(|e| e.into_deployment(contract_name))?;

        let address = receipt.contract_address.ok_or_else(|| {
            deployment_error(format!(
                "receipt for {:?} carries no contract address",
                receipt.transaction_hash
            ))
        })?;

        info!("{} deployed at {:?}", artifact.contract_name, address);
        Ok(ContractHandle::new(
            address,
            artifact.contract_name.clone(),
            artifact.abi.clone(),
        ))
    }

    /// Execute a read-only method with `eth_call` and decode its outputs.
    pub async fn call(
        &self,
        handle: &ContractHandle,
        method: &str,
        args: Vec<Token>,
        options: TxOptions,
    ) -> ClientResult<Vec<Token>> {
        let function = handle.function(method, args.len())?;
        let data = function
            .encode_input(&args)
            .map_err(|e| ClientError::InvalidArguments {
                method: method.to_string(),
                message: e.to_string(),
            })?;

        let request = self.build_request(Some(handle.address()), data.into(), &options);
        debug!("Calling {}.{} at {:?}", handle.name(), method, handle.address());

        let output = self.middleware.call(&request, None).await.map_err(|e| {
            let failure = RpcFailure::from_middleware_error(&e);
            if failure.reverted {
                ClientError::CallReverted {
                    method: method.to_string(),
                    reason: failure.reason,
                    raw: failure.raw,
                }
            } else {
                ClientError::Provider {
                    message: failure.message,
                    raw: failure.raw,
                }
            }
        })?;

        // Calling an address without code succeeds with empty output
        if output.is_empty() {
            self.ensure_code(handle, method).await?;
            if !function.outputs.is_empty() {
                return Err(ClientError::CallReverted {
                    method: method.to_string(),
                    reason: Some(format!("no data returned from {:?}", handle.address())),
                    raw: json!({ "to": handle.address(), "output": output }),
                });
            }
        }

        function
            .decode_output(&output)
            .map_err(|e| ClientError::CallReverted {
                method: method.to_string(),
                reason: Some(format!("return data does not match the interface: {}", e)),
                raw: json!({ "to": handle.address(), "output": output }),
            })
    }

    /// [`call`](Self::call), decoding the outputs into `D`.
    pub async fn call_as<D: Detokenize>(
        &self,
        handle: &ContractHandle,
        method: &str,
        args: Vec<Token>,
        options: TxOptions,
    ) -> ClientResult<D> {
        let tokens = self.call(handle, method, args, options).await?;
        D::from_tokens(tokens).map_err(|e| ClientError::InvalidArguments {
            method: method.to_string(),
            message: format!("unexpected return type: {}", e),
        })
    }

    /// Submit a state-mutating call. Returns once the provider has accepted
    /// it; pass the result to [`confirm`](Self::confirm).
    pub async fn send(
        &self,
        handle: &ContractHandle,
        method: &str,
        args: Vec<Token>,
        options: TxOptions,
    ) -> ClientResult<PendingTransaction> {
        let function = handle.function(method, args.len())?;
        let data = function
            .encode_input(&args)
            .map_err(|e| ClientError::InvalidArguments {
                method: method.to_string(),
                message: e.to_string(),
            })?;

        // A transaction to an account without code is mined as a success
        self.ensure_code(handle, method).await?;

        let request = self.build_request(Some(handle.address()), data.into(), &options);
        self.submit(method, request).await
    }

    /// [`send`](Self::send) followed by [`confirm`](Self::confirm).
    pub async fn execute(
        &self,
        handle: &ContractHandle,
        method: &str,
        args: Vec<Token>,
        options: TxOptions,
    ) -> ClientResult<Receipt> {
        let pending = self.send(handle, method, args, options).await?;
        self.confirm(&pending).await
    }

    /// Wait until the transaction is mined with the configured confirmation
    /// depth, or until the provider forgets it or the horizon elapses.
    pub async fn confirm(&self, pending: &PendingTransaction) -> ClientResult<Receipt> {
        let tx_hash = pending.transaction_id();
        let confirmations = self.settings.confirmations.max(1);

        debug!(
            "Waiting for transaction {:?} ({}) with {} confirmation(s)",
            tx_hash,
            pending.method(),
            confirmations
        );

        let receipt = timeout(
            self.settings.confirm_timeout,
            self.wait_for_receipt(tx_hash, confirmations),
        )
        .await
        .map_err(|_| ClientError::TransactionDropped {
            tx_hash,
            message: format!(
                "not confirmed within {}s",
                self.settings.confirm_timeout.as_secs()
            ),
        })??;

        if receipt_reverted(&receipt) {
            let (reason, raw) = self.replay_revert(pending, &receipt).await;
            warn!(
                "Transaction {:?} ({}) reverted: {}",
                tx_hash,
                pending.method(),
                reason.as_deref().unwrap_or("no reason given")
            );
            return Err(ClientError::TransactionReverted { tx_hash, reason, raw });
        }

        info!(
            "Transaction {:?} ({}) confirmed in block {}",
            tx_hash,
            pending.method(),
            receipt.block_number.map(|n| n.as_u64()).unwrap_or_default()
        );

        Ok(Receipt::from(&receipt))
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> ClientResult<TransactionReceipt> {
        loop {
            let receipt = self
                .middleware
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(ClientError::provider)?;

            match receipt {
                Some(receipt) if confirmations <= 1 || receipt_reverted(&receipt) => {
                    return Ok(receipt)
                }
                Some(receipt) => {
                    if let Some(mined) = receipt.block_number {
                        let current = self
                            .middleware
                            .get_block_number()
                            .await
                            .map_err(ClientError::provider)?;
                        let depth = current.as_u64().saturating_sub(mined.as_u64()) + 1;
                        if depth >= confirmations as u64 {
                            return Ok(receipt);
                        }
                    }
                }
                None => {
                    let known = self
                        .middleware
                        .get_transaction(tx_hash)
                        .await
                        .map_err(ClientError::provider)?;
                    if known.is_none() {
                        return Err(ClientError::TransactionDropped {
                            tx_hash,
                            message: "transaction is no longer known to the provider".to_string(),
                        });
                    }
                }
            }

            sleep(self.settings.poll_interval).await;
        }
    }

    /// Re-run the reverted request against the parent block to recover the
    /// revert reason.
    async fn replay_revert(
        &self,
        pending: &PendingTransaction,
        receipt: &TransactionReceipt,
    ) -> (Option<String>, Value) {
        let receipt_json = serde_json::to_value(receipt).unwrap_or(Value::Null);

        let Some(request) = pending.request() else {
            return (None, receipt_json);
        };

        let block = receipt.block_number.map(|n| {
            BlockId::Number(BlockNumber::Number(U64::from(n.as_u64().saturating_sub(1))))
        });

        match self.middleware.call(request, block).await {
            Ok(_) => (None, receipt_json),
            Err(e) => {
                let failure = RpcFailure::from_middleware_error(&e);
                (failure.reason, failure.raw)
            }
        }
    }

    async fn ensure_code(&self, handle: &ContractHandle, method: &str) -> ClientResult<()> {
        let code = self
            .middleware
            .get_code(handle.address(), None)
            .await
            .map_err(ClientError::provider)?;

        if code.is_empty() {
            return Err(ClientError::CallReverted {
                method: method.to_string(),
                reason: Some(format!("no contract code at {:?}", handle.address())),
                raw: json!({ "to": handle.address(), "code": code }),
            });
        }
        Ok(())
    }

    async fn submit(&self, method: &str, request: TypedTransaction) -> ClientResult<PendingTransaction> {
        debug!("Submitting {} transaction", method);

        let pending = self
            .middleware
            .send_transaction(request.clone(), None)
            .await
            .map_err(|e| {
                let failure = RpcFailure::from_middleware_error(&e);
                if failure.reverted {
                    // The node executed it before broadcast and it reverted
                    ClientError::CallReverted {
                        method: method.to_string(),
                        reason: failure.reason,
                        raw: failure.raw,
                    }
                } else {
                    ClientError::Submission {
                        method: method.to_string(),
                        message: failure.message,
                        raw: failure.raw,
                    }
                }
            })?;

        let tx_hash = pending.tx_hash();
        info!("Transaction {:?} ({}) submitted", tx_hash, method);

        Ok(PendingTransaction::new(tx_hash, method, request))
    }

    fn build_request(&self, to: Option<Address>, data: Bytes, options: &TxOptions) -> TypedTransaction {
        let mut request = TransactionRequest::new().data(data);

        if let Some(to) = to {
            request = request.to(to);
        }
        if let Some(from) = options.from.or_else(|| self.middleware.default_sender()) {
            request = request.from(from);
        }
        if let Some(value) = options.value {
            request = request.value(value);
        }
        if let Some(gas) = options.gas.or(self.settings.gas_limit) {
            request = request.gas(gas);
        }
        if let Some(gas_price) = options.gas_price.or(self.settings.gas_price) {
            request = request.gas_price(gas_price);
        }

        request.into()
    }
}
