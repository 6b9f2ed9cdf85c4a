use crate::blockchain::{ContractClient, Receipt, TxOptions};
use crate::error::ClientResult;
use ethers::prelude::*;
use lottery_shared::{CL_CONTRACT, FOO_CONTRACT};
use tracing::info;

/// Deploy a parameterless contract and send one argument-free method.
async fn deploy_and_poke<M: Middleware + 'static>(
    client: &ContractClient<M>,
    contract_name: &str,
    method: &str,
) -> ClientResult<Receipt> {
    let handle = client.deploy(contract_name, Vec::new(), U256::zero()).await?;
    info!("{} deployed at: {:?}", contract_name, handle.address());

    let receipt = client
        .execute(&handle, method, Vec::new(), TxOptions::default())
        .await?;
    info!("{} confirmed in block {:?}", method, receipt.block_number);
    Ok(receipt)
}

pub async fn run_foo<M: Middleware + 'static>(client: &ContractClient<M>) -> ClientResult<Receipt> {
    deploy_and_poke(client, FOO_CONTRACT, "foo").await
}

pub async fn run_cl<M: Middleware + 'static>(client: &ContractClient<M>) -> ClientResult<Receipt> {
    deploy_and_poke(client, CL_CONTRACT, "clTest").await
}
