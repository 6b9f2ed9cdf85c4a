use crate::blockchain::client::ContractClient;
use crate::blockchain::transaction::Receipt;
use crate::blockchain::types::{ContractHandle, TxOptions};
use crate::error::ClientResult;
use ethers::abi::{Detokenize, Token, Tokenizable};
use ethers::prelude::*;
use lottery_shared::{LOTTERY_CONTRACT, MUSICSLAYER_LOTTERY_CONTRACT};
use tracing::{debug, info};

/// High-level client for the `Lottery` contract. Every mutating method waits
/// for confirmation before returning.
pub struct LotteryContract<'a, M> {
    client: &'a ContractClient<M>,
    handle: ContractHandle,
}

impl<'a, M: Middleware + 'static> LotteryContract<'a, M> {
    /// Deploy a fresh lottery, funding it with `starting_balance` wei.
    pub async fn deploy(client: &'a ContractClient<M>, starting_balance: U256) -> ClientResult<Self> {
        let handle = client
            .deploy(LOTTERY_CONTRACT, Vec::new(), starting_balance)
            .await?;
        Ok(Self { client, handle })
    }

    pub fn attach(client: &'a ContractClient<M>, address: Address) -> ClientResult<Self> {
        let handle = client.attach(LOTTERY_CONTRACT, address)?;
        Ok(Self { client, handle })
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub async fn store(&self, value: U256) -> ClientResult<Receipt> {
        info!("Storing {} in lottery {:?}", value, self.address());
        self.transact("store", vec![value.into_token()], TxOptions::default())
            .await
    }

    pub async fn retrieve(&self) -> ClientResult<U256> {
        self.read("retrieve", Vec::new()).await
    }

    pub async fn register_address(&self, player: Address) -> ClientResult<Receipt> {
        info!("Registering player {:?}", player);
        self.transact("registerAddress", vec![player.into_token()], TxOptions::default())
            .await
    }

    pub async fn is_address_playing(&self, player: Address) -> ClientResult<bool> {
        self.read("isAddressPlaying", vec![player.into_token()]).await
    }

    pub async fn choose_winning_address(&self) -> ClientResult<Address> {
        self.read("chooseWinningAddress", Vec::new()).await
    }

    /// Add `amount` wei to the prize pot.
    pub async fn fund_lottery(&self, amount: U256) -> ClientResult<Receipt> {
        info!("Funding lottery pot with {} wei", amount);
        self.transact("fundLottery", Vec::new(), TxOptions::default().value(amount))
            .await
    }

    /// Add `amount` wei to the contract's own balance.
    pub async fn fund_contract(&self, amount: U256) -> ClientResult<Receipt> {
        info!("Funding lottery contract with {} wei", amount);
        self.transact("fundContract", Vec::new(), TxOptions::default().value(amount))
            .await
    }

    pub async fn end_lottery(&self) -> ClientResult<Receipt> {
        info!("Ending lottery {:?}", self.address());
        self.transact("endLottery", Vec::new(), TxOptions::default())
            .await
    }

    pub async fn get_balance(&self) -> ClientResult<U256> {
        self.read("getBalance", Vec::new()).await
    }

    pub async fn get_contract_enabled(&self) -> ClientResult<bool> {
        self.read("getContractEnabled", Vec::new()).await
    }

    pub async fn enable_contract(&self) -> ClientResult<Receipt> {
        self.transact("enableContract", Vec::new(), TxOptions::default())
            .await
    }

    pub async fn disable_contract(&self) -> ClientResult<Receipt> {
        self.transact("disableContract", Vec::new(), TxOptions::default())
            .await
    }

    pub async fn require_contract_enabled(&self) -> ClientResult<Receipt> {
        self.transact("requireContractEnabled", Vec::new(), TxOptions::default())
            .await
    }

    pub async fn remove_contract_funds(&self, amount: U256) -> ClientResult<Receipt> {
        info!("Removing {} wei from lottery {:?}", amount, self.address());
        self.transact("removeContractFunds", vec![amount.into_token()], TxOptions::default())
            .await
    }

    async fn transact(&self, method: &str, args: Vec<Token>, options: TxOptions) -> ClientResult<Receipt> {
        self.client.execute(&self.handle, method, args, options).await
    }

    async fn read<D: Detokenize>(&self, method: &str, args: Vec<Token>) -> ClientResult<D> {
        debug!("Reading {} from lottery {:?}", method, self.address());
        self.client
            .call_as(&self.handle, method, args, TxOptions::default())
            .await
    }
}

/// Constructor parameters of `MusicslayerLottery`.
#[derive(Debug, Clone)]
pub struct MusicslayerParams {
    pub max_tickets: U256,
    /// Wei per ticket.
    pub ticket_price: U256,
    /// Wei sent along with the deployment.
    pub starting_balance: U256,
}

pub struct MusicslayerLotteryContract<'a, M> {
    client: &'a ContractClient<M>,
    handle: ContractHandle,
}

impl<'a, M: Middleware + 'static> MusicslayerLotteryContract<'a, M> {
    pub async fn deploy(client: &'a ContractClient<M>, params: &MusicslayerParams) -> ClientResult<Self> {
        let handle = client
            .deploy(
                MUSICSLAYER_LOTTERY_CONTRACT,
                vec![params.max_tickets.into_token(), params.ticket_price.into_token()],
                params.starting_balance,
            )
            .await?;
        Ok(Self { client, handle })
    }

    pub fn attach(client: &'a ContractClient<M>, address: Address) -> ClientResult<Self> {
        let handle = client.attach(MUSICSLAYER_LOTTERY_CONTRACT, address)?;
        Ok(Self { client, handle })
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub async fn buy_tickets(&self, payment: U256) -> ClientResult<Receipt> {
        info!("Buying tickets with {} wei", payment);
        self.client
            .execute(&self.handle, "action_buyTickets", Vec::new(), TxOptions::default().value(payment))
            .await
    }

    pub async fn claimable_balance(&self, account: Address) -> ClientResult<U256> {
        self.client
            .call_as(
                &self.handle,
                "get_addressClaimableBalance",
                vec![account.into_token()],
                TxOptions::default(),
            )
            .await
    }

    pub async fn remove_contract_funds(&self, amount: U256) -> ClientResult<Receipt> {
        info!("Removing {} wei from {:?}", amount, self.address());
        self.client
            .execute(&self.handle, "removeContractFunds", vec![amount.into_token()], TxOptions::default())
            .await
    }
}
