use crate::blockchain::{ContractClient, MusicslayerLotteryContract, MusicslayerParams, Receipt};
use super::address;
use crate::error::ClientResult;
use ethers::prelude::*;
use tracing::info;

const CLAIMANT: &str = "0xb15b75994a040E63Eb961d8c3D26cB0A4e9D5E49";

impl Default for MusicslayerParams {
    /// Five tickets at 0.01 ether, deployed with 0.00000000000001 ether.
    fn default() -> Self {
        Self {
            max_tickets: U256::from(5),
            ticket_price: U256::exp10(16),
            starting_balance: U256::exp10(4),
        }
    }
}

async fn deploy_musicslayer<'a, M: Middleware + 'static>(
    client: &'a ContractClient<M>,
    params: &MusicslayerParams,
) -> ClientResult<MusicslayerLotteryContract<'a, M>> {
    let deployed = MusicslayerLotteryContract::deploy(client, params).await?;
    info!("Lottery deployed at: {:?}", deployed.address());
    MusicslayerLotteryContract::attach(client, deployed.address())
}

#[derive(Debug, Clone, Default)]
pub struct BuyTickets {
    pub params: MusicslayerParams,
    /// Wei attached to `action_buyTickets`.
    pub payment: U256,
}

pub async fn buy_tickets<M: Middleware + 'static>(client: &ContractClient<M>, config: &BuyTickets) -> ClientResult<Receipt> {
    let lottery = deploy_musicslayer(client, &config.params).await?;
    let receipt = lottery.buy_tickets(config.payment).await?;
    info!("Tickets bought in block {:?}", receipt.block_number);
    Ok(receipt)
}

#[derive(Debug, Clone)]
pub struct ClaimableBalance {
    pub params: MusicslayerParams,
    pub account: Address,
}

impl ClaimableBalance {
    pub fn new() -> ClientResult<Self> {
        Ok(Self {
            params: MusicslayerParams::default(),
            account: address(CLAIMANT)?,
        })
    }
}

pub async fn claimable_balance<M: Middleware + 'static>(
    client: &ContractClient<M>,
    config: &ClaimableBalance,
) -> ClientResult<U256> {
    let lottery = deploy_musicslayer(client, &config.params).await?;
    let balance = lottery.claimable_balance(config.account).await?;
    info!("Claimable balance of {:?}: {}", config.account, balance);
    Ok(balance)
}

#[derive(Debug, Clone)]
pub struct RemoveFunds {
    pub params: MusicslayerParams,
    pub amount: U256,
}

impl Default for RemoveFunds {
    fn default() -> Self {
        Self {
            params: MusicslayerParams::default(),
            amount: U256::from(5000),
        }
    }
}

pub async fn remove_funds<M: Middleware + 'static>(client: &ContractClient<M>, config: &RemoveFunds) -> ClientResult<Receipt> {
    let lottery = deploy_musicslayer(client, &config.params).await?;
    lottery.remove_contract_funds(config.amount).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use ethers::abi::Token;
    use lottery_shared::{ErrorKind, TransactionState};

    #[tokio::test]
    async fn buy_tickets_confirms_purchase() {
        let (client, mock) = mock_client();
        let contract = Address::from_low_u64_be(0x51);

        let mut responses = sent_and_deployed(tx_hash(1), 1, contract);
        responses.extend(sent_and_mined(tx_hash(2), 2));
        expect(&mock, responses);

        let receipt = buy_tickets(&client, &BuyTickets::default()).await.unwrap();
        assert_eq!(receipt.transaction_hash, tx_hash(2));
        assert_eq!(receipt.status, TransactionState::Confirmed);
    }

    #[tokio::test]
    async fn claimable_balance_reads_account() {
        let (client, mock) = mock_client();
        let contract = Address::from_low_u64_be(0x52);

        let mut responses = sent_and_deployed(tx_hash(1), 1, contract);
        responses.push(returns(&[Token::Uint(U256::from(1234))]));
        expect(&mock, responses);

        let balance = claimable_balance(&client, &ClaimableBalance::new().unwrap()).await.unwrap();
        assert_eq!(balance, U256::from(1234));
    }

    #[tokio::test]
    async fn remove_funds_surfaces_revert() {
        let (client, mock) = mock_client();
        let contract = Address::from_low_u64_be(0x53);

        let mut responses = sent_and_deployed(tx_hash(1), 1, contract);
        responses.extend(send_rejected(reverted("Insufficient contract funds")));
        expect(&mock, responses);

        let err = remove_funds(&client, &RemoveFunds::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CallRevertedError);
        assert_eq!(err.revert_reason(), Some("Insufficient contract funds"));
    }

    #[test]
    fn default_params() {
        let params = MusicslayerParams::default();
        assert_eq!(params.ticket_price, ethers::utils::parse_ether("0.01").unwrap());
        assert_eq!(params.starting_balance, ethers::utils::parse_ether("0.00000000000001").unwrap());
        assert_eq!(
            ClaimableBalance::new().unwrap().account,
            "0xb15b75994a040E63Eb961d8c3D26cB0A4e9D5E49".parse::<Address>().unwrap()
        );
    }
}
