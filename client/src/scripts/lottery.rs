use super::{address, expect_revert};
use crate::blockchain::{ContractClient, LotteryContract};
use crate::error::ClientResult;
use ethers::prelude::*;
use lottery_shared::ErrorReport;
use tracing::info;

const PLAYER_ONE: &str = "0xc0ffee254729296a45a3885639AC7E10F9d54979";
const PLAYER_TWO: &str = "0x999999cf1046e68e36E1aA2E0E07105eDDD1f08E";
const FUNDED_PLAYER: &str = "0xdD870fA1b7C4700F2BD7f44238821C26f7392148";

const MICRO_ETHER: u64 = 1_000_000_000_000; // 0.000001 ether

#[derive(Debug, Clone, Default)]
pub struct GetInfo {
    pub starting_balance: U256,
}

/// Deploy a lottery and report where it landed.
pub async fn get_info<M: Middleware + 'static>(client: &ContractClient<M>, config: &GetInfo) -> ClientResult<Address> {
    let lottery = LotteryContract::deploy(client, config.starting_balance).await?;
    info!("Lottery deployed at: {:?}", lottery.address());
    Ok(lottery.address())
}

#[derive(Debug, Clone)]
pub struct ChangeValue {
    pub value: U256,
}

impl Default for ChangeValue {
    fn default() -> Self {
        Self {
            value: U256::from(777),
        }
    }
}

/// Deploy, store a value, read it back.
pub async fn change_value<M: Middleware + 'static>(client: &ContractClient<M>, config: &ChangeValue) -> ClientResult<U256> {
    let deployed = LotteryContract::deploy(client, U256::zero()).await?;
    info!("Lottery deployed at: {:?}", deployed.address());

    let lottery = LotteryContract::attach(client, deployed.address())?;
    lottery.store(config.value).await?;

    let value = lottery.retrieve().await?;
    info!("Value: {}", value);
    Ok(value)
}

#[derive(Debug, Clone)]
pub struct PlayLottery {
    pub starting_balance: U256,
    pub player_one: Address,
    pub player_two: Address,
}

impl PlayLottery {
    pub fn new() -> ClientResult<Self> {
        Ok(Self {
            starting_balance: U256::zero(),
            player_one: address(PLAYER_ONE)?,
            player_two: address(PLAYER_TWO)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PlayLotteryOutcome {
    pub lottery: Address,
    pub playing_before: bool,
    pub playing_after: bool,
    /// Revert raised by registering player one a second time.
    pub duplicate_rejection: Option<ErrorReport>,
    pub winner: Address,
}

/// Register two players (one of them twice) and pick a winner.
pub async fn play_lottery<M: Middleware + 'static>(
    client: &ContractClient<M>,
    config: &PlayLottery,
) -> ClientResult<PlayLotteryOutcome> {
    let lottery = LotteryContract::deploy(client, config.starting_balance).await?;

    let playing_before = lottery.is_address_playing(config.player_one).await?;
    info!("isPlaying: {}", playing_before);

    lottery.register_address(config.player_one).await?;

    let playing_after = lottery.is_address_playing(config.player_one).await?;
    info!("isPlaying: {}", playing_after);

    let duplicate_rejection = expect_revert(
        "registering the same address twice",
        lottery.register_address(config.player_one).await,
    )?;

    lottery.register_address(config.player_two).await?;

    let winner = lottery.choose_winning_address().await?;
    info!("Winner: {:?}", winner);

    Ok(PlayLotteryOutcome {
        lottery: lottery.address(),
        playing_before,
        playing_after,
        duplicate_rejection,
        winner,
    })
}

#[derive(Debug, Clone)]
pub struct FundLottery {
    pub starting_balance: U256,
    pub player: Address,
    pub lottery_amount: U256,
    pub contract_amount: U256,
}

impl FundLottery {
    pub fn new() -> ClientResult<Self> {
        Ok(Self {
            starting_balance: U256::from(MICRO_ETHER),
            player: address(FUNDED_PLAYER)?,
            lottery_amount: U256::from(7_230_000_000u64), // 0.00000000723 ether
            contract_amount: U256::from(20 * MICRO_ETHER), // 0.00002 ether
        })
    }
}

#[derive(Debug, Clone)]
pub struct FundLotteryOutcome {
    pub winner: Address,
    pub balance_before: U256,
    pub balance_after: U256,
}

/// Register a player, fund the pot and the contract, then end the round.
pub async fn fund_lottery<M: Middleware + 'static>(
    client: &ContractClient<M>,
    config: &FundLottery,
) -> ClientResult<FundLotteryOutcome> {
    let lottery = LotteryContract::deploy(client, config.starting_balance).await?;

    lottery.register_address(config.player).await?;

    let winner = lottery.choose_winning_address().await?;
    info!("Winner: {:?}", winner);

    lottery.fund_lottery(config.lottery_amount).await?;
    lottery.fund_contract(config.contract_amount).await?;

    let balance_before = lottery.get_balance().await?;
    info!("Balance Before: {}", balance_before);

    lottery.end_lottery().await?;

    let balance_after = lottery.get_balance().await?;
    info!("Balance After: {}", balance_after);

    Ok(FundLotteryOutcome {
        winner,
        balance_before,
        balance_after,
    })
}

#[derive(Debug, Clone)]
pub struct ToggleContract {
    pub starting_balance: U256,
}

impl Default for ToggleContract {
    fn default() -> Self {
        Self {
            starting_balance: U256::from(MICRO_ETHER),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToggleContractOutcome {
    pub enabled_before: bool,
    pub enabled_after: bool,
    /// Revert raised by `requireContractEnabled` while disabled.
    pub disabled_rejection: Option<ErrorReport>,
}

/// Disable the contract and check that guarded calls are refused.
pub async fn toggle_contract<M: Middleware + 'static>(
    client: &ContractClient<M>,
    config: &ToggleContract,
) -> ClientResult<ToggleContractOutcome> {
    let lottery = LotteryContract::deploy(client, config.starting_balance).await?;

    let enabled_before = lottery.get_contract_enabled().await?;
    info!("enabled? {}", enabled_before);

    lottery.disable_contract().await?;

    let enabled_after = lottery.get_contract_enabled().await?;
    info!("enabled? {}", enabled_after);

    let disabled_rejection = expect_revert(
        "requireContractEnabled on a disabled contract",
        lottery.require_contract_enabled().await,
    )?;

    Ok(ToggleContractOutcome {
        enabled_before,
        enabled_after,
        disabled_rejection,
    })
}
