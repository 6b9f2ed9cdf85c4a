pub mod client;
pub mod contract;
pub mod revert;
pub mod transaction;
pub mod types;


pub use client::{ContractClient, SignerClient};
pub use contract::{LotteryContract, MusicslayerLotteryContract, MusicslayerParams};
pub use transaction::{PendingTransaction, Receipt};
pub use types::*;
