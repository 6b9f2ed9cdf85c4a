pub mod blockchain;
pub mod config;
pub mod error;
pub mod logging;
pub mod scripts;

#[cfg(test)]
mod test_support;

pub use blockchain::{ContractClient, ContractHandle, PendingTransaction, Receipt, SignerClient, TxOptions};
pub use config::Settings;
pub use error::{ClientError, ClientResult};
