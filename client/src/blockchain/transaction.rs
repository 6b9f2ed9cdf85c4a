use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionReceipt, TxHash, U256, U64};
use lottery_shared::TransactionState;
use serde::{Deserialize, Serialize};

/// A submitted, not yet confirmed, state-mutating call. Its effects are not
/// durable until [`ContractClient::confirm`](crate::ContractClient::confirm)
/// resolves.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    transaction_id: TxHash,
    method: String,
    request: Option<TypedTransaction>,
}

impl PendingTransaction {
    pub(crate) fn new(transaction_id: TxHash, method: impl Into<String>, request: TypedTransaction) -> Self {
        Self {
            transaction_id,
            method: method.into(),
            request: Some(request),
        }
    }

    /// Track a transaction submitted elsewhere. Revert reasons cannot be
    /// replayed for it.
    pub fn from_hash(transaction_id: TxHash) -> Self {
        Self {
            transaction_id,
            method: String::from("unknown"),
            request: None,
        }
    }

    pub fn transaction_id(&self) -> TxHash {
        self.transaction_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub(crate) fn request(&self) -> Option<&TypedTransaction> {
        self.request.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: Option<U256>,
    pub contract_address: Option<Address>,
    pub status: TransactionState,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == TransactionState::Confirmed
    }
}

/// Status 0 marks an on-chain revert; pre-Byzantium receipts carry no status.
pub(crate) fn receipt_reverted(receipt: &TransactionReceipt) -> bool {
    receipt.status == Some(U64::zero())
}

impl From<&TransactionReceipt> for Receipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|n| n.as_u64()),
            gas_used: receipt.gas_used,
            contract_address: receipt.contract_address,
            status: if receipt_reverted(receipt) {
                TransactionState::Failed
            } else {
                TransactionState::Confirmed
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: Option<u64>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: TxHash::from_low_u64_be(1),
            block_number: Some(U64::from(7u64)),
            status: status.map(U64::from),
            ..Default::default()
        }
    }

    #[test]
    fn receipt_status_maps_to_state() {
        let mined = Receipt::from(&receipt(Some(1)));
        assert_eq!(mined.status, TransactionState::Confirmed);
        assert!(mined.succeeded());
        assert_eq!(mined.block_number, Some(7));

        let reverted = Receipt::from(&receipt(Some(0)));
        assert_eq!(reverted.status, TransactionState::Failed);
        assert!(!reverted.succeeded());
    }

    #[test]
    fn receipt_without_status_is_not_a_revert() {
        assert!(!receipt_reverted(&receipt(None)));
        assert!(receipt_reverted(&receipt(Some(0))));
    }
}
