use crate::artifact::{Artifact, ArtifactError};
use ethers::abi::Abi;
use lottery_shared::{CL_CONTRACT, FOO_CONTRACT, LOTTERY_CONTRACT, MUSICSLAYER_LOTTERY_CONTRACT};

// ABI-only descriptors. A compiled artifact of the same name always wins.

const LOTTERY_ABI: &str = r#"[
    {"type": "constructor", "inputs": [], "stateMutability": "payable"},
    {"type": "function", "name": "store", "stateMutability": "nonpayable",
     "inputs": [{"name": "num", "type": "uint256"}], "outputs": []},
    {"type": "function", "name": "retrieve", "stateMutability": "view",
     "inputs": [], "outputs": [{"name": "", "type": "uint256"}]},
    {"type": "function", "name": "registerAddress", "stateMutability": "nonpayable",
     "inputs": [{"name": "playerAddress", "type": "address"}], "outputs": []},
    {"type": "function", "name": "isAddressPlaying", "stateMutability": "view",
     "inputs": [{"name": "playerAddress", "type": "address"}], "outputs": [{"name": "", "type": "bool"}]},
    {"type": "function", "name": "chooseWinningAddress", "stateMutability": "view",
     "inputs": [], "outputs": [{"name": "", "type": "address"}]},
    {"type": "function", "name": "fundLottery", "stateMutability": "payable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "fundContract", "stateMutability": "payable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "endLottery", "stateMutability": "nonpayable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "getBalance", "stateMutability": "view",
     "inputs": [], "outputs": [{"name": "", "type": "uint256"}]},
    {"type": "function", "name": "getContractEnabled", "stateMutability": "view",
     "inputs": [], "outputs": [{"name": "", "type": "bool"}]},
    {"type": "function", "name": "enableContract", "stateMutability": "nonpayable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "disableContract", "stateMutability": "nonpayable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "requireContractEnabled", "stateMutability": "nonpayable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "removeContractFunds", "stateMutability": "nonpayable",
     "inputs": [{"name": "amount", "type": "uint256"}], "outputs": []}
]"#;

const MUSICSLAYER_LOTTERY_ABI: &str = r#"[
    {"type": "constructor", "stateMutability": "payable",
     "inputs": [{"name": "maxTickets", "type": "uint256"}, {"name": "ticketPrice", "type": "uint256"}]},
    {"type": "function", "name": "action_buyTickets", "stateMutability": "payable",
     "inputs": [], "outputs": []},
    {"type": "function", "name": "get_addressClaimableBalance", "stateMutability": "view",
     "inputs": [{"name": "account", "type": "address"}], "outputs": [{"name": "", "type": "uint256"}]},
    {"type": "function", "name": "removeContractFunds", "stateMutability": "nonpayable",
     "inputs": [{"name": "amount", "type": "uint256"}], "outputs": []}
]"#;

const FOO_ABI: &str = r#"[
    {"type": "function", "name": "foo", "stateMutability": "nonpayable", "inputs": [], "outputs": []}
]"#;

const CL_ABI: &str = r#"[
    {"type": "function", "name": "clTest", "stateMutability": "nonpayable", "inputs": [], "outputs": []}
]"#;

const BUILTIN: &[(&str, &str)] = &[
    (LOTTERY_CONTRACT, LOTTERY_ABI),
    (MUSICSLAYER_LOTTERY_CONTRACT, MUSICSLAYER_LOTTERY_ABI),
    (FOO_CONTRACT, FOO_ABI),
    (CL_CONTRACT, CL_ABI),
];

/// ABI-only descriptors for the contracts the scripts talk to.
pub fn builtin_interfaces() -> Result<Vec<Artifact>, ArtifactError> {
    BUILTIN
        .iter()
        .map(|(name, abi)| {
            let abi: Abi = serde_json::from_str(abi).map_err(|source| ArtifactError::Parse {
                name: name.to_string(),
                source,
            })?;
            Ok(Artifact::interface(*name, abi))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::StateMutability;

    #[test]
    fn builtin_interfaces_parse() {
        let interfaces = builtin_interfaces().unwrap();
        let names: Vec<&str> = interfaces.iter().map(|a| a.contract_name.as_str()).collect();

        assert_eq!(names, vec!["Lottery", "MusicslayerLottery", "Foo", "CL"]);
        assert!(interfaces.iter().all(|a| !a.is_deployable()));
    }

    #[test]
    fn funding_methods_take_attached_value() {
        let lottery = builtin_interfaces()
            .unwrap()
            .into_iter()
            .find(|a| a.contract_name == LOTTERY_CONTRACT)
            .unwrap();

        for method in ["fundLottery", "fundContract"] {
            let function = lottery.abi.function(method).unwrap();
            assert!(function.inputs.is_empty());
            assert_eq!(function.state_mutability, StateMutability::Payable);
        }
        let winner = lottery.abi.function("chooseWinningAddress").unwrap();
        assert_eq!(winner.state_mutability, StateMutability::View);
    }

    #[test]
    fn musicslayer_constructor_takes_two_arguments() {
        let musicslayer = builtin_interfaces()
            .unwrap()
            .into_iter()
            .find(|a| a.contract_name == MUSICSLAYER_LOTTERY_CONTRACT)
            .unwrap();

        let constructor = musicslayer.abi.constructor().unwrap();
        assert_eq!(constructor.inputs.len(), 2);
    }
}
