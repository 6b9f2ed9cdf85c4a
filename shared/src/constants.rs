// Development network
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

// Hardhat/Anvil account #0, funded on every fresh development node
pub const DEVNET_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

// Compiled artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const ARTIFACT_EXTENSION: &str = "json";
pub const DEBUG_ARTIFACT_SUFFIX: &str = ".dbg.json";
pub const BUILD_INFO_DIR: &str = "build-info";

// Confirmation
pub const DEFAULT_CONFIRMATIONS: usize = 1;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 120;

// Solidity error selectors
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0]; // Error(string)
pub const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71]; // Panic(uint256)

// Known contract names
pub const LOTTERY_CONTRACT: &str = "Lottery";
pub const MUSICSLAYER_LOTTERY_CONTRACT: &str = "MusicslayerLottery";
pub const FOO_CONTRACT: &str = "Foo";
pub const CL_CONTRACT: &str = "CL";
