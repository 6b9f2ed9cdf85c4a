//! Sequential scripts against a development node. Each script is a function
//! over a [`ContractClient`] and a config struct holding its literals; the
//! binaries under `src/bin` run them with [`launch`].

pub mod lottery;
pub mod musicslayer;
pub mod smoke;

pub use lottery::*;
pub use musicslayer::*;
pub use smoke::*;

use crate::blockchain::{ContractClient, SignerClient};
use crate::config::Settings;
use crate::error::{ClientError, ClientResult};
use crate::logging::init_tracing;
use lottery_shared::ErrorReport;
use ethers::types::Address;
use std::future::Future;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Load settings, connect, run `script` and turn its outcome into an exit code.
pub async fn launch<F, Fut>(script_name: &str, script: F) -> ExitCode
where
    F: FnOnce(ContractClient<SignerClient>) -> Fut,
    Fut: Future<Output = ClientResult<()>>,
{
    init_tracing();
    info!("Running {}", script_name);

    let outcome = async {
        let settings = Settings::from_env()?;
        let client = ContractClient::connect(&settings).await?;
        script(client).await
    }
    .await;

    finish(script_name, outcome)
}

pub fn finish(script_name: &str, outcome: ClientResult<()>) -> ExitCode {
    match outcome {
        Ok(()) => {
            info!("{} finished", script_name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let report = e.report();
            error!(kind = %report.kind, "{} failed: {}", script_name, report.message);
            eprintln!("ERROR:\n{}", report.to_pretty_json());
            ExitCode::FAILURE
        }
    }
}

pub(crate) fn address(literal: &str) -> ClientResult<Address> {
    literal
        .parse()
        .map_err(|e| ClientError::Configuration(format!("invalid address {}: {}", literal, e)))
}

/// Swallow a contract revert the script expects, returning its report.
/// Anything else is still fatal.
pub(crate) fn expect_revert<T>(context: &str, result: ClientResult<T>) -> ClientResult<Option<ErrorReport>> {
    match result {
        Ok(_) => {
            warn!("{}: expected a revert but the call succeeded", context);
            Ok(None)
        }
        Err(e) if e.kind().is_revert() => {
            let report = e.report();
            warn!("{}: {}", context, report.message);
            Ok(Some(report))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_shared::ErrorKind;

    #[test]
    fn address_literals_are_checked() {
        let parsed = address("0xc0ffee254729296a45a3885639AC7E10F9d54979").unwrap();
        assert_eq!(parsed.as_bytes()[..3], [0xc0, 0xff, 0xee]);
        assert_eq!(parsed.as_bytes()[19], 0x79);

        let err = address("0xc0ffee").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigurationError);
        assert!(err.to_string().contains("0xc0ffee"));
    }

    #[test]
    fn expected_revert_is_swallowed_other_failures_are_not() {
        let revert: ClientResult<()> = Err(ClientError::CallReverted {
            method: "registerAddress".to_string(),
            reason: Some("Address already playing".to_string()),
            raw: serde_json::Value::Null,
        });
        let report = expect_revert("duplicate", revert).unwrap().unwrap();
        assert_eq!(report.kind, ErrorKind::CallRevertedError);

        let rejected: ClientResult<()> = Err(ClientError::Configuration("bad key".to_string()));
        assert!(expect_revert("duplicate", rejected).is_err());
    }
}
