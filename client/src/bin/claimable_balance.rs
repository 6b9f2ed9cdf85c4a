use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("claimable_balance", |client| async move {
        let config = scripts::ClaimableBalance::new()?;
        scripts::claimable_balance(&client, &config).await.map(|_| ())
    })
    .await
}
