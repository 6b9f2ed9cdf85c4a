use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("fund_lottery", |client| async move {
        let config = scripts::FundLottery::new()?;
        scripts::fund_lottery(&client, &config).await.map(|_| ())
    })
    .await
}
