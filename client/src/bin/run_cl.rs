use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("run_cl", |client| async move {
        scripts::run_cl(&client).await.map(|_| ())
    })
    .await
}
