use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("run_foo", |client| async move {
        scripts::run_foo(&client).await.map(|_| ())
    })
    .await
}
