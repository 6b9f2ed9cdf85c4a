use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("remove_funds", |client| async move {
        scripts::remove_funds(&client, &scripts::RemoveFunds::default())
            .await
            .map(|_| ())
    })
    .await
}
