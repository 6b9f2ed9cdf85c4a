use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("get_info", |client| async move {
        scripts::get_info(&client, &scripts::GetInfo::default())
            .await
            .map(|_| ())
    })
    .await
}
