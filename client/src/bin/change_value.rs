use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("change_value", |client| async move {
        scripts::change_value(&client, &scripts::ChangeValue::default())
            .await
            .map(|_| ())
    })
    .await
}
