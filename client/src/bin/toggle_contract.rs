use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("toggle_contract", |client| async move {
        let outcome = scripts::toggle_contract(&client, &scripts::ToggleContract::default()).await?;
        if let Some(rejection) = outcome.disabled_rejection {
            println!("ERROR:\n{}", rejection.to_pretty_json());
        }
        Ok(())
    })
    .await
}
