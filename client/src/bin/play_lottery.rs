use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("play_lottery", |client| async move {
        let outcome = scripts::play_lottery(&client, &scripts::PlayLottery::new()?).await?;
        if let Some(rejection) = outcome.duplicate_rejection {
            println!("ERROR:\n{}", rejection.to_pretty_json());
        }
        Ok(())
    })
    .await
}
