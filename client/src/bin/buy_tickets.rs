use lottery_client::scripts;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scripts::launch("buy_tickets", |client| async move {
        scripts::buy_tickets(&client, &scripts::BuyTickets::default())
            .await
            .map(|_| ())
    })
    .await
}
