use clap::Parser;
use ticktimer_client::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), ticktimer_client::AppError> {
    run(Cli::parse()).await
}
