use clap::Parser;
use garmin_connect_export::{Cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_responses);

    let path = run(&cli).await?;
    println!("{}", path.display());
    Ok(())
}
