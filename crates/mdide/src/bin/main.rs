//! mdide CLI

use clap::Parser;
use mdide::{Cli, logging, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose);

    log::debug!("mdide v{}", env!("CARGO_PKG_VERSION"));

    let result = run(cli).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
