use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use treehouse_core::logging::LoggingBuilder;
use treehouse_core::Config;

#[derive(Parser, Debug)]
#[command(name = "treehouse-server")]
#[command(about = "TreeHouse HTTP API", long_about = None)]
struct Args {
    /// Listen address, overrides TREEHOUSE_BIND
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Also write JSONL logs to this directory
    #[arg(long)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    LoggingBuilder::new("server")
        .with_logs_dir(args.logs_dir)
        .init()?;

    let config = Config::from_env().context("environment misconfigured")?;
    let bind = args.bind.unwrap_or(config.bind);
    let state = treehouse_server::build_state(&config).await?;

    treehouse_server::serve(state, bind).await
}
