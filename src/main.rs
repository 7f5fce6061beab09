#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use treehouse_core::logging::LoggingBuilder;

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("treehouse")
}

/// TreeHouse - seed cards and profiles
#[derive(Parser, Debug)]
#[command(name = "treehouse-desktop")]
#[command(about = "TreeHouse - browse seeds, keep a profile")]
struct Args {
    /// Data directory for images and logs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Also write JSONL logs under <data-dir>/logs
    #[arg(long)]
    jsonl_logs: bool,
}

fn main() {
    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    let logs_dir = args.jsonl_logs.then(|| data_dir.join("logs"));
    if let Err(e) = LoggingBuilder::new("desktop").with_logs_dir(logs_dir).init() {
        eprintln!("logging disabled: {e}");
    }

    let _ = DATA_DIR.set(data_dir.clone());
    tracing::info!(?data_dir, "Starting TreeHouse desktop");

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("TreeHouse")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 900.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
