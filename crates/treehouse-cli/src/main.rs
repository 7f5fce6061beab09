//! TreeHouse CLI
//!
//! Thin wrapper around treehouse-core for poking at a local install.
//!
//! ## Usage
//!
//! ```bash
//! # Storage key for an email
//! treehouse sanitize a.b@c.com
//!
//! # Column count and gutter for a viewport width
//! treehouse layout 1100
//!
//! # Same, with masonry placement of the first 12 feed cards
//! treehouse layout 1100 --cards 12
//!
//! # One page of placeholder cards
//! treehouse feed --page 2 --size 10
//!
//! # Upload a banner as a.b@c.com
//! treehouse asset upload banner ./sunset.jpg --email a.b@c.com
//!
//! # Current profile picture of a user
//! treehouse asset current profile-pic a_b_c_com
//!
//! # Which environment variables the server would see
//! treehouse env-check
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use treehouse_core::config::{presence_report, KNOWN_VARS};
use treehouse_core::logging::LoggingBuilder;
use treehouse_core::view::masonry;
use treehouse_core::{
    sanitize, AssetType, Config, GridLayout, Identity, ImageFile, PlaceholderFeed, TreeHouse,
    UserKey,
};

#[derive(Parser)]
#[command(name = "treehouse")]
#[command(about = "TreeHouse - seed cards and profile images", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: platform data dir + /treehouse)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storage key derived from an email
    Sanitize {
        /// Email (or any string)
        email: String,
    },

    /// Grid layout for a viewport width
    Layout {
        /// Viewport width in pixels
        width: f64,
        /// Also place this many feed cards into columns
        #[arg(short, long)]
        cards: Option<usize>,
    },

    /// Print a page of placeholder cards
    Feed {
        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,
        /// Cards per page
        #[arg(short, long, default_value_t = treehouse_core::feed::DEFAULT_PAGE_SIZE)]
        size: usize,
        /// Generator seed
        #[arg(long)]
        seed: Option<u64>,
        /// Print JSON instead of one line per card
        #[arg(long)]
        json: bool,
    },

    /// Banner and profile-picture management
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Report which known environment variables are set
    EnvCheck,
}

#[derive(Subcommand)]
enum AssetAction {
    /// Upload an image as the signed-in user's asset
    Upload {
        /// Asset type: banner or profile-pic
        asset_type: AssetType,
        /// Image file to upload
        file: PathBuf,
        /// Email to sign in as
        #[arg(short, long)]
        email: String,
        /// Display name for the session
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show the current asset of a user
    Current {
        /// Asset type: banner or profile-pic
        asset_type: AssetType,
        /// Storage key (an email is sanitized)
        user: String,
    },
    /// List every stored asset of a user, newest first
    History {
        /// Asset type: banner or profile-pic
        asset_type: AssetType,
        /// Storage key (an email is sanitized)
        user: String,
    },
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut logging = LoggingBuilder::new("cli");
    if std::env::var_os("RUST_LOG").is_none() || verbosity > 0 {
        logging = logging.with_filter(filter);
    }
    logging.init()?;
    Ok(())
}

/// Default data directory (<platform data dir>/treehouse)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("treehouse")
}

async fn open_house(data_dir: Option<PathBuf>) -> Result<TreeHouse> {
    let data_dir = data_dir.unwrap_or_else(default_data_dir);
    TreeHouse::open(&data_dir)
        .await
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))
}

async fn read_image(path: &Path) -> Result<ImageFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Not a file path: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(ImageFile::new(name, bytes)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Sanitize { email } => {
            println!("{}", sanitize(&email));
        }

        Commands::Layout { width, cards } => {
            let layout = GridLayout::for_width(width);
            println!("Columns: {}", layout.columns);
            println!("Gutter: {}px", layout.gutter_px);

            if let Some(count) = cards {
                let cards = PlaceholderFeed::default().page(0, count)?;
                let placement = masonry::place(&cards, layout.columns);
                let heights = masonry::column_heights(&cards, &placement);
                println!();
                for (column, (indices, height)) in placement.iter().zip(heights).enumerate() {
                    let ids: Vec<&str> = indices.iter().map(|&i| cards[i].id.as_str()).collect();
                    println!("  [{}] height {:.2}: {}", column, height, ids.join(", "));
                }
            }
        }

        Commands::Feed {
            page,
            size,
            seed,
            json,
        } => {
            let feed = seed.map(PlaceholderFeed::new).unwrap_or_default();
            let cards = feed.page(page, size)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                for card in &cards {
                    let engagement = card
                        .engagement
                        .map(|e| format!("  hits={} branches={}", e.hits, e.branches))
                        .unwrap_or_default();
                    println!(
                        "{}  {:<7} {}{}",
                        card.id,
                        card.kind.as_str(),
                        card.image_url,
                        engagement
                    );
                }
            }
        }

        Commands::Asset { action } => {
            let house = open_house(cli.data_dir).await?;
            match action {
                AssetAction::Upload {
                    asset_type,
                    file,
                    email,
                    name,
                } => {
                    let mut identity = Identity::new(email);
                    if let Some(name) = name {
                        identity = identity.with_name(name);
                    }
                    let session = house.sign_in_local(identity)?;
                    let image = read_image(&file).await?;
                    let asset = house.upload_own(asset_type, image).await?;

                    println!("Uploaded {} for {}", asset_type, session.sanitized_key);
                    println!("  Path: {}", asset.storage_path);
                    println!("  URL: {}", asset.public_url);
                }
                AssetAction::Current { asset_type, user } => {
                    let owner = UserKey::parse(&user);
                    match house.current_asset(&owner, asset_type).await? {
                        Some(asset) => {
                            println!("{}", asset.cache_busted(chrono::Utc::now()));
                        }
                        None => println!("No {} for {}", asset_type, owner),
                    }
                }
                AssetAction::History { asset_type, user } => {
                    let owner = UserKey::parse(&user);
                    let history = house.assets().history(&owner, asset_type).await?;
                    if history.is_empty() {
                        println!("No {} for {}", asset_type, owner);
                    }
                    for asset in history {
                        let when = asset
                            .updated_at
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_else(|| "-".to_string());
                        println!("{}  {}", when, asset.storage_path);
                    }
                }
            }
        }

        Commands::EnvCheck => {
            let report = presence_report(|key| std::env::var(key).ok());
            for key in KNOWN_VARS {
                let mark = if report[key] { "set" } else { "missing" };
                println!("{:<28} {}", key, mark);
            }
            println!();
            match Config::from_env() {
                Ok(config) => println!("Server config: ok ({} storage)", config.storage_label()),
                Err(e) => println!("Server config: {}", e),
            }
        }
    }

    Ok(())
}
