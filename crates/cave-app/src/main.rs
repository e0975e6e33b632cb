//! Cave vault client - CLI entry point.

use anyhow::Result;
use cave_app::{AppConfig, CaveApp};
use cave_core::AccountAddress;
use clap::{Parser, Subcommand};
use tracing::info;

/// Cave vault client
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via CAVE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the Gateway's current ledger epoch.
    Status,
    /// List resource addresses present in the shared vault store.
    Discover,
    /// List an account's fungible holdings.
    Fungibles { account: String },
    /// List an account's non-fungible collections.
    NonFungibles { account: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cave_app::init_logging()?;

    // Determine config path: CLI arg > CAVE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("CAVE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::from_file(&config_path)?;
    let display = config.address_display.clone();

    let app = CaveApp::new(config)?;

    match args.command {
        Command::Status => {
            println!("epoch: {}", app.current_epoch().await?);
        }
        Command::Discover => {
            for token in app.vault_tokens().await? {
                println!("{token}");
            }
        }
        Command::Fungibles { account } => {
            let account = AccountAddress::new(account);
            app.set_active_account(Some(account.clone()));
            for holding in app.fungibles(&account).await? {
                println!(
                    "{:<20} {}",
                    holding
                        .metadata
                        .display_name(display.prefix_len, display.suffix_len),
                    holding.amount
                );
            }
        }
        Command::NonFungibles { account } => {
            let account = AccountAddress::new(account);
            app.set_active_account(Some(account.clone()));
            for collection in app.non_fungibles(&account).await? {
                println!(
                    "{:<20} vault={} ids={}/{}",
                    collection
                        .metadata
                        .display_name(display.prefix_len, display.suffix_len),
                    collection.vault_address,
                    collection.nf_ids.len(),
                    collection.total_count
                );
            }
        }
    }

    Ok(())
}
