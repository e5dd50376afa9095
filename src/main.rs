use std::path::PathBuf;

use clap::Parser;
use coinsage::app::App;
use coinsage::config::Config;
use tracing::{error, info};

/// Crypto futures advisor bot.
#[derive(Parser)]
#[command(name = "coinsage", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("coinsage starting");

    if let Err(e) = App::run(config).await {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }

    info!("coinsage stopped");
}
