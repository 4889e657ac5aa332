// src/main.rs

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use mcstatus_bot::Error;
use mcstatus_bot::bot::BotController;
use mcstatus_bot::config;

#[derive(Parser, Debug, Clone)]
#[command(name = "mcstatus-bot")]
#[command(author, version, about = "Discord presence bot for Minecraft server status")]
struct Args {
    /// Path to the config file (defaults to config.json next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("mcstatus_bot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Failed to start bot: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let path = args.config.unwrap_or_else(config::default_config_path);

    // The stdin lock is scoped to setup and released before login.
    let cfg = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        config::load(&path, &mut input, &mut output)?
    };
    info!("Monitoring {}:{}", cfg.host, cfg.port);

    BotController::new(cfg).start().await
}
