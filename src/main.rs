use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use pagebot::cli::{Cli, Commands};
use pagebot::core::{config, init_logger, install_panic_hook, logging, metrics};
use pagebot::navigator::Navigator;
use pagebot::telegram::{HandlerDeps, Transport, create_bot, schema, setup_bot_commands, wait_for_bot_api};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, missing token, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let env_file = dotenv();

    match cli.command {
        Some(Commands::Dispatch { action, json }) => {
            if let Some(e) = config::env_file_problem(&env_file) {
                eprintln!("Warning: failed to load .env: {}", e);
            }
            run_dispatch(&action, json)
        }
        Some(Commands::Run { webhook }) => {
            start_logging(&env_file)?;
            run_bot(webhook).await
        }
        None => {
            start_logging(&env_file)?;
            log::info!("No command specified, running bot in polling mode");
            run_bot(false).await
        }
    }
}

fn start_logging(env_file: &dotenvy::Result<PathBuf>) -> Result<()> {
    install_panic_hook();
    init_logger(&config::LOG_FILE_PATH, logging::parse_level(&config::LOG_LEVEL))?;

    if let Some(e) = config::env_file_problem(env_file) {
        log::warn!("Failed to load .env, using process environment: {}", e);
    } else if let Ok(path) = env_file {
        log::info!("Loaded environment from {}", path.display());
    }
    Ok(())
}

/// Prints the reply for one action using the configured page links
fn run_dispatch(action: &str, json: bool) -> Result<()> {
    let response = Navigator::from_config().dispatch(action);
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", response);
    }
    Ok(())
}

async fn run_bot(use_webhook: bool) -> Result<()> {
    let bot_init_start = Instant::now();
    log::info!("Starting bot...");

    metrics::init_metrics();

    // Fail before touching the network if webhook mode is misconfigured
    let transport = Transport::from_flag(use_webhook)?;

    // One navigator for the whole process, shared by every handler
    let navigator = Arc::new(Navigator::from_config());
    log::info!(
        "Page links: page 1 -> {}, page 2 -> {}",
        navigator.links().page1,
        navigator.links().page2
    );

    let bot = create_bot()?;

    let me = wait_for_bot_api(&bot).await?;
    log::info!("Bot username: {}, Bot ID: {}", me.username(), me.id.0);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let handler = schema(HandlerDeps::new(navigator));

    log::info!(
        "Bot initialization complete in {:.2}s, transport: {}",
        bot_init_start.elapsed().as_secs_f64(),
        transport.name()
    );

    transport
        .run(bot, handler, *config::PORT, PathBuf::from(config::PAGES_DIR.as_str()))
        .await?;

    Ok(())
}
