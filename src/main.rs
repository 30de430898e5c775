//! Token Board - Main executable
//!
//! Terminal front end for the token API: a save/update form, a supply chart and
//! a token grid that reloads itself on a timer and after every saved change.
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;

use token_board::api::ApiConfig;
use token_board::commands::{self, BoardCommand};
use token_board::presenter::BoardPresenter;
use token_board::view::{ConsoleTokenBoardView, TokenBoardView};
use token_board::ServiceContainer;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Token Board v{}", token_board::VERSION);

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    info!(
        "Using API at {} (credentials in {})",
        config.base_url,
        config.credentials_file.display()
    );

    let services = ServiceContainer::new(config).context("Failed to create API client")?;

    let view = Arc::new(ConsoleTokenBoardView::stdout());
    let form = services.form_presenter(view.clone());
    let board = services.board_presenter(view.clone(), form.clone());

    // Re-render whenever a reload lands
    let renderer = tokio::spawn({
        let board = board.clone();
        async move {
            if let Err(e) = board.watch_updates().await {
                error!("Board renderer stopped: {}", e);
            }
        }
    });

    let mut refresh_service = services.refresh_service();
    refresh_service
        .start()
        .context("Failed to start refresh service")?;

    view.display_help(commands::help_text()).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<BoardCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        view.display_error(e.to_string()).await?;
                        continue;
                    }
                };

                match commands::execute(command, board.as_ref(), form.as_ref(), view.as_ref()).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => error!("Command failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received");
                break;
            }
        }
    }

    info!("Stopping refresh service...");
    refresh_service.stop().await;
    renderer.abort();

    Ok(())
}
