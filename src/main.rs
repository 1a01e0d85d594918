use std::fs;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brainr::app::AppContext;
use brainr::cli::{commands, BookmarksAction, Cli, Commands, TopicsAction};
use brainr::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);

    // The TUI owns the terminal, so browse mode logs to a file.
    if matches!(command, Commands::Browse) {
        init_file_logging()?;
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config, cli.db)?;

    match command {
        Commands::Browse => {
            brainr::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Feed { count } => {
            commands::print_feed(&ctx, count).await?;
        }
        Commands::Topics { action } => match action {
            TopicsAction::List => commands::list_topics(&ctx)?,
            TopicsAction::Set { topics } => commands::set_topics(&ctx, &topics)?,
            TopicsAction::Clear => commands::clear_topics(&ctx)?,
        },
        Commands::Bookmarks { action } => match action {
            BookmarksAction::List => commands::list_bookmarks(&ctx)?,
            BookmarksAction::Remove { id } => commands::remove_bookmark(&ctx, id)?,
        },
        Commands::Liked => {
            commands::list_liked(&ctx)?;
        }
        Commands::Theme { mode } => {
            commands::theme(&ctx, mode)?;
        }
        Commands::Onboard { topics } => {
            commands::onboard(&ctx, &topics)?;
        }
        Commands::Search { query, limit } => {
            commands::search(&ctx, &query, limit).await?;
        }
        Commands::Reset => {
            commands::reset(&ctx)?;
        }
    }

    Ok(())
}

fn init_file_logging() -> anyhow::Result<()> {
    let log_path = AppContext::data_dir()?.join("brainr.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Logging to {}", log_path.display());
    Ok(())
}
