mod cli;
mod config;
mod db;
mod export;
mod filter;
mod fixtures;
mod guide;
mod models;
mod progress;
mod session;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use session::StudySession;
use store::SqliteStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let store = SqliteStore::open(&AppConfig::db_path()?)?;

    let curriculum = fixtures::curriculum::load().context("Loading study plan")?;
    let catalog = fixtures::catalog::load().context("Loading bibliography")?;
    let mut session = StudySession::open(store, curriculum);

    match cli.command {
        Some(Commands::Week { week }) => {
            handlers::handle_week(&session, &config, week)?;
        }
        Some(Commands::Check { week, day, flag, off }) => {
            handlers::handle_check(&mut session, week, &day, &flag, off)?;
        }
        Some(Commands::Progress) => {
            handlers::handle_progress(&session, &config)?;
        }
        Some(Commands::Resources { week, search, kind }) => {
            handlers::handle_resources(&session, &config, week, search.as_deref(), &kind)?;
        }
        Some(Commands::Goal { text, clear }) => {
            handlers::handle_goal(&mut session, &config, text, clear)?;
        }
        Some(Commands::Feedback { text, clear }) => {
            handlers::handle_feedback(&mut session, text, clear)?;
        }
        Some(Commands::Catalog { search }) => {
            handlers::handle_catalog(&catalog, search.as_deref())?;
        }
        Some(Commands::Export { search, output }) => {
            handlers::handle_export(&catalog, &config, search.as_deref(), output)?;
        }
        Some(Commands::Schedule) => {
            handlers::handle_schedule()?;
        }
        Some(Commands::Reset { yes }) => {
            handlers::handle_reset(&mut session, yes)?;
        }
        Some(Commands::Config) => {
            handlers::handle_config(&session, &config)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(session, catalog, config)?;
        }
    }

    Ok(())
}
