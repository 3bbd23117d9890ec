use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use reading_buddy::cli::args::{Cli, Commands};
use reading_buddy::cli::handlers;
use reading_buddy::config::AppConfig;
use reading_buddy::db::{ReadingRepo, SqliteStore};
use reading_buddy::tui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;
    if !AppConfig::config_path()?.exists() {
        // Write defaults once so there is a file to edit
        config.save().context("Writing default config")?;
    }

    // Ensure data directory exists and open DB
    config.ensure_data_dir()?;
    let db_path = config.db_path()?;
    debug!("using database at {:?}", db_path);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    let repo = ReadingRepo::new(store);

    match cli.command {
        Some(Commands::Log {
            minutes,
            date,
            add,
            books,
        }) => handlers::handle_log(&repo, minutes, date, add, &books)?,
        Some(Commands::Book { title, date }) => handlers::handle_book(&repo, &title, date)?,
        Some(Commands::Delete { date }) => handlers::handle_delete(&repo, date)?,
        Some(Commands::Show { date }) => handlers::handle_show(&repo, date)?,
        Some(Commands::Calendar { month }) => handlers::handle_calendar(&repo, month)?,
        Some(Commands::Stats { month }) => handlers::handle_stats(&repo, month)?,
        Some(Commands::Print { month }) => handlers::handle_print(&repo, month)?,
        Some(Commands::Settings {
            name,
            weekly_goal,
            thresholds,
            reset,
        }) => handlers::handle_settings(&repo, name.as_deref(), weekly_goal, &thresholds, reset)?,

        // No subcommand → launch TUI
        None => tui::app::run(repo, config)?,
    }

    Ok(())
}
