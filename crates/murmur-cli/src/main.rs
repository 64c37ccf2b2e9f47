mod app;
mod args;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use args::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    murmur_core::set_verbose(cli.verbose);

    match cli.command {
        // Bare `murmur` records, same as `murmur record`
        None => commands::record::run(args::RecordArgs::default()).await,
        Some(Command::Record(record_args)) => commands::record::run(record_args).await,
        Some(Command::File(file_args)) => commands::file::run(file_args).await,
        Some(Command::History { command }) => commands::history::run(command).await,
        Some(Command::Translate { text, to }) => commands::translate::run(text, to).await,
        Some(Command::Login) => commands::auth::login().await,
        Some(Command::Logout) => commands::auth::logout(),
        Some(Command::Whoami) => commands::auth::whoami(),
        Some(Command::Devices) => commands::devices::run(),
        Some(Command::Setup) => commands::setup::run().await,
        Some(Command::Config(config_args)) => commands::config::run(config_args),
    }
}
