//! Barberia CLI Application
//!
//! Command-line client for the barber shop booking API.

mod args;
mod cli;
mod commands;
mod prompt;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use barberia_core::ClientBuilder;
use clap::Parser;
use commands::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        api_url,
        session_file,
        timeout_secs,
        no_color,
        command,
    } = Args::parse();

    let client = ClientBuilder::new()
        .with_base_url(Some(api_url))
        .with_session_path(session_file)
        .with_timeout(timeout_secs.map(Duration::from_secs))
        .build()
        .await
        .context("Failed to initialize API client")?;

    let cli = Cli::new(client, TerminalRenderer::new(!no_color));

    info!("Barberia started");

    match command {
        Some(Login(args)) => cli.login(args).await,
        Some(Signup(args)) => cli.signup(args).await,
        Some(Logout) => cli.logout().await,
        Some(Whoami) => cli.whoami().await,
        Some(Services) => cli.services(),
        Some(Slots(args)) => cli.slots(args).await,
        Some(Book(args)) => cli.book(args).await,
        Some(Appointments) | None => cli.appointments().await,
        Some(Cancel(args)) => cli.cancel(args).await,
        Some(Admin { command }) => cli.handle_admin_command(command).await,
    }
}
