use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AdminCommands, BookArgs, CancelArgs, LoginArgs, SignupArgs, SlotsArgs};

/// Book and manage barber shop appointments from the terminal
///
/// Barberia talks to the shop's REST API. Customers log in, look up free
/// slots, book and cancel; admins get the full appointment listing, a month
/// calendar, the user directory and usage stats.
#[derive(Parser)]
#[command(version, about, name = "barberia")]
pub struct Args {
    /// Base URL of the appointment API
    #[arg(
        long,
        global = true,
        env = "BARBERIA_API_URL",
        default_value = barberia_core::api::DEFAULT_BASE_URL
    )]
    pub api_url: String,

    /// Path to the session file. Defaults to
    /// $XDG_DATA_HOME/barberia/session.db
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Seconds to wait for each request before giving up
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Barberia CLI
///
/// Customer commands sit at the top level; the admin views live under
/// `admin`. Running without a command lists your appointments.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login(LoginArgs),
    /// Create an account
    Signup(SignupArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List the services on offer
    #[command(alias = "s")]
    Services,
    /// Show free slots on a date
    Slots(SlotsArgs),
    /// Book an appointment
    #[command(alias = "b")]
    Book(BookArgs),
    /// List your appointments
    #[command(aliases = ["a", "ls"])]
    Appointments,
    /// Cancel one of your appointments
    #[command(alias = "rm")]
    Cancel(CancelArgs),
    /// Admin views
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}
