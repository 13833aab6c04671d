//! Command execution: runs core handlers and renders their results.

use anyhow::{anyhow, Context, Result};
use barberia_core::{
    display::{Appointments, Directory, Listing, OperationStatus, Services},
    handlers::{
        handle_admin_load, handle_availability, handle_book, handle_cancel,
        handle_list_appointments, BookingReport,
    },
    params::{Availability, BookAppointment, Id, SearchUsers, ShowCalendar},
    ApiClient, Catalog, ErrorKind, SubmissionOutcome,
};
use jiff::{
    civil::{Date, DateTime},
    Zoned,
};
use log::debug;

use crate::{
    cli::{AdminCommands, BookArgs, CancelArgs, LoginArgs, SignupArgs, SlotsArgs},
    prompt::{new_password, prompt, prompt_hidden},
    renderer::TerminalRenderer,
};

/// Runs one command against the API and prints the outcome.
pub struct Cli {
    client: ApiClient,
    renderer: TerminalRenderer,
    catalog: Catalog,
}

impl Cli {
    pub fn new(client: ApiClient, renderer: TerminalRenderer) -> Self {
        Self {
            client,
            renderer,
            catalog: Catalog::default(),
        }
    }

    pub async fn login(&self, args: LoginArgs) -> Result<()> {
        let password = match args.password.clone() {
            Some(password) => password,
            None => prompt_hidden("Password: ")?,
        };
        let user = self
            .client
            .login(&args.into_params(password))
            .await
            .context("Login failed")?;

        self.status(OperationStatus::success(format!(
            "Logged in as {}",
            user.username
        )))
    }

    pub async fn signup(&self, args: SignupArgs) -> Result<()> {
        let password = match args.password.clone() {
            Some(password) => password,
            None => new_password()?,
        };
        let user = self
            .client
            .signup(&args.into_params(password))
            .await
            .context("Signup failed")?;

        self.status(OperationStatus::success(format!(
            "Account '{}' created. Log in to start booking.",
            user.username
        )))
    }

    pub async fn logout(&self) -> Result<()> {
        self.client.logout().await.context("Failed to clear session")?;
        self.status(OperationStatus::success("Logged out"))
    }

    pub async fn whoami(&self) -> Result<()> {
        match self.client.check_auth().await {
            Ok(Some(user)) => self.renderer.render(&user.to_string()),
            Ok(None) => self.status(OperationStatus::warning("Not logged in")),
            Err(e) if e.kind() == ErrorKind::Network => {
                debug!("Profile check failed, falling back to cached user: {e}");
                match self.client.cached_user().await? {
                    Some(user) => {
                        self.renderer.render(&user.to_string())?;
                        self.status(OperationStatus::warning(
                            "Server unreachable; showing the last known profile",
                        ))
                    }
                    None => Err(e).context("Could not check the session"),
                }
            }
            Err(e) => Err(e).context("Could not check the session"),
        }
    }

    pub fn services(&self) -> Result<()> {
        self.renderer.render(&Services(self.catalog.services()).to_string())
    }

    pub async fn slots(&self, args: SlotsArgs) -> Result<()> {
        let board = handle_availability(&self.client, today(), &Availability::from(args))
            .await
            .context("Failed to load availability")?;
        self.renderer.render(&board.to_string())
    }

    pub async fn book(&self, args: BookArgs) -> Result<()> {
        let params = BookAppointment::from(args);
        let BookingReport {
            workflow,
            outcome,
            degraded,
            rejected_time,
        } = handle_book(&self.client, self.catalog, today(), &params)
            .await
            .context("Booking not possible")?;

        match outcome {
            None => {
                // The board carries the degraded warning itself.
                if let Some(board) = workflow.slot_board() {
                    self.renderer.render(&board.to_string())?;
                }
                if let Some(reason) = rejected_time {
                    return Err(anyhow!(reason)).context("Booking not possible");
                }
                self.status(OperationStatus::warning(
                    "No time given; pick a free slot and run again with --time HH:MM",
                ))
            }
            Some(SubmissionOutcome::Confirmed(confirmation)) => {
                self.degraded_notice(degraded)?;
                self.renderer.render(&confirmation.to_string())
            }
            Some(SubmissionOutcome::Failed { message }) => {
                self.degraded_notice(degraded)?;
                Err(anyhow!(message))
            }
        }
    }

    pub async fn appointments(&self) -> Result<()> {
        let list = handle_list_appointments(&self.client)
            .await
            .context("Failed to load appointments")?;
        let now = now();
        self.renderer
            .render(&Appointments::new(list.items(), now).to_string())?;

        if !list.items().is_empty() && list.upcoming(now).next().is_none() {
            self.status(OperationStatus::warning(
                "No upcoming appointments; book one with `barberia book`",
            ))?;
        }
        Ok(())
    }

    pub async fn cancel(&self, args: CancelArgs) -> Result<()> {
        if !args.yes {
            let answer = prompt(&format!("Cancel appointment #{}? [y/N] ", args.id))?;
            if !matches!(answer.trim(), "y" | "Y" | "yes") {
                return self.status(OperationStatus::warning("Cancellation aborted"));
            }
        }

        let list = handle_cancel(&self.client, &Id::from(&args), now())
            .await
            .with_context(|| format!("Failed to cancel appointment #{}", args.id))?;

        self.status(OperationStatus::success(format!(
            "Appointment #{} cancelled",
            args.id
        )))?;
        if let Some(error) = list.error() {
            self.status(OperationStatus::warning(error))?;
        }
        self.renderer
            .render(&Appointments::new(list.items(), now()).to_string())
    }

    pub async fn handle_admin_command(&self, command: AdminCommands) -> Result<()> {
        let mut session = handle_admin_load(&self.client, today())
            .await
            .context("Failed to load admin data")?;

        match command {
            AdminCommands::Appointments(args) => {
                let params = args.into_params(session.today());
                let entries = session.listing(&params);
                let listing = match params.date {
                    Some(day) => Listing::for_day(entries, day),
                    None => Listing::all(entries),
                };
                self.renderer.render(&listing.to_string())
            }
            AdminCommands::Users(args) => {
                let directory = Directory(session.directory(&SearchUsers::from(args)));
                self.renderer.render(&directory.to_string())
            }
            AdminCommands::Calendar(args) => {
                session.apply(&ShowCalendar::from(args));
                self.renderer.render(&session.calendar().to_string())?;
                if let Some(day) = session.selected_date() {
                    let listing = Listing::for_day(session.selected_day_listing(), day);
                    self.renderer.render(&listing.to_string())?;
                }
                Ok(())
            }
            AdminCommands::Stats => self.renderer.render(&session.stats().to_string()),
        }
    }

    fn degraded_notice(&self, warning: Option<String>) -> Result<()> {
        match warning {
            Some(warning) => self.status(OperationStatus::warning(warning)),
            None => Ok(()),
        }
    }

    fn status(&self, status: OperationStatus) -> Result<()> {
        self.renderer.render(&status.to_string())
    }
}

fn today() -> Date {
    Zoned::now().date()
}

fn now() -> DateTime {
    Zoned::now().datetime()
}
