//! Interactive admin console.
//!
//! A line-oriented shell over the booking backend. The main loop
//! re-derives the session from the token store on every pass, shows the
//! landing menu (sign in, register) while unauthenticated and the
//! role-aware main menu once signed in. Screens own their sub-loops and
//! load data through [`guard::guarded_fetch`], so auth expiry anywhere
//! drops the user back to the landing menu.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use crate::api::{ApiClient, ApiFailure};
use crate::config::AerodeskConfig;
use crate::errmap;
use crate::session::{Session, TokenStore};
use crate::validate::FieldErrors;

pub mod guard;
pub mod nav;

mod airlines;
mod auth;
mod bookings;
mod flights;
mod passengers;

use guard::{PageOutcome, Redirect};
use nav::Screen;

/// The interactive shell.
pub struct Console {
    client: ApiClient,
    page_size: u32,
    editor: DefaultEditor,
}

impl Console {
    /// Build the shell from loaded configuration and a token store.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the line editor
    /// cannot attach to the terminal.
    pub fn new(config: &AerodeskConfig, store: TokenStore) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api.base_url, store)?;
        let editor = DefaultEditor::new()?;
        Ok(Self {
            client,
            page_size: config.api.page_size,
            editor,
        })
    }

    /// Run the shell until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error only for terminal-level failures; backend and
    /// validation problems are rendered in place.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("aerodesk console (Ctrl-C cancels, Ctrl-D backs out)");
        loop {
            let session = Session::read(self.client.store());
            if !session.authenticated {
                match auth::landing(self).await? {
                    auth::LandingChoice::Quit => break,
                    auth::LandingChoice::Continue => continue,
                }
            }

            let who = session.username.as_deref().unwrap_or("unknown");
            let role = session
                .role
                .map(|r| r.label())
                .unwrap_or("no role");
            println!("\nSigned in as {who} ({role})");

            let items = nav::menu(session.role);
            for (i, item) in items.iter().enumerate() {
                println!("  {}) {}", i.saturating_add(1), item.label());
            }
            let Some(choice) = self.prompt("> ")? else {
                break;
            };
            let picked = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| items.get(n.wrapping_sub(1)).copied());
            let Some(screen) = picked else {
                self.notice("Pick a number from the menu.");
                continue;
            };

            info!(screen = screen.label(), "screen opened");
            match screen {
                Screen::Airlines => airlines::browse(self).await?,
                Screen::Flights => flights::browse(self, session.role).await?,
                Screen::Passengers => passengers::browse(self).await?,
                Screen::Bookings => bookings::browse(self, session.role).await?,
                Screen::Logout => auth::logout(self)?,
                Screen::Quit => break,
            }
        }
        println!("Bye.");
        Ok(())
    }

    /// A shared clone of the backend client.
    pub(crate) fn client(&self) -> ApiClient {
        self.client.clone()
    }

    /// Configured list page size.
    pub(crate) fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Read one trimmed line. `None` means the user backed out
    /// (Ctrl-C or Ctrl-D at the prompt).
    pub(crate) fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(label) {
            Ok(line) => {
                let line = line.trim().to_owned();
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(&line);
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Prompt until a non-empty line arrives; `None` if the user backs out.
    pub(crate) fn prompt_required(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        loop {
            match self.prompt(label)? {
                None => return Ok(None),
                Some(line) if line.is_empty() => {
                    self.notice("A value is required.");
                }
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    /// Prompt with a current value; an empty line keeps it.
    pub(crate) fn prompt_or_keep(
        &mut self,
        label: &str,
        current: &str,
    ) -> anyhow::Result<Option<String>> {
        let full = format!("{label} [{current}]: ");
        match self.prompt(&full)? {
            None => Ok(None),
            Some(line) if line.is_empty() => Ok(Some(current.to_owned())),
            Some(line) => Ok(Some(line)),
        }
    }

    /// Prompt until the input parses as `T`; `None` if the user backs out.
    pub(crate) fn prompt_parse<T>(&mut self, label: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
    {
        loop {
            match self.prompt_required(label)? {
                None => return Ok(None),
                Some(line) => match line.parse() {
                    Ok(value) => return Ok(Some(value)),
                    Err(_) => self.notice("Could not read that value, try again."),
                },
            }
        }
    }

    /// Ask a yes/no question; anything but `y`/`yes` is no.
    pub(crate) fn confirm(&mut self, label: &str) -> anyhow::Result<bool> {
        let full = format!("{label} [y/N]: ");
        let answer = self.prompt(&full)?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    /// Transient one-line notification.
    pub(crate) fn notice(&self, message: &str) {
        println!("! {message}");
    }

    /// Render a normalized backend failure.
    pub(crate) fn show_failure(&self, failure: &ApiFailure) {
        match failure {
            ApiFailure::FieldErrors(errors) => self.show_field_errors(errors),
            ApiFailure::Message(message) => {
                self.notice(errmap::friendly_message(Some(message)));
            }
            ApiFailure::Unknown => self.notice(errmap::friendly_message(None)),
        }
    }

    /// Render per-field validation errors.
    pub(crate) fn show_field_errors(&self, errors: &FieldErrors) {
        self.notice("Please fix the following:");
        for (field, message) in errors {
            println!("    {field}: {message}");
        }
    }

    /// Resolve a guarded fetch, rendering anything that is not data.
    ///
    /// Returns the fetched value on success and `None` otherwise; on
    /// redirect the caller should leave its screen loop so the main loop
    /// re-derives the session.
    pub(crate) fn resolve<T>(&self, outcome: PageOutcome<T>) -> Option<T> {
        match outcome {
            PageOutcome::Ready(data) => Some(data),
            PageOutcome::Redirect(Redirect::Login) => {
                self.notice("Your session has ended, please sign in again.");
                None
            }
            PageOutcome::Redirect(Redirect::Home) => {
                self.notice("That area needs admin access.");
                None
            }
            PageOutcome::NotFound => {
                self.notice("No such record.");
                None
            }
            PageOutcome::Failed(failure) => {
                self.show_failure(&failure);
                None
            }
            PageOutcome::Aborted => {
                self.notice("Cancelled.");
                None
            }
        }
    }

    /// Whether the outcome was a session redirect, meaning the screen
    /// loop must end rather than retry.
    pub(crate) fn must_leave<T>(outcome: &PageOutcome<T>) -> bool {
        matches!(outcome, PageOutcome::Redirect(_))
    }
}
