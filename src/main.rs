//! Aerodesk CLI entry point.
//!
//! `shell` (the default) starts the interactive console; the remaining
//! subcommands are one-shot operations for scripting: session
//! management plus per-resource listings printed as JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use aerodesk::api::airlines::AirlineService;
use aerodesk::api::auth::{AuthService, RegisterRequest};
use aerodesk::api::bookings::BookingService;
use aerodesk::api::flights::FlightService;
use aerodesk::api::passengers::PassengerService;
use aerodesk::api::ApiClient;
use aerodesk::config::{runtime_paths, AerodeskConfig};
use aerodesk::console::Console;
use aerodesk::session::{Session, TokenStore};
use aerodesk::{logging, validate};

/// Aerodesk: admin console for the airline booking backend.
#[derive(Parser)]
#[command(name = "aerodesk", version, about)]
struct Cli {
    /// Subcommand to execute; the interactive shell when omitted.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Start the interactive console.
    Shell,
    /// Sign in and store the session token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Register a new account.
    Register {
        /// First name.
        #[arg(long)]
        first_name: String,
        /// Last name.
        #[arg(long)]
        last_name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session token.
    Logout,
    /// Show the current session.
    Whoami,
    /// List airlines as JSON (admin).
    Airlines {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List flights as JSON.
    Flights {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Sort specification, e.g. `departureTime,asc`.
        #[arg(long)]
        sort: Option<String>,
    },
    /// List passengers as JSON (admin).
    Passengers {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List bookings as JSON: the admin page, or your own with --mine.
    Bookings {
        /// Zero-based page index (ignored with --mine).
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Your own bookings instead of the admin list.
        #[arg(long)]
        mine: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Secrets from ~/.aerodesk/.env land in the environment before the
    // config layer reads its overrides.
    if let Ok(paths) = runtime_paths() {
        if paths.env_file.exists() {
            if let Err(e) = dotenvy::from_path(&paths.env_file) {
                eprintln!("warning: could not read {}: {e}", paths.env_file.display());
            }
        }
    }

    let config = AerodeskConfig::load().context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&config).await,
        command => {
            logging::init_cli(&config.console.log_level);
            run_one_shot(&config, command).await
        }
    }
}

/// Start the interactive console with file logging.
async fn run_shell(config: &AerodeskConfig) -> anyhow::Result<()> {
    let paths = runtime_paths()?;
    std::fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("failed to create {}", paths.logs_dir.display()))?;
    let _logging_guard = logging::init_shell(&paths.logs_dir, &config.console.log_level)?;
    debug!(base_url = %config.api.base_url, "console starting");

    let store = TokenStore::default_store()?;
    let mut console = Console::new(config, store)?;
    console.run().await
}

/// Execute a single non-interactive subcommand.
async fn run_one_shot(config: &AerodeskConfig, command: Command) -> anyhow::Result<()> {
    let store = TokenStore::default_store()?;
    let client = ApiClient::new(&config.api.base_url, store)?;
    let size = config.api.page_size;

    match command {
        Command::Shell => unreachable!("shell is handled before one-shot dispatch"),
        Command::Login { email, password } => {
            AuthService::new(&client)
                .login(&email, &password)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Signed in as {email}.");
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            let request = RegisterRequest {
                first_name,
                last_name,
                email,
                password,
            };
            let errors = validate::registration(&request);
            if !errors.is_empty() {
                for (field, message) in &errors {
                    eprintln!("{field}: {message}");
                }
                anyhow::bail!("registration input is invalid");
            }
            let confirmation = AuthService::new(&client)
                .register(&request)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("{}", confirmation.trim());
        }
        Command::Logout => {
            AuthService::new(&client)
                .logout()
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let session = Session::read(client.store());
            if session.authenticated {
                let who = session.username.as_deref().unwrap_or("unknown");
                let role = session.role.map(|r| r.label()).unwrap_or("no role");
                println!("{who} ({role})");
            } else {
                println!("Not signed in.");
            }
        }
        Command::Airlines { page } => {
            let listing = AirlineService::new(&client).list(page, size).await?;
            print_json(&listing.content)?;
        }
        Command::Flights { page, sort } => {
            let listing = FlightService::new(&client)
                .list(page, size, sort.as_deref())
                .await?;
            print_json(&listing.content)?;
        }
        Command::Passengers { page } => {
            let passengers = PassengerService::new(&client).list(page, size).await?;
            print_json(&passengers)?;
        }
        Command::Bookings { page, mine } => {
            let service = BookingService::new(&client);
            if mine {
                let bookings = service.my_bookings().await?;
                print_json(&bookings)?;
            } else {
                let listing = service.list_admin(page, size).await?;
                print_json(&listing.content)?;
            }
        }
    }
    Ok(())
}

/// Pretty-print a value as JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
