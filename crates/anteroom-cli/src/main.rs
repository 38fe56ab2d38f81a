//! Anteroom CLI - terminal companion for the Anteroom account service.
//!
//! Drives the core auth client from the terminal: register an account, log
//! in, log out, and inspect the current session. Run with no command to get
//! the app's boot sequence: the launch hold, then the session status.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use anteroom_core::{
    ApiError, AuthClient, Config, FileStore, KeyValueStore, KeyringStore, LaunchPresenter,
    UserCreate, UserRetrieve, TOKEN_KEY,
};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // RUST_LOG controls the log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    let mut config = Config::load()?;
    let store = open_store(&config)?;
    let client = AuthClient::new(config.resolve_base_url(), store.clone())?;

    match command {
        None => startup(&config, store.as_ref()).await,
        Some("register") => register(&client).await,
        Some("login") => login(&client, &mut config).await,
        Some("logout") => {
            client.logout();
            println!("Logged out.");
            Ok(())
        }
        Some("status") => status(&config, store.as_ref()),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: anteroom [register|login|logout|status]");
    eprintln!();
    eprintln!("With no command, runs the boot sequence: launch hold, then session status.");
}

/// Pick the token store backend named by the config (file by default).
fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.token_store.as_deref() {
        Some("keyring") => Ok(Arc::new(KeyringStore::new())),
        _ => Ok(Arc::new(FileStore::new(Config::cache_dir()?)?)),
    }
}

/// The app's boot sequence: hold the branded screen, then report state.
async fn startup(config: &Config, store: &dyn KeyValueStore) -> Result<()> {
    println!("anteroom");
    io::stdout().flush()?;

    let presenter = LaunchPresenter::new();
    let mut launch = presenter.present();
    launch.wait().await;
    info!("Launch hold elapsed");

    status(config, store)
}

fn status(config: &Config, store: &dyn KeyValueStore) -> Result<()> {
    match store.get(TOKEN_KEY)? {
        Some(_) => match token_age(config) {
            Some(age) => println!("Logged in (token saved {}).", age),
            None => println!("Logged in."),
        },
        None => println!("Logged out."),
    }
    Ok(())
}

/// Age of the persisted token, when the file backend holds it.
fn token_age(config: &Config) -> Option<String> {
    if matches!(config.token_store.as_deref(), Some("keyring")) {
        return None;
    }
    let store = FileStore::new(Config::cache_dir().ok()?).ok()?;
    store.age_display(TOKEN_KEY).ok().flatten()
}

async fn register(client: &AuthClient) -> Result<()> {
    let email = prompt("Email: ")?;
    let username = prompt("Username: ")?;
    let password = rpassword::prompt_password("Password: ")?;

    if email.is_empty() || username.is_empty() || password.is_empty() {
        anyhow::bail!("Email, username and password required");
    }

    let profile = client
        .register(&UserCreate {
            email,
            username,
            password,
        })
        .await?;

    println!("Registered {} (id {}).", profile.username, profile.id);
    println!("Run `anteroom login` to start a session.");
    Ok(())
}

async fn login(client: &AuthClient, config: &mut Config) -> Result<()> {
    let username = prompt_username(config.last_username.as_deref())?;
    let password = rpassword::prompt_password("Password: ")?;

    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password required");
    }

    println!("\nAuthenticating...");

    match client
        .authenticate(&UserRetrieve {
            username: username.clone(),
            password,
        })
        .await
    {
        Ok(_) => {
            config.last_username = Some(username);
            if let Err(error) = config.save() {
                warn!(error = %error, "Failed to save config");
            }
            info!("Login successful");
            println!("Login successful.");
            Ok(())
        }
        Err(error) => Err(anyhow::anyhow!(friendly_message(&error))),
    }
}

/// Map client errors to the messages shown at the prompt.
fn friendly_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { status, .. } if *status == reqwest::StatusCode::UNAUTHORIZED => {
            "Invalid username or password".to_string()
        }
        ApiError::Network(e) if e.is_timeout() => {
            "Connection timed out. Please try again.".to_string()
        }
        ApiError::Network(e) if e.is_connect() => {
            "Unable to connect to server. Check your internet connection.".to_string()
        }
        other => format!("Login failed: {}", other),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt for a username, offering the previous one as the default.
fn prompt_username(last: Option<&str>) -> Result<String> {
    let label = match last {
        Some(last) => format!("Username [{}]: ", last),
        None => "Username: ".to_string(),
    };
    let input = prompt(&label)?;

    if input.is_empty() {
        if let Some(last) = last {
            return Ok(last.to_string());
        }
    }
    Ok(input)
}
