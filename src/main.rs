use std::io::{self, BufRead, Write};

use clap::Parser;
use loginseed::config::{Config, ConfigError};
use loginseed::screen;
use loginseed::{AttemptOutcome, LoginController, SessionState, SubmitRejected};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot sign in: {0}")]
    SubmitRejected(#[from] SubmitRejected),
    #[error("{0}")]
    LoginFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "loginseed", about = "Sign in against the configured authenticator")]
struct Cli {
    /// Email address; prompted for when absent.
    #[arg(long, env = "LOGINSEED_EMAIL")]
    email: Option<String>,

    /// Password; prompted for when absent. The prompt echoes what is typed,
    /// and a value passed here is visible in the process list.
    #[arg(long)]
    password: Option<String>,

    /// Show the password in the rendered form instead of masking it.
    #[arg(long)]
    show_password: bool,

    /// Print the final session state as JSON instead of rendering screens.
    #[arg(long)]
    json: bool,

    /// Log out again after a successful sign-in.
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(environment = ?config.environment, backend = ?config.backend, "config loaded");

    let controller = LoginController::new(config.authenticator());
    controller.set_password_visible(cli.show_password);

    let email = match cli.email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    controller.set_email(email);
    let password = match cli.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    controller.set_password(password);

    if !cli.json {
        println!("{}", screen::render(&controller.snapshot()));
    }

    let handle = controller.submit()?;
    if !cli.json {
        println!("{}", screen::sign_in_button(&controller.snapshot()));
    }
    let outcome = handle.wait().await;

    for document in finish(&controller, &outcome, cli.logout, cli.json)? {
        println!("{document}");
    }
    match outcome {
        AttemptOutcome::Succeeded(_) => Ok(()),
        AttemptOutcome::Failed(message) => Err(CliError::LoginFailed(message)),
        AttemptOutcome::Discarded => Err(CliError::LoginFailed("login attempt was cancelled".to_owned())),
    }
}

/// Output printed once the attempt has ended. With `--logout` the signed-in
/// screen is shown before logging out, except in JSON mode, which prints only
/// the final state.
fn finish(
    controller: &LoginController,
    outcome: &AttemptOutcome,
    logout: bool,
    json: bool,
) -> Result<Vec<String>, CliError> {
    let mut documents = Vec::new();
    if logout && matches!(outcome, AttemptOutcome::Succeeded(_)) {
        if !json {
            documents.push(screen::render(&controller.snapshot()));
        }
        controller.logout();
    }
    documents.push(render_state(&controller.snapshot(), json)?);
    Ok(documents)
}

fn render_state(state: &SessionState, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(state)?)
    } else {
        Ok(screen::render(state))
    }
}

fn prompt(label: &str) -> Result<String, CliError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{label}")?;
    stdout.flush()?;
    drop(stdout);

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
