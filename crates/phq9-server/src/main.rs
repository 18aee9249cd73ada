//! phq9-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and `PHQ9_*`
//! environment variables, opens the SQLite store, and serves the
//! questionnaire and intake API over HTTP.
//!
//! ```
//! PHQ9_CLINICIAN_EMAIL=dr@example.com PHQ9_SMTP_USERNAME=... PHQ9_SMTP_PASSWORD=... \
//!   cargo run -p phq9-server
//! cargo run -p phq9-server -- history --patient patient@example.com
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use phq9_core::{report, score::Trend, store::ResponseStore};
use phq9_mail::SmtpNotifier;
use phq9_server::{AppState, ServerConfig};
use phq9_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "PHQ-9 intake server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the questionnaire and intake API (the default).
  Serve,
  /// Print every stored report for one patient, oldest first, and exit.
  /// Nothing is emailed.
  History {
    #[arg(long)]
    patient: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PHQ9"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!("Opened store at {store_path:?}");

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(server_cfg, store).await,
    Command::History { patient } => print_history(&store, &patient).await,
  }
}

async fn serve(server_cfg: ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  anyhow::ensure!(
    !server_cfg.clinician_email.is_empty(),
    "clinician_email must be set (PHQ9_CLINICIAN_EMAIL)"
  );

  let mail_cfg = server_cfg.mail_config();
  if !mail_cfg.has_credentials() {
    tracing::warn!("PHQ9_SMTP_USERNAME and PHQ9_SMTP_PASSWORD are not set");
    tracing::warn!("Reports cannot be emailed until they are configured");
  }
  let notifier = SmtpNotifier::new(mail_cfg).context("failed to set up SMTP transport")?;

  let state = AppState {
    store:    Arc::new(store),
    notifier: Arc::new(notifier),
    config:   Arc::new(server_cfg.clone()),
  };

  let app = phq9_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Render every stored submission for `patient` to stdout, with each trend
/// computed against the submission before it.
async fn print_history(store: &SqliteStore, patient: &str) -> anyhow::Result<()> {
  let history = store
    .history(patient)
    .await
    .with_context(|| format!("failed to read history for {patient}"))?;

  if history.is_empty() {
    println!("No submissions for {patient}");
    return Ok(());
  }

  let mut previous = None;
  for submission in &history {
    let trend = Trend::between(previous, submission.total_score);
    println!("{}", report::subject(submission));
    println!("{}", report::render(submission, &trend)?);
    previous = Some(submission.total_score);
  }

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
