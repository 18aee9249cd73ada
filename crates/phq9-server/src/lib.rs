//! HTTP layer for the PHQ-9 intake service.
//!
//! Exposes an axum [`Router`] backed by any [`ResponseStore`] and
//! [`Notifier`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Consent landing page |
//! | `GET`  | `/phq9` | Questionnaire form |
//! | `POST` | `/api/submit-phq9` | See [`submit`] |
//! | `GET`  | `/api/health` | See [`health`] |

pub mod error;
pub mod health;
pub mod pages;
pub mod submit;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{get, post},
};
use phq9_core::{notify::Notifier, store::ResponseStore};
use phq9_mail::MailConfig;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PHQ9_*` environment variables.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  pub smtp_host:         String,
  pub smtp_port:         u16,
  pub smtp_username:     String,
  pub smtp_password:     String,
  pub smtp_timeout_secs: u64,
  /// The single recipient of every report. Required to serve.
  pub clinician_email:   String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "0.0.0.0".to_string(),
      port:              5000,
      store_path:        PathBuf::from("phq9_clinical.db"),
      smtp_host:         "smtp.gmail.com".to_string(),
      smtp_port:         587,
      smtp_username:     String::new(),
      smtp_password:     String::new(),
      smtp_timeout_secs: 30,
      clinician_email:   String::new(),
    }
  }
}

impl ServerConfig {
  pub fn mail_config(&self) -> MailConfig {
    MailConfig {
      host:      self.smtp_host.clone(),
      port:      self.smtp_port,
      username:  self.smtp_username.clone(),
      password:  self.smtp_password.clone(),
      recipient: self.clinician_email.clone(),
      timeout:   Duration::from_secs(self.smtp_timeout_secs),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, N> {
  pub store:    Arc<S>,
  pub notifier: Arc<N>,
  pub config:   Arc<ServerConfig>,
}

impl<S, N> Clone for AppState<S, N> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      notifier: Arc::clone(&self.notifier),
      config:   Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `state`.
pub fn router<S, N>(state: AppState<S, N>) -> Router
where
  S: ResponseStore + 'static,
  N: Notifier + 'static,
{
  Router::new()
    .route("/", get(pages::landing))
    .route("/phq9", get(pages::form))
    .route("/api/submit-phq9", post(submit::handler::<S, N>))
    .route("/api/health", get(health::handler::<S, N>))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
