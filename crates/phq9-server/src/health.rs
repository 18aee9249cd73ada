//! Handler for `GET /api/health`.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use phq9_core::{notify::Notifier, store::ResponseStore};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
  Connected,
  NotFound,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status:    String,
  pub timestamp: DateTime<Utc>,
  pub database:  DatabaseStatus,
}

/// `GET /api/health`. Always 200; `database` reflects store reachability.
pub async fn handler<S, N>(State(state): State<AppState<S, N>>) -> Json<HealthResponse>
where
  S: ResponseStore + 'static,
  N: Notifier + 'static,
{
  let database = if state.store.is_reachable().await {
    DatabaseStatus::Connected
  } else {
    DatabaseStatus::NotFound
  };

  Json(HealthResponse {
    status: "healthy".to_owned(),
    timestamp: Utc::now(),
    database,
  })
}
