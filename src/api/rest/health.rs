//! # Health Endpoints
//!
//! Liveness and readiness probes served over HTTP.
//!
//! - `GET /health/liveness`: 200 while the process is alive
//! - `GET /health/readiness`: 200 once the service accepts traffic
//!
//! Both answer 503 otherwise, with a JSON body `{"status": ...}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower_http::trace::TraceLayer;

/// Process lifecycle flags shared between `main` and the probes.
///
/// Clones share the same flags.
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    alive: Arc<AtomicBool>,
    ready: Arc<AtomicBool>,
}

impl HealthState {
    /// Creates a state that is alive but not yet ready.
    #[must_use]
    pub fn new() -> Self {
        let state = Self::default();
        state.set_alive(true);
        state
    }

    /// Sets the liveness flag.
    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }

    /// Sets the readiness flag.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Returns the liveness flag.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Returns the readiness flag.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

/// Body of a probe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `unavailable`.
    pub status: String,
}

fn probe(up: bool) -> (StatusCode, Json<HealthResponse>) {
    if up {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".to_string(),
            }),
        )
    }
}

async fn liveness(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    probe(state.is_alive())
}

async fn readiness(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    probe(state.is_ready())
}

/// Builds the health router.
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
