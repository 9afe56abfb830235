//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Not ready while the session store is full, since submits would fail.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if has_session_capacity(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = if has_session_capacity(&state).await {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        sessions: state.session_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn has_session_capacity(state: &AppState) -> bool {
    state.session_count().await < state.sessions.config().max_sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::ApiConfig;
    use crate::dashboard::{Renderer, SessionState};
    use crate::session::SessionConfig;
    use std::time::Duration;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_tracks_session_capacity() {
        let state = Arc::new(AppState::with_sessions(
            Renderer::default(),
            ApiConfig::default(),
            SessionConfig {
                max_sessions: 1,
                ..Default::default()
            },
        ));
        assert_eq!(readiness(State(Arc::clone(&state))).await, StatusCode::OK);

        state
            .sessions
            .save(None, SessionState::submit(None, "X"))
            .await
            .unwrap();

        assert_eq!(
            readiness(State(Arc::clone(&state))).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.sessions, 1);
    }

    #[tokio::test]
    async fn test_readiness_recovers_after_idle_expiry() {
        let state = Arc::new(AppState::with_sessions(
            Renderer::default(),
            ApiConfig::default(),
            SessionConfig {
                max_sessions: 1,
                idle_timeout: Duration::from_millis(5),
            },
        ));
        state
            .sessions
            .save(None, SessionState::submit(None, "X"))
            .await
            .unwrap();
        assert_eq!(
            readiness(State(Arc::clone(&state))).await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(readiness(State(Arc::clone(&state))).await, StatusCode::OK);
        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.sessions, 0);
    }
}
