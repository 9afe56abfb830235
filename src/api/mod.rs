//! Sysdash HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page with the initial view injected
//! - `GET /assets/*path` - Page scripts and styles
//!
//! ## View
//! - `GET /api/v1/view` - Render cycle (load, version select, text edit)
//! - `POST /api/v1/view` - Same, with a JSON body
//!
//! ## Prompt
//! - `POST /api/v1/prompt` - Submit the system prompt
//! - `GET /api/v1/prompt` - Read the session's stored prompt
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use sysdash::api::{serve, ApiConfig, AppState};
//! use sysdash::dashboard::Renderer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(Renderer::default(), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::session::SESSION_HEADER;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        // View routes
        .route(
            "/view",
            get(routes::view::get_view).post(routes::view::post_view),
        )
        // Prompt routes
        .route(
            "/prompt",
            get(routes::prompt::get_prompt).post(routes::prompt::submit_prompt),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::dashboard_page))
        .route("/assets/*path", get(routes::page::assets))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; none configured means same-origin only
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let session_header = HeaderName::from_static(SESSION_HEADER);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, session_header.clone()])
        .expose_headers([session_header])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sysdash dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sysdash shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{PromptResponse, SubmitPromptResponse, ViewResponse};
    use crate::dashboard::{FixedClock, MockSource, Renderer};
    use crate::session::SessionConfig;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use chrono::NaiveDate;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_test_app_with_sessions(SessionConfig::default())
    }

    fn create_test_app_with_sessions(sessions: SessionConfig) -> Router {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let renderer = Renderer::new(Arc::new(FixedClock(now)), MockSource::Seeded(1));
        build_router(AppState::with_sessions(renderer, ApiConfig::default(), sessions))
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn submit(prompt: &str, session_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/prompt")
            .header("Content-Type", "application/json");
        if let Some(id) = session_id {
            builder = builder.header(SESSION_HEADER, id);
        }
        let body = serde_json::json!({ "prompt": prompt }).to_string();
        builder.body(Body::from(body)).unwrap()
    }

    fn view(session_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/v1/view");
        if let Some(id) = session_id {
            builder = builder.header(SESSION_HEADER, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_page_is_html() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("text/html"));
    }

    #[tokio::test]
    async fn test_view_before_submit() {
        let app = create_test_app();

        let response = app.oneshot(view(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ViewResponse = json_body(response).await;
        assert!(body.session_id.is_none());
        assert_eq!(body.view.prompt.caption, "Last updated: Never");
        assert_eq!(body.view.statistics.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_view_invalid_version() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/view?version=v9&event=select_version")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_then_view() {
        let app = create_test_app();

        let response = app.clone().oneshot(submit("X", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let header_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();
        let submitted: SubmitPromptResponse = json_body(response).await;
        assert_eq!(submitted.session_id, header_id);
        assert_eq!(
            submitted.view.prompt.success_message.as_deref(),
            Some("✅ System prompt updated successfully!")
        );

        let response = app
            .clone()
            .oneshot(view(Some(&submitted.session_id)))
            .await
            .unwrap();
        let rendered: ViewResponse = json_body(response).await;
        assert_eq!(rendered.session_id.as_deref(), Some(header_id.as_str()));
        assert_eq!(rendered.view.prompt.caption, "Last updated: 08:30:00");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/prompt")
                    .header(SESSION_HEADER, &header_id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let prompt: PromptResponse = json_body(response).await;
        assert_eq!(prompt.last_prompt.as_deref(), Some("X"));
        assert!(prompt.prompt_updated);
    }

    #[tokio::test]
    async fn test_empty_submit_is_stored() {
        let app = create_test_app();

        let response = app.clone().oneshot(submit("", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let submitted: SubmitPromptResponse = json_body(response).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/prompt")
                    .header(SESSION_HEADER, &submitted.session_id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let prompt: PromptResponse = json_body(response).await;
        assert_eq!(prompt.last_prompt.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let app = create_test_app();

        let response = app.clone().oneshot(submit("mine", None)).await.unwrap();
        let mine: SubmitPromptResponse = json_body(response).await;

        // A second browser session has not submitted anything
        let response = app.clone().oneshot(view(None)).await.unwrap();
        let other: ViewResponse = json_body(response).await;
        assert_eq!(other.view.prompt.caption, "Last updated: Never");

        // Resubmitting keeps the same session
        let response = app
            .oneshot(submit("again", Some(&mine.session_id)))
            .await
            .unwrap();
        let again: SubmitPromptResponse = json_body(response).await;
        assert_eq!(again.session_id, mine.session_id);
    }

    #[tokio::test]
    async fn test_view_unknown_session_renders_fresh() {
        let app = create_test_app();

        let response = app.oneshot(view(Some("no-such-session"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ViewResponse = json_body(response).await;
        assert!(body.session_id.is_none());
        assert_eq!(body.view.prompt.caption, "Last updated: Never");
    }

    #[tokio::test]
    async fn test_submit_over_session_limit() {
        let app = create_test_app_with_sessions(SessionConfig {
            max_sessions: 1,
            ..Default::default()
        });

        let response = app.clone().oneshot(submit("first", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let first: SubmitPromptResponse = json_body(response).await;

        let response = app.clone().oneshot(submit("second", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let error: serde_json::Value = json_body(response).await;
        assert_eq!(error["error"]["code"], "SESSION_LIMIT");

        // The existing session can still resubmit at the limit
        let response = app
            .oneshot(submit("again", Some(&first.session_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_prompt_unknown_session() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/prompt")
                    .header(SESSION_HEADER, "no-such-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/prompt")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_view_with_draft() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/view")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"event": "edit_prompt", "draft": "work in progress", "version": "v1"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ViewResponse = json_body(response).await;
        assert_eq!(body.view.prompt.text, "work in progress");
        assert_eq!(body.view.footer, "Dashboard Version: v1 | Last refresh: 08:30:00");
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        // Must not panic on bad input
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
