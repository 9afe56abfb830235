//! Page Routes
//!
//! Serves the embedded browser page that draws the view model.
//!
//! - GET / - Dashboard HTML with the initial view injected
//! - GET /assets/*path - Static assets (JS, CSS)

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_embed::RustEmbed;
use std::sync::Arc;

use crate::api::dto::ViewRequest;
use crate::api::state::AppState;

use super::view::render_view;

/// Embedded page assets from the web/ directory
#[derive(RustEmbed)]
#[folder = "web/"]
struct PageAssets;

/// Placeholder in index.html replaced by the initial view
const INITIAL_DATA_SLOT: &str = "/*INITIAL_VIEW*/null";

/// GET /
///
/// Renders a load cycle server-side so the first paint needs no round trip.
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Response {
    let Some(content) = PageAssets::get("index.html") else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard HTML not found").into_response();
    };

    let html = match std::str::from_utf8(&content.data) {
        Ok(html) => html,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid HTML encoding").into_response()
        }
    };

    let initial = match render_view(&state, &HeaderMap::new(), ViewRequest::default()).await {
        Ok(view) => view,
        Err(e) => return e.into_response(),
    };

    let json = match serde_json::to_string(&initial) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize initial view");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render dashboard")
                .into_response();
        }
    };

    Html(html.replace(INITIAL_DATA_SLOT, &escape_script_json(&json))).into_response()
}

/// GET /assets/*path
pub async fn assets(Path(path): Path<String>) -> Response {
    match PageAssets::get(&path) {
        Some(content) => {
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime_type.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

/// Keep JSON inert inside the surrounding script element
///
/// `<` only occurs inside JSON strings, where `\u003c` decodes to the same
/// text, so no `</script>` or `<!--` reaches the HTML parser.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::ApiConfig;
    use crate::dashboard::Renderer;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Renderer::default(), ApiConfig::default()))
    }

    #[tokio::test]
    async fn test_dashboard_page_injects_view() {
        let response = dashboard_page(State(state())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(!html.contains(INITIAL_DATA_SLOT));
        assert!(html.contains("Requests (Last 24 Hours)"));
        assert!(html.contains("Last updated: Never"));
    }

    #[tokio::test]
    async fn test_assets_not_found() {
        let response = assets(Path("nonexistent.js".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assets_content_types() {
        for (path, expected) in [("dashboard.js", "javascript"), ("styles.css", "css")] {
            let response = assets(Path(path.to_string())).await;
            assert_eq!(response.status(), StatusCode::OK, "missing asset {}", path);

            let ct = response
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap();
            assert!(ct.contains(expected), "Expected {} for {}, got {}", expected, path, ct);
        }
    }

    #[test]
    fn test_escape_script_json() {
        assert_eq!(
            escape_script_json(r#"{"text":"</script>"}"#),
            r#"{"text":"\u003c/script>"}"#
        );
        assert_eq!(
            escape_script_json(r#"{"text":"<!-- <script>"}"#),
            r#"{"text":"\u003c!-- \u003cscript>"}"#
        );
    }

    #[test]
    fn test_escaped_json_decodes_to_same_text() {
        let text = "<!-- </script><script>alert(1)</script>";
        let json = serde_json::to_string(&serde_json::json!({ "text": text })).unwrap();
        let escaped = escape_script_json(&json);

        assert!(!escaped.contains('<'));
        let decoded: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(decoded["text"], text);
    }
}
