use crate::infra::{resolve_asset, AppState, FORM_PAGE};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use peer_review::document::{document_router, DocumentConverter, PeerReviewDocumentService};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub(crate) fn with_service_routes<C>(service: Arc<PeerReviewDocumentService<C>>) -> Router
where
    C: DocumentConverter + 'static,
{
    document_router(service)
        .route("/", get(form_page))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(static_asset)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn not_found(path: &str) -> Response {
    let payload = json!({ "error": format!("{path} not found") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

pub(crate) async fn form_page(Extension(state): Extension<AppState>) -> Response {
    let path = state.static_dir.join(FORM_PAGE);
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            debug!(error = %err, path = %path.display(), "form page unavailable");
            not_found("/")
        }
    }
}

pub(crate) async fn static_asset(
    Extension(state): Extension<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return not_found(uri.path());
    }

    let Some(path) = resolve_asset(&state.static_dir, uri.path()) else {
        return not_found(uri.path());
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let content_type = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            debug!(error = %err, path = %path.display(), "static asset miss");
            not_found(uri.path())
        }
    }
}
