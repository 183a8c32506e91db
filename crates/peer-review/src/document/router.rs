use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use super::converter::DocumentConverter;
use super::service::PeerReviewDocumentService;
use crate::form::FormSubmission;

/// Form payload decoded from either a JSON or a url-encoded body.
#[derive(Debug, Clone)]
pub struct SubmissionPayload(pub FormSubmission);

/// Body encodings the form endpoint decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Other,
}

fn body_kind(request: &Request) -> BodyKind {
    let Some(mime) = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
    else {
        return BodyKind::Other;
    };

    if mime.type_() != mime::APPLICATION {
        return BodyKind::Other;
    }
    if mime.subtype() == mime::JSON || mime.suffix().map_or(false, |suffix| suffix == mime::JSON) {
        BodyKind::Json
    } else if mime.subtype() == mime::WWW_FORM_URLENCODED {
        BodyKind::UrlEncoded
    } else {
        BodyKind::Other
    }
}

/// Bodies that are neither JSON nor url-encoded carry no fields and decode as an empty
/// submission. Only JSON that fails to parse is rejected.
#[async_trait]
impl<S> FromRequest<S> for SubmissionPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&request) {
            BodyKind::Json => {
                let Json(value) = Json::<Value>::from_request(request, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Self(FormSubmission::from_json(value)))
            }
            BodyKind::UrlEncoded => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Self(FormSubmission::from_pairs(pairs)))
            }
            BodyKind::Other => Ok(Self(FormSubmission::default())),
        }
    }
}

/// Router exposing the document generation endpoint.
pub fn document_router<C>(service: Arc<PeerReviewDocumentService<C>>) -> Router
where
    C: DocumentConverter + 'static,
{
    Router::new()
        .route("/generate-pdf", post(generate_handler::<C>))
        .with_state(service)
}

pub(crate) async fn generate_handler<C>(
    State(service): State<Arc<PeerReviewDocumentService<C>>>,
    SubmissionPayload(submission): SubmissionPayload,
) -> Response
where
    C: DocumentConverter + 'static,
{
    match service.generate(&submission).await {
        Ok(document) => {
            info!(
                filename = %document.filename,
                bytes = document.bytes.len(),
                fields = submission.len(),
                "peer review document generated"
            );
            let disposition = document.content_disposition();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.bytes,
            )
                .into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
