//! End-to-end behaviour of `POST /generate-pdf` through the public router.
//!
//! The conversion engine is replaced with in-process stubs so the scenarios cover rendering,
//! response headers and archiving without an external PDF toolchain.

mod common {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use peer_review::document::{
        document_router, ConversionError, DocumentArchive, DocumentConverter, PageOptions,
        PeerReviewDocumentService,
    };
    use peer_review::render::TemplateRenderer;

    pub(super) const FAKE_PDF: &[u8] = b"%PDF-1.4\n%stub\n";

    #[derive(Default)]
    pub(super) struct StubConverter {
        pub(super) markup: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DocumentConverter for StubConverter {
        async fn convert(
            &self,
            markup: &str,
            _options: &PageOptions,
        ) -> Result<Vec<u8>, ConversionError> {
            self.markup
                .lock()
                .expect("stub mutex poisoned")
                .push(markup.to_string());
            Ok(FAKE_PDF.to_vec())
        }
    }

    pub(super) struct FailingConverter;

    #[async_trait]
    impl DocumentConverter for FailingConverter {
        async fn convert(
            &self,
            _markup: &str,
            _options: &PageOptions,
        ) -> Result<Vec<u8>, ConversionError> {
            Err(ConversionError::Engine("renderer crashed".to_string()))
        }
    }

    pub(super) fn router<C: DocumentConverter + 'static>(
        converter: Arc<C>,
        output_dir: &std::path::Path,
    ) -> axum::Router {
        let service = PeerReviewDocumentService::new(
            TemplateRenderer::default(),
            converter,
            DocumentArchive::new(output_dir),
            PageOptions::default(),
        );
        document_router(Arc::new(service))
    }
}

mod http {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn archived_files(dir: &std::path::Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .expect("output dir listable")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[tokio::test]
    async fn json_submission_returns_pdf_attachment_and_archives_copy() {
        let output = TempDir::new().expect("temp dir");
        let converter = Arc::new(StubConverter::default());
        let router = router(converter.clone(), output.path());

        let payload = json!({
            "firmName": "Sharma & Co",
            "applyReason": ["mandatory", "boardDecision"],
            "hasConducted": "yes"
        });
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&header::HeaderValue::from_static("application/pdf"))
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("content disposition")
            .to_string();
        assert!(disposition.starts_with("attachment; filename=PeerReview_"));
        assert!(disposition.ends_with(".pdf"));

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        assert_eq!(&body[..], FAKE_PDF);

        let filename = disposition
            .trim_start_matches("attachment; filename=")
            .to_string();
        assert_eq!(archived_files(output.path()), vec![filename.clone()]);
        assert_eq!(
            std::fs::read(output.path().join(&filename)).expect("archived copy"),
            FAKE_PDF
        );

        let markup = converter.markup.lock().expect("stub mutex poisoned");
        assert!(markup[0].contains("Sharma & Co"));
    }

    #[tokio::test]
    async fn urlencoded_submission_collects_repeated_keys() {
        let output = TempDir::new().expect("temp dir");
        let converter = Arc::new(StubConverter::default());
        let router = router(converter.clone(), output.path());

        let body = "firmName=Menon+Associates&applyReason=voluntary&applyReason=newUnit\
                    &certificateAddress=12+MG+Road%0ABengaluru";
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let markup = converter.markup.lock().expect("stub mutex poisoned");
        let rendered = &markup[0];
        assert!(rendered.contains("Menon Associates"));
        assert!(rendered.contains("12 MG Road<br>Bengaluru"));
        assert_eq!(rendered.matches("<span class=\"checkbox\">✓</span>").count(), 2);
    }

    #[tokio::test]
    async fn conversion_failure_returns_json_error_without_archiving() {
        let output = TempDir::new().expect("temp dir");
        let router = router(Arc::new(FailingConverter), output.path());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            payload.get("error").and_then(Value::as_str),
            Some("conversion failed: renderer crashed")
        );
        assert!(archived_files(output.path()).is_empty());
    }

    #[tokio::test]
    async fn bodyless_submission_renders_blank_form() {
        let output = TempDir::new().expect("temp dir");
        let converter = Arc::new(StubConverter::default());
        let router = router(converter.clone(), output.path());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&header::HeaderValue::from_static("application/pdf"))
        );
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        assert_eq!(&body[..], FAKE_PDF);

        let markup = converter.markup.lock().expect("stub mutex poisoned");
        assert!(!markup[0].contains("✓"));
        assert_eq!(
            markup[0].matches("<span class=\"checkbox\">☐</span>").count(),
            11
        );
        assert_eq!(archived_files(output.path()).len(), 1);
    }

    #[tokio::test]
    async fn plain_text_body_is_treated_as_empty_submission() {
        let output = TempDir::new().expect("temp dir");
        let converter = Arc::new(StubConverter::default());
        let router = router(converter.clone(), output.path());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .header("content-type", "text/plain")
                    .body(Body::from("firmName=Ignored"))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let markup = converter.markup.lock().expect("stub mutex poisoned");
        assert!(!markup[0].contains("Ignored"));
    }

    #[tokio::test]
    async fn unreadable_json_is_rejected_before_conversion() {
        let output = TempDir::new().expect("temp dir");
        let converter = Arc::new(StubConverter::default());
        let router = router(converter.clone(), output.path());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"firmName\":"))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert!(response.status().is_client_error());
        assert!(converter
            .markup
            .lock()
            .expect("stub mutex poisoned")
            .is_empty());
        assert!(archived_files(output.path()).is_empty());
    }
}
