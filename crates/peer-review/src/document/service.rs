use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::archive::DocumentArchive;
use super::converter::{ConversionError, DocumentConverter, PageOptions};
use crate::config::AppConfig;
use crate::form::{keys, FormSubmission};
use crate::render::TemplateRenderer;

/// Prefix of every generated document filename.
pub const FILENAME_PREFIX: &str = "PeerReview";

/// A converted application ready to be returned and archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub generated_at: DateTime<Utc>,
}

impl RenderedDocument {
    /// `PeerReview_<epoch millis>.pdf`. Two documents generated in the same millisecond share
    /// a name and the later archive write replaces the earlier one.
    pub fn filename_for(generated_at: DateTime<Utc>) -> String {
        format!(
            "{FILENAME_PREFIX}_{}.pdf",
            generated_at.timestamp_millis()
        )
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentServiceError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Renders submissions, converts them and keeps a server-side copy.
pub struct PeerReviewDocumentService<C>
where
    C: DocumentConverter,
{
    renderer: TemplateRenderer,
    converter: Arc<C>,
    archive: DocumentArchive,
    page: PageOptions,
}

impl<C> PeerReviewDocumentService<C>
where
    C: DocumentConverter,
{
    pub fn new(
        renderer: TemplateRenderer,
        converter: Arc<C>,
        archive: DocumentArchive,
        page: PageOptions,
    ) -> Self {
        Self {
            renderer,
            converter,
            archive,
            page,
        }
    }

    pub fn from_config(config: &AppConfig, converter: Arc<C>) -> Self {
        Self::new(
            TemplateRenderer::from_config(&config.document),
            converter,
            DocumentArchive::new(config.storage.output_dir.clone()),
            PageOptions::regulatory_form(config.document.timeout),
        )
    }

    pub fn archive(&self) -> &DocumentArchive {
        &self.archive
    }

    /// Renders and converts without touching the archive.
    pub async fn convert(
        &self,
        submission: &FormSubmission,
    ) -> Result<RenderedDocument, DocumentServiceError> {
        let markup = self.renderer.render(submission);
        let bytes = tokio::time::timeout(
            self.page.timeout,
            self.converter.convert(&markup, &self.page),
        )
        .await
        .map_err(|_| ConversionError::TimedOut(self.page.timeout))??;

        let generated_at = Utc::now();
        Ok(RenderedDocument {
            filename: RenderedDocument::filename_for(generated_at),
            bytes,
            generated_at,
        })
    }

    /// Converts the submission and archives a copy. Archive failures are logged only.
    pub async fn generate(
        &self,
        submission: &FormSubmission,
    ) -> Result<RenderedDocument, DocumentServiceError> {
        let document = match self.convert(submission).await {
            Ok(document) => document,
            Err(err) => {
                error!(error = %err, firm = %submission.text(keys::FIRM_NAME), "document conversion failed");
                return Err(err);
            }
        };

        match self.archive.persist(&document.filename, &document.bytes).await {
            Ok(path) => info!(
                filename = %document.filename,
                bytes = document.bytes.len(),
                path = %path.display(),
                "document archived"
            ),
            Err(err) => error!(error = %err, filename = %document.filename, "document archive write failed"),
        }

        Ok(document)
    }
}
