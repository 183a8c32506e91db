//! Conversion of rendered applications into downloadable PDF documents.

pub mod archive;
pub mod converter;
pub mod router;
pub mod service;

pub use archive::{ArchiveError, DocumentArchive};
pub use converter::{
    ConversionError, DocumentConverter, Margins, PageOptions, PageSize, WkhtmltopdfConverter,
};
pub use router::{document_router, SubmissionPayload};
pub use service::{
    DocumentServiceError, PeerReviewDocumentService, RenderedDocument, FILENAME_PREFIX,
};
