use clap::Args;
use peer_review::config::AppConfig;
use peer_review::document::{PeerReviewDocumentService, WkhtmltopdfConverter};
use peer_review::error::AppError;
use peer_review::form::FormSubmission;
use peer_review::render::TemplateRenderer;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// JSON file holding the form submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination file; PDFs default to the configured output directory
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Emit the Form 1 markup instead of converting it to PDF
    #[arg(long)]
    pub(crate) html: bool,
}

pub(crate) async fn load_submission(path: &Path) -> Result<FormSubmission, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let submission = load_submission(&args.input).await?;

    if args.html {
        let markup = TemplateRenderer::from_config(&config.document).render(&submission);
        match args.output {
            Some(path) => {
                tokio::fs::write(&path, markup).await?;
                println!("Form 1 markup written to {}", path.display());
            }
            None => println!("{markup}"),
        }
        return Ok(());
    }

    let converter = Arc::new(WkhtmltopdfConverter::new(
        config.document.converter_bin.clone(),
    ));
    let service = PeerReviewDocumentService::from_config(&config, converter);

    match args.output {
        Some(path) => {
            let document = service.convert(&submission).await?;
            tokio::fs::write(&path, &document.bytes).await?;
            println!(
                "{} ({} bytes) written to {}",
                document.filename,
                document.bytes.len(),
                path.display()
            );
        }
        None => {
            service.archive().ensure_dir()?;
            let document = service.generate(&submission).await?;
            println!(
                "{} ({} bytes) written to {}",
                document.filename,
                document.bytes.len(),
                service.archive().root().join(&document.filename).display()
            );
        }
    }

    Ok(())
}
