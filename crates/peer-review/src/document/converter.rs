use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Paper sizes understood by the conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
}

impl PageSize {
    pub fn label(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
        }
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    pub const fn uniform(mm: u32) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

/// Layout and time limits applied to every conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub size: PageSize,
    pub margins: Margins,
    pub timeout: Duration,
}

impl PageOptions {
    /// A4 with 20mm margins on every side.
    pub fn regulatory_form(timeout: Duration) -> Self {
        Self {
            size: PageSize::A4,
            margins: Margins::uniform(20),
            timeout,
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::regulatory_form(Duration::from_secs(60))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to start converter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("converter i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("converter exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },
    #[error("converter produced an empty document")]
    EmptyOutput,
    #[error("conversion timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    #[error("conversion failed: {0}")]
    Engine(String),
}

/// Markup-to-PDF engine the document service delegates to.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, markup: &str, options: &PageOptions)
        -> Result<Vec<u8>, ConversionError>;
}

/// Converts by piping markup through a `wkhtmltopdf` process.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfConverter {
    program: String,
}

impl WkhtmltopdfConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command line for one conversion reading stdin and writing stdout.
    pub fn arguments(options: &PageOptions) -> Vec<String> {
        let margin = |mm: u32| format!("{mm}mm");
        vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "--page-size".to_string(),
            options.size.label().to_string(),
            "--margin-top".to_string(),
            margin(options.margins.top),
            "--margin-right".to_string(),
            margin(options.margins.right),
            "--margin-bottom".to_string(),
            margin(options.margins.bottom),
            "--margin-left".to_string(),
            margin(options.margins.left),
            "-".to_string(),
            "-".to_string(),
        ]
    }
}

#[async_trait]
impl DocumentConverter for WkhtmltopdfConverter {
    async fn convert(
        &self,
        markup: &str,
        options: &PageOptions,
    ) -> Result<Vec<u8>, ConversionError> {
        let mut child = Command::new(&self.program)
            .args(Self::arguments(options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ConversionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ConversionError::Engine("converter stdin unavailable".to_string()))?;
        let input = markup.as_bytes().to_vec();
        let feeder = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ConversionError::Exited {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        feeder
            .await
            .map_err(|err| ConversionError::Engine(err.to_string()))??;

        if output.stdout.is_empty() {
            return Err(ConversionError::EmptyOutput);
        }
        Ok(output.stdout)
    }
}
