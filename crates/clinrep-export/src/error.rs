use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("failed to read template {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown placeholder «{token}» at byte {offset}")]
    UnknownPlaceholder { token: String, offset: usize },

    #[error("no value for placeholder {0}")]
    MissingPlaceholder(String),

    #[error("no headless browser found (set CLINREP_CHROME_PATH)")]
    BrowserNotFound,

    #[error("failed to launch browser {}: {source}", .path.display())]
    BrowserLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("browser did not finish rendering within {0:?}")]
    BrowserTimeout(Duration),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
