use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::ExportError;
use crate::render::CompiledTemplate;

/// File name of the report layout inside the template directory.
pub const REPORT_TEMPLATE: &str = "complete_report.html";

/// Loads the report template from disk.
///
/// With caching enabled the template is read and compiled once and shared
/// for the lifetime of the store; the file is treated as immutable while
/// the server runs. Without caching every call re-reads the file.
#[derive(Debug)]
pub struct TemplateStore {
    dir: PathBuf,
    cache: Option<OnceCell<Arc<CompiledTemplate>>>,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>, cache: bool) -> Self {
        Self {
            dir: dir.into(),
            cache: cache.then(OnceCell::new),
        }
    }

    /// Directory holding the template and the assets it references.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(REPORT_TEMPLATE)
    }

    pub async fn load(&self) -> Result<Arc<CompiledTemplate>, ExportError> {
        match &self.cache {
            Some(cell) => cell
                .get_or_try_init(|| async { self.read().await.map(Arc::new) })
                .await
                .cloned(),
            None => self.read().await.map(Arc::new),
        }
    }

    async fn read(&self) -> Result<CompiledTemplate, ExportError> {
        let path = self.report_path();
        let text = read_template_file(&path).await?;
        let compiled = CompiledTemplate::compile(text)?;
        tracing::debug!(
            path = %path.display(),
            placeholders = compiled.placeholders().len(),
            "report template loaded"
        );
        Ok(compiled)
    }
}

pub(crate) async fn read_template_file(path: &Path) -> Result<String, ExportError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ExportError::TemplateNotFound(path.to_path_buf())
        } else {
            ExportError::TemplateRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}
