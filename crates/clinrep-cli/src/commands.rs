use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;

use clinrep_core::models::submission::Submission;
use clinrep_export::migrate::{MigrationReport, migrate_file};
use clinrep_export::pdf::HeadlessChrome;
use clinrep_export::render::render_report;
use clinrep_export::styles::PageSetup;
use clinrep_export::template::TemplateStore;
use clinrep_export::doc;
use clinrep_instruments::tables::quotient::QuotientTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Doc,
    Pdf,
}

/// Options for an offline render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub submission: PathBuf,
    pub template_dir: PathBuf,
    pub format: OutputFormat,
    pub out: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub pdf_timeout: Duration,
}

/// Migrate a template file, writing it back unless `dry_run`.
pub async fn migrate(path: &Path, dry_run: bool) -> eyre::Result<MigrationReport> {
    let report = migrate_file(path, dry_run).await?;
    tracing::info!(
        path = %path.display(),
        relabeled = report.relabeled,
        wrap = ?report.wrap,
        changed = report.changed,
        dry_run,
        "template migration finished"
    );
    Ok(report)
}

/// Render a JSON submission with the template in `template_dir` and write
/// the result to `out`. Returns the number of bytes written.
pub async fn render(options: &RenderOptions) -> eyre::Result<usize> {
    let body = tokio::fs::read(&options.submission).await.map_err(|e| {
        eyre::eyre!(
            "failed to read submission {}: {e}",
            options.submission.display()
        )
    })?;
    let submission = Submission::from_json(&body)?;

    let store = TemplateStore::new(&options.template_dir, false);
    let template = store.load().await?;
    let html = render_report(&template, &submission, &QuotientTable)?;

    let bytes = match options.format {
        OutputFormat::Html => html.into_bytes(),
        OutputFormat::Doc => doc::wrap_word_document(&html).into_bytes(),
        OutputFormat::Pdf => {
            let browser = HeadlessChrome::new(options.chrome_path.clone(), options.pdf_timeout);
            browser.render(&html, &PageSetup::a4()).await?
        }
    };

    tokio::fs::write(&options.out, &bytes)
        .await
        .map_err(|e| eyre::eyre!("failed to write {}: {e}", options.out.display()))?;

    tracing::info!(
        out = %options.out.display(),
        format = ?options.format,
        bytes = bytes.len(),
        "report rendered"
    );
    Ok(bytes.len())
}
