//! Offline migration of stored template text.
//!
//! Two rewrites, both idempotent:
//! 1. legacy score-level wording is relabeled to the current terminology;
//! 2. the NIMHANS SLD arithmetic block is wrapped in a container whose
//!    `display` style is driven by the `«nimhans_display»` placeholder.
//!
//! Never run against a template a live server is reading.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ExportError;
use crate::placeholder::Placeholder;
use crate::template::read_template_file;

/// Heading text identifying the conditional block.
pub const NIMHANS_MARKER: &str = "NIMHANS SLD Index - Arithmetic test";

const BLOCK_HEADING: &str = "<h4>";

static RELABELS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (literal("of performance.", false), "level of intelligence."),
        (literal("Low performance", true), "Low level of intelligence"),
        (
            literal("Average of performance", true),
            "Average level of intelligence",
        ),
    ]
});

fn literal(phrase: &str, case_insensitive: bool) -> Regex {
    let escaped = regex::escape(phrase);
    let pattern = if case_insensitive {
        format!("(?i){escaped}")
    } else {
        escaped
    };
    Regex::new(&pattern).expect("escaped phrases are valid patterns")
}

/// What happened to the conditional block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapOutcome {
    Wrapped,
    AlreadyWrapped,
    MarkerNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Number of phrases relabeled to current terminology.
    pub relabeled: usize,
    pub wrap: WrapOutcome,
    /// Whether the text differs from the input.
    pub changed: bool,
}

/// Opening tag of the display-controlled container.
pub fn wrapper_open() -> String {
    format!(
        "<div style=\"display: {};\">\n",
        Placeholder::NimhansDisplay.token()
    )
}

const WRAPPER_CLOSE: &str = "</div>\n";

/// Apply both rewrites to `text`.
pub fn migrate_template(text: &str) -> (String, MigrationReport) {
    let mut content = text.to_string();
    let mut relabeled = 0;

    for (pattern, replacement) in RELABELS.iter() {
        let hits = pattern.find_iter(&content).count();
        if hits > 0 {
            relabeled += hits;
            content = pattern.replace_all(&content, *replacement).into_owned();
        }
    }

    let (content, wrap) = wrap_nimhans_block(content);
    let changed = content != text;

    (
        content,
        MigrationReport {
            relabeled,
            wrap,
            changed,
        },
    )
}

fn wrap_nimhans_block(content: String) -> (String, WrapOutcome) {
    let Some(marker) = content.find(NIMHANS_MARKER) else {
        return (content, WrapOutcome::MarkerNotFound);
    };
    let Some(block_start) = content[..marker].rfind(BLOCK_HEADING) else {
        return (content, WrapOutcome::MarkerNotFound);
    };

    let after_marker = marker + NIMHANS_MARKER.len();
    let block_end = content[after_marker..]
        .find(BLOCK_HEADING)
        .map(|i| after_marker + i)
        .or_else(|| content[after_marker..].find("</body>").map(|i| after_marker + i))
        .unwrap_or(content.len());

    let open = wrapper_open();
    let block = &content[block_start..block_end];
    let preceded_by_wrapper = content[..block_start]
        .trim_end()
        .ends_with(open.trim_end());
    if preceded_by_wrapper || block.contains(&Placeholder::NimhansDisplay.token()) {
        return (content, WrapOutcome::AlreadyWrapped);
    }

    let mut wrapped = String::with_capacity(content.len() + open.len() + WRAPPER_CLOSE.len());
    wrapped.push_str(&content[..block_start]);
    wrapped.push_str(&open);
    wrapped.push_str(block);
    wrapped.push_str(WRAPPER_CLOSE);
    wrapped.push_str(&content[block_end..]);

    (wrapped, WrapOutcome::Wrapped)
}

/// Migrate the template file at `path`. With `dry_run` nothing is written.
pub async fn migrate_file(path: &Path, dry_run: bool) -> Result<MigrationReport, ExportError> {
    let text = read_template_file(path).await?;
    let (migrated, report) = migrate_template(&text);

    if report.changed && !dry_run {
        tokio::fs::write(path, migrated).await?;
        tracing::info!(
            path = %path.display(),
            relabeled = report.relabeled,
            wrap = ?report.wrap,
            "template migrated"
        );
    } else {
        tracing::info!(
            path = %path.display(),
            dry_run,
            changed = report.changed,
            "template left untouched"
        );
    }

    Ok(report)
}
