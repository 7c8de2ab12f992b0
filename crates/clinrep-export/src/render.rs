use std::collections::BTreeSet;
use std::ops::Range;

use clinrep_core::models::submission::Submission;
use clinrep_instruments::ScoreTable;

use crate::error::ExportError;
use crate::placeholder::{Placeholder, TOKEN_CLOSE, TOKEN_OPEN, is_identifier};
use crate::replacements::{ReplacementMap, build_replacements};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(Range<usize>),
    Slot(Placeholder),
}

/// A report template split once into literal text and placeholder slots.
///
/// Rendering is a single pass over the segments. Values are inserted
/// literally (never interpreted as patterns) and HTML-escaped unless the
/// placeholder is declared raw.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// Tokenize `source`.
    ///
    /// A `«` followed by an identifier and `»` must name a known placeholder,
    /// otherwise compilation fails. Any other `«` is literal text.
    pub fn compile(source: impl Into<String>) -> Result<Self, ExportError> {
        let source = source.into();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(found) = source[cursor..].find(TOKEN_OPEN) {
            let open = cursor + found;
            let ident_start = open + TOKEN_OPEN.len_utf8();

            let Some(close_rel) = source[ident_start..].find(TOKEN_CLOSE) else {
                break;
            };
            let close = ident_start + close_rel;
            let identifier = &source[ident_start..close];

            if !is_identifier(identifier) {
                cursor = ident_start;
                continue;
            }

            let placeholder = Placeholder::from_identifier(identifier).ok_or_else(|| {
                ExportError::UnknownPlaceholder {
                    token: identifier.to_string(),
                    offset: open,
                }
            })?;

            if literal_start < open {
                segments.push(Segment::Literal(literal_start..open));
            }
            segments.push(Segment::Slot(placeholder));

            cursor = close + TOKEN_CLOSE.len_utf8();
            literal_start = cursor;
        }

        if literal_start < source.len() {
            segments.push(Segment::Literal(literal_start..source.len()));
        }

        Ok(Self { source, segments })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders referenced by the template.
    pub fn placeholders(&self) -> BTreeSet<Placeholder> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Slot(p) => Some(*p),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute every slot from `map`. A slot without a value is an error.
    pub fn render(&self, map: &ReplacementMap) -> Result<String, ExportError> {
        let mut out = String::with_capacity(self.source.len() + 1024);

        for segment in &self.segments {
            match segment {
                Segment::Literal(range) => out.push_str(&self.source[range.clone()]),
                Segment::Slot(placeholder) => {
                    let value = map
                        .get(*placeholder)
                        .ok_or_else(|| ExportError::MissingPlaceholder(placeholder.to_string()))?;
                    if placeholder.is_raw() {
                        out.push_str(value);
                    } else {
                        out.push_str(&tera::escape_html(value));
                    }
                }
            }
        }

        Ok(out)
    }
}

/// Build the replacement map for `submission` and render it into `template`.
pub fn render_report(
    template: &CompiledTemplate,
    submission: &Submission,
    table: &dyn ScoreTable,
) -> Result<String, ExportError> {
    let map = build_replacements(submission, table);
    template.render(&map)
}
