//! Word export.
//!
//! Word processors import HTML that declares the Office XML namespaces, so
//! the "document" is the rendered report inside a minimal Office envelope.
//! It is not a binary .doc file.

pub const CONTENT_TYPE: &str = "application/msword";
pub const FILE_NAME: &str = "Clinical_Report.doc";

const DOC_HEADER: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' \
xmlns='http://www.w3.org/TR/REC-html40'>\n\
<head><meta charset='utf-8'></head><body>\n";

const DOC_FOOTER: &str = "\n</body></html>";

/// Wrap rendered report HTML for import by a word processor.
pub fn wrap_word_document(rendered: &str) -> String {
    let mut doc = String::with_capacity(DOC_HEADER.len() + rendered.len() + DOC_FOOTER.len());
    doc.push_str(DOC_HEADER);
    doc.push_str(rendered);
    doc.push_str(DOC_FOOTER);
    doc
}
