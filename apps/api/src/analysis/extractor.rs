//! Text Extractor — PDF bytes → lowercase plain text.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::analysis::AnalysisError;

const PDF_MAGIC: &[u8] = b"%PDF-";
/// Readers tolerate leading junk before the header; the header must start
/// within this many bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extracts the text of every page, in document order, lowercased.
///
/// The parsed document lives only for the duration of this call and is
/// dropped on every path, including a panic inside pdf-extract.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, AnalysisError> {
    if pdf_bytes.is_empty() {
        return Err(AnalysisError::Decode("uploaded file is empty".to_string()));
    }
    if !has_pdf_header(pdf_bytes) {
        return Err(AnalysisError::Decode(
            "uploaded file is not a PDF document".to_string(),
        ));
    }

    // pdf-extract panics on some malformed inputs instead of returning Err.
    let raw = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(pdf_bytes)
    }))
    .map_err(|_| {
        warn!("pdf-extract panicked while decoding upload");
        AnalysisError::Decode("PDF structure could not be parsed".to_string())
    })?
    .map_err(|e| AnalysisError::Decode(e.to_string()))?;

    let text = normalize(&raw)?;
    debug!(bytes = pdf_bytes.len(), chars = text.len(), "Extracted PDF text");
    Ok(text)
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let end = bytes.len().min(HEADER_SEARCH_WINDOW + PDF_MAGIC.len() - 1);
    let window = &bytes[..end];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Lowercases extracted text; whitespace-only output is `EmptyText`.
fn normalize(raw: &str) -> Result<String, AnalysisError> {
    if raw.trim().is_empty() {
        return Err(AnalysisError::EmptyText);
    }
    Ok(raw.to_lowercase())
}
