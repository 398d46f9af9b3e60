//! Résumé role analysis.
//!
//! Pipeline: PDF bytes → lowercase text → matched keywords → ranked percentages → best role.
//! Pure and synchronous; the HTTP layer runs it on a blocking thread.

pub mod catalog;
pub mod extractor;
#[cfg(test)]
pub mod fixtures;
pub mod handlers;
pub mod matcher;
pub mod scoring;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::analysis::catalog::RoleCatalog;
use crate::analysis::matcher::{find_matching_keywords, MatchedKeywords};
use crate::analysis::scoring::{calculate_role_percentages, select_best_role, RolePercentage};

/// Terminal failures of a single analysis. No partial result accompanies any of them.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Could not decode PDF: {0}")]
    Decode(String),

    #[error("PDF contains no extractable text")]
    EmptyText,

    #[error("No role keywords were found in the document")]
    EmptyResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub matched_keywords: MatchedKeywords,
    pub role_percentages: Vec<RolePercentage>,
    pub best_role: RolePercentage,
}

/// Runs the full pipeline over an uploaded PDF.
pub fn analyze_resume(
    pdf_bytes: &[u8],
    catalog: &RoleCatalog,
) -> Result<AnalysisResult, AnalysisError> {
    let analysis_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze_resume", %analysis_id, bytes = pdf_bytes.len());
    let _guard = span.enter();

    let text = extractor::extract_text(pdf_bytes)?;
    let result = analyze_text(&text, catalog)?;

    info!(
        chars = text.len(),
        matched_roles = result.matched_keywords.len(),
        best_role = %result.best_role.role(),
        percentage = result.best_role.percentage(),
        "Resume analyzed"
    );
    Ok(result)
}

/// Matching and scoring over already-extracted, lowercased text.
pub fn analyze_text(text: &str, catalog: &RoleCatalog) -> Result<AnalysisResult, AnalysisError> {
    let matched_keywords = find_matching_keywords(text, catalog);
    let role_percentages = calculate_role_percentages(&matched_keywords, catalog);
    let best_role = select_best_role(&role_percentages)?;

    Ok(AnalysisResult {
        matched_keywords,
        role_percentages,
        best_role,
    })
}
