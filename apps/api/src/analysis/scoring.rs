//! Coverage scoring — per-role percentage of catalog keywords found, ranking,
//! and best-role selection.
//!
//! Ranking is fully deterministic: percentage descending, then role name
//! ascending. The best role is the head of that ranking, so the two outputs
//! can never disagree on ties.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::RoleCatalog;
use crate::analysis::matcher::MatchedKeywords;
use crate::analysis::AnalysisError;

/// `(role, percentage)`; serialises as a two-element JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePercentage(pub String, pub f64);

impl RolePercentage {
    pub fn role(&self) -> &str {
        &self.0
    }

    pub fn percentage(&self) -> f64 {
        self.1
    }
}

/// Coverage percentage for every matched role, ranked.
///
/// Roles with an empty catalog entry are skipped.
pub fn calculate_role_percentages(
    matched: &MatchedKeywords,
    catalog: &RoleCatalog,
) -> Vec<RolePercentage> {
    let mut percentages: Vec<RolePercentage> = matched
        .iter()
        .filter_map(|(role, keywords)| {
            let total = catalog.keyword_count(role);
            if total == 0 {
                return None;
            }
            let percentage = keywords.len() as f64 / total as f64 * 100.0;
            Some(RolePercentage(role.clone(), percentage))
        })
        .collect();

    percentages.sort_by(rank);
    percentages
}

/// Picks the top-ranked role. `ranked` must come from `calculate_role_percentages`.
pub fn select_best_role(ranked: &[RolePercentage]) -> Result<RolePercentage, AnalysisError> {
    ranked.first().cloned().ok_or(AnalysisError::EmptyResult)
}

fn rank(a: &RolePercentage, b: &RolePercentage) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}
