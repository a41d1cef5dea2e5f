//! The public accountability page.

use ampa_domain::{DocumentCategory, TransparencyDocument};
use chrono::Datelike;

/// What the accountability page shows for one year/month selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountabilityReport {
    /// Monthly statements matching the selection, newest first.
    pub monthly: Vec<TransparencyDocument>,
    /// Annual statements, never filtered.
    pub annual: Vec<TransparencyDocument>,
    /// Years with at least one published document, newest first.
    pub years: Vec<i32>,
}

impl AccountabilityReport {
    /// `documents` must already be sorted newest first.
    pub(crate) fn build(documents: &[TransparencyDocument], year: Option<i32>, month: Option<u32>) -> Self {
        let monthly = documents
            .iter()
            .filter(|d| d.category == DocumentCategory::Monthly)
            .filter(|d| year.is_none_or(|y| d.published_on.year() == y))
            .filter(|d| month.is_none_or(|m| d.published_on.month() == m))
            .cloned()
            .collect();

        let annual = documents.iter().filter(|d| d.category == DocumentCategory::Annual).cloned().collect();

        let mut years: Vec<i32> = documents.iter().map(|d| d.published_on.year()).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();

        Self { monthly, annual, years }
    }
}
