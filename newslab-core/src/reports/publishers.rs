//! Article counts per publisher.

use super::{require_column, ReportOutcome, SkipReason};
use crate::domain::news::PUBLISHER;
use crate::domain::NewsTable;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PublisherReport {
    /// Rows with a non-null publisher.
    pub total_articles: usize,
    pub unique_publishers: usize,
    /// At most `top_n` publishers, most articles first; ties keep first-seen order.
    pub top: Vec<(String, usize)>,
}

/// Count articles per publisher and keep the `top_n` largest.
pub fn publisher_counts(table: &NewsTable, top_n: usize) -> ReportOutcome<PublisherReport> {
    let values = match require_column(table, PUBLISHER) {
        Ok(v) => v,
        Err(reason) => return ReportOutcome::Skipped(reason),
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for name in values.iter().flatten() {
        match index.get(name.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name.as_str(), counts.len());
                counts.push((name.clone(), 1));
            }
        }
    }

    if counts.is_empty() {
        return ReportOutcome::Skipped(SkipReason::NoData);
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let total_articles = counts.iter().map(|(_, n)| n).sum();
    let unique_publishers = counts.len();
    counts.truncate(top_n);

    ReportOutcome::Ready(PublisherReport {
        total_articles,
        unique_publishers,
        top: counts,
    })
}
