use std::collections::BTreeMap;

use super::{dataset::Dataset, entities::MarkdownBox};

const UNCATEGORISED: &str = "Uncategorised";

/// Share of records flagged as returned, in `[0, 1]`.
///
/// `None` when the source has no `is_returned` column or holds no rows.
pub fn return_rate(dataset: &Dataset) -> Option<f64> {
    if !dataset.schema.supports_returns() || dataset.is_empty() {
        return None;
    }
    Some(dataset.returned_count() as f64 / dataset.len() as f64)
}

/// Markdown depth per category, split by return flag.
pub fn markdown_return_breakdown(dataset: &Dataset) -> Option<Vec<MarkdownBox>> {
    if !dataset.schema.supports_markdown_breakdown() {
        return None;
    }

    let mut groups: BTreeMap<(String, bool), Vec<f64>> = BTreeMap::new();
    for record in &dataset.records {
        let Some(markdown) = record.markdown_percentage.filter(|value| value.is_finite()) else {
            continue;
        };
        let category = record
            .category
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(UNCATEGORISED)
            .to_string();
        groups
            .entry((category, record.is_returned))
            .or_default()
            .push(markdown);
    }

    Some(
        groups
            .into_iter()
            .filter_map(|((category, is_returned), mut values)| {
                values.sort_by(f64::total_cmp);
                Some(MarkdownBox {
                    category,
                    is_returned,
                    count: values.len(),
                    min: *values.first()?,
                    q1: quantile(&values, 0.25),
                    median: quantile(&values, 0.5),
                    q3: quantile(&values, 0.75),
                    max: *values.last()?,
                })
            })
            .collect(),
    )
}

/// Linear interpolation between closest ranks over already sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
