use time::OffsetDateTime;

use super::entities::{DatasetSchema, SalesRecord};

/// An immutable, fully loaded set of sales records.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub schema: DatasetSchema,
    pub records: Vec<SalesRecord>,
    pub loaded_at: OffsetDateTime,
}

impl Dataset {
    pub fn new(label: impl Into<String>, schema: DatasetSchema, records: Vec<SalesRecord>) -> Self {
        Self {
            label: label.into(),
            schema,
            records,
            loaded_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `current_price` over every record, or `None` when the source has no
    /// price column. Blank cells contribute nothing.
    pub fn baseline_revenue(&self) -> Option<f64> {
        if !self.schema.supports_revenue() {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|record| record.current_price)
                .sum(),
        )
    }

    pub fn returned_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_returned).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: Option<f64>) -> SalesRecord {
        SalesRecord {
            current_price: price,
            ..SalesRecord::default()
        }
    }

    #[test]
    fn baseline_revenue_sums_prices_and_skips_blanks() {
        let dataset = Dataset::new(
            "test",
            DatasetSchema::all(),
            vec![priced(Some(10.0)), priced(None), priced(Some(2.5))],
        );
        assert_eq!(dataset.baseline_revenue(), Some(12.5));
    }

    #[test]
    fn baseline_revenue_absent_without_price_column() {
        let schema = DatasetSchema {
            current_price: false,
            ..DatasetSchema::all()
        };
        let dataset = Dataset::new("test", schema, vec![priced(None)]);
        assert_eq!(dataset.baseline_revenue(), None);
    }

    #[test]
    fn empty_dataset_with_price_column_has_zero_baseline() {
        let dataset = Dataset::new("empty", DatasetSchema::all(), Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.baseline_revenue(), Some(0.0));
    }
}
