/// Lower bound of the price-adjustment slider, in percent.
pub const MIN_PRICE_CHANGE_PCT: f64 = -50.0;
/// Upper bound of the price-adjustment slider, in percent.
pub const MAX_PRICE_CHANGE_PCT: f64 = 50.0;

/// One row of the sales dataset.
///
/// Optional fields are `None` when the column is missing from the source or the
/// cell is blank. `is_returned` is already cleaned: missing values read as `false`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SalesRecord {
    pub current_price: Option<f64>,
    pub markdown_percentage: Option<f64>,
    pub is_returned: bool,
    pub category: Option<String>,
}

/// Which of the known columns the loaded source actually carried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatasetSchema {
    pub current_price: bool,
    pub markdown_percentage: bool,
    pub is_returned: bool,
    pub category: bool,
}

impl DatasetSchema {
    pub fn all() -> Self {
        Self {
            current_price: true,
            markdown_percentage: true,
            is_returned: true,
            category: true,
        }
    }

    pub fn supports_revenue(&self) -> bool {
        self.current_price
    }

    pub fn supports_returns(&self) -> bool {
        self.is_returned
    }

    pub fn supports_markdown_breakdown(&self) -> bool {
        self.is_returned && self.markdown_percentage
    }

    /// Column names the dashboard expected but did not find.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.current_price {
            missing.push("current_price");
        }
        if !self.markdown_percentage {
            missing.push("markdown_percentage");
        }
        if !self.is_returned {
            missing.push("is_returned");
        }
        if !self.category {
            missing.push("category");
        }
        missing
    }
}

/// Constant-elasticity demand parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElasticityParameters {
    /// A 1% price increase moves demand by `elasticity` percent.
    pub elasticity: f64,
}

impl ElasticityParameters {
    pub const RETAIL_DEFAULT: ElasticityParameters = ElasticityParameters { elasticity: -1.6 };
}

impl Default for ElasticityParameters {
    fn default() -> Self {
        Self::RETAIL_DEFAULT
    }
}

/// Result of projecting a price change through the elasticity model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub baseline_revenue: f64,
    pub price_change_pct: f64,
    /// Demand shift as a fraction (-0.16 means sixteen percent fewer units).
    pub demand_impact_pct: f64,
    pub projected_revenue: f64,
    pub revenue_delta: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub price_change_pct: f64,
    pub projected_revenue: f64,
}

/// Five-number summary of markdown depth for one category / return flag pair.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkdownBox {
    pub category: String,
    pub is_returned: bool,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}
