use super::{
    dataset::Dataset,
    elasticity::{
        grid_search_optimum, optimal_price_change_pct, project, sample_slider_curve,
    },
    entities::{
        CurvePoint, ElasticityParameters, MarkdownBox, Projection, MAX_PRICE_CHANGE_PCT,
        MIN_PRICE_CHANGE_PCT,
    },
    returns::{markdown_return_breakdown, return_rate},
};

/// The selected price adjustment, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationState {
    price_change_pct: f64,
}

impl SimulationState {
    pub fn price_change_pct(&self) -> f64 {
        self.price_change_pct
    }

    /// Stores `value` clamped to the slider range. Non-finite input is ignored.
    pub fn set(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.price_change_pct = value.clamp(MIN_PRICE_CHANGE_PCT, MAX_PRICE_CHANGE_PCT);
    }

    pub fn set_to_optimum(&mut self, params: &ElasticityParameters) {
        self.set(optimal_price_change_pct(params.elasticity));
    }
}

/// Everything the dashboard renders for one interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSnapshot {
    pub record_count: usize,
    pub baseline_revenue: Option<f64>,
    pub price_change_pct: f64,
    pub projection: Option<Projection>,
    pub optimal_price_change_pct: f64,
    pub return_rate: Option<f64>,
    pub curve_points: Vec<CurvePoint>,
    pub best_sampled_point: Option<CurvePoint>,
    pub markdown_breakdown: Option<Vec<MarkdownBox>>,
}

impl DashboardSnapshot {
    pub fn compute(
        dataset: &Dataset,
        simulation: &SimulationState,
        params: &ElasticityParameters,
        curve_points: usize,
    ) -> Self {
        let price_change_pct = simulation.price_change_pct();
        let baseline_revenue = dataset.baseline_revenue();
        let projection =
            baseline_revenue.map(|baseline| project(baseline, price_change_pct, params.elasticity));
        let curve = baseline_revenue
            .map(|baseline| sample_slider_curve(baseline, params, curve_points))
            .unwrap_or_default();

        Self {
            record_count: dataset.len(),
            baseline_revenue,
            price_change_pct,
            projection,
            optimal_price_change_pct: optimal_price_change_pct(params.elasticity),
            return_rate: return_rate(dataset),
            best_sampled_point: grid_search_optimum(&curve),
            curve_points: curve,
            markdown_breakdown: markdown_return_breakdown(dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DatasetSchema, SalesRecord};

    fn dataset(schema: DatasetSchema) -> Dataset {
        let records = (0..10)
            .map(|idx| SalesRecord {
                current_price: Some(100.0),
                markdown_percentage: Some(idx as f64 * 5.0),
                is_returned: idx % 5 == 0,
                category: Some("Apparel".to_string()),
            })
            .collect();
        Dataset::new("fixture", schema, records)
    }

    #[test]
    fn state_clamps_and_ignores_non_finite() {
        let mut state = SimulationState::default();
        assert_eq!(state.price_change_pct(), 0.0);

        state.set(12.5);
        assert_eq!(state.price_change_pct(), 12.5);
        state.set(80.0);
        assert_eq!(state.price_change_pct(), 50.0);
        state.set(-120.0);
        assert_eq!(state.price_change_pct(), -50.0);
        state.set(f64::NAN);
        assert_eq!(state.price_change_pct(), -50.0);
        state.set(f64::INFINITY);
        assert_eq!(state.price_change_pct(), -50.0);
    }

    #[test]
    fn state_jumps_to_optimum() {
        let mut state = SimulationState::default();
        state.set_to_optimum(&ElasticityParameters::RETAIL_DEFAULT);
        assert_eq!(state.price_change_pct(), -18.75);
    }

    #[test]
    fn snapshot_with_full_schema() {
        let mut state = SimulationState::default();
        state.set(10.0);
        let snapshot = DashboardSnapshot::compute(
            &dataset(DatasetSchema::all()),
            &state,
            &ElasticityParameters::RETAIL_DEFAULT,
            20,
        );

        assert_eq!(snapshot.record_count, 10);
        assert_eq!(snapshot.baseline_revenue, Some(1000.0));
        let projection = snapshot.projection.unwrap();
        assert!((projection.projected_revenue - 924.0).abs() < 1e-9);
        assert_eq!(snapshot.optimal_price_change_pct, -18.75);
        assert_eq!(snapshot.curve_points.len(), 20);
        assert!(snapshot.best_sampled_point.is_some());
        assert!((snapshot.return_rate.unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(snapshot.markdown_breakdown.unwrap().len(), 2);
    }

    #[test]
    fn snapshot_without_price_column_keeps_other_metrics() {
        let schema = DatasetSchema {
            current_price: false,
            ..DatasetSchema::all()
        };
        let snapshot = DashboardSnapshot::compute(
            &dataset(schema),
            &SimulationState::default(),
            &ElasticityParameters::RETAIL_DEFAULT,
            20,
        );

        assert!(snapshot.baseline_revenue.is_none());
        assert!(snapshot.projection.is_none());
        assert!(snapshot.curve_points.is_empty());
        assert!(snapshot.best_sampled_point.is_none());
        assert!(snapshot.return_rate.is_some());
        assert_eq!(snapshot.optimal_price_change_pct, -18.75);
    }
}
