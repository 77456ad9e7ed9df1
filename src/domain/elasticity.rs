//! Constant-elasticity revenue model.
//!
//! All price changes are percentages: `10.0` means a ten percent price increase.

use super::entities::{
    CurvePoint, ElasticityParameters, Projection, MAX_PRICE_CHANGE_PCT, MIN_PRICE_CHANGE_PCT,
};

/// Curve resolution used until the user configures another one.
pub const DEFAULT_CURVE_POINTS: usize = 50;

/// Projects revenue after a uniform price change.
pub fn project(baseline_revenue: f64, price_change_pct: f64, elasticity: f64) -> Projection {
    let demand_impact_pct = price_change_pct * elasticity / 100.0;
    let projected_revenue =
        baseline_revenue * (1.0 + price_change_pct / 100.0) * (1.0 + demand_impact_pct);

    Projection {
        baseline_revenue,
        price_change_pct,
        demand_impact_pct,
        projected_revenue,
        revenue_delta: projected_revenue - baseline_revenue,
    }
}

/// The price change presented as the revenue sweet spot, rounded to two decimals
/// and kept inside the slider range.
pub fn optimal_price_change_pct(elasticity: f64) -> f64 {
    let raw = -50.0 * (1.0 + elasticity) / elasticity;
    round2(raw).clamp(MIN_PRICE_CHANGE_PCT, MAX_PRICE_CHANGE_PCT)
}

/// Unrounded vertex of the revenue parabola.
///
/// Revenue is `B * (1 + p/100) * (1 + p*e/100)`, a quadratic in `p` with leading
/// coefficient `B*e/10_000`. It only has a maximum when `e < 0`.
pub fn analytic_optimum(elasticity: f64) -> Option<f64> {
    if elasticity.is_nan() || elasticity >= 0.0 {
        return None;
    }
    let a = elasticity / 10_000.0;
    let b = (1.0 + elasticity) / 100.0;
    Some(-b / (2.0 * a))
}

/// Best point of an already sampled curve.
pub fn grid_search_optimum(curve: &[CurvePoint]) -> Option<CurvePoint> {
    curve
        .iter()
        .copied()
        .filter(|point| point.projected_revenue.is_finite())
        .fold(None, |best: Option<CurvePoint>, point| match best {
            Some(current) if current.projected_revenue >= point.projected_revenue => Some(current),
            _ => Some(point),
        })
}

/// `n_points` evenly spaced values over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n_points: usize) -> Vec<f64> {
    match n_points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|idx| {
                    if idx == n - 1 {
                        end
                    } else {
                        start + step * idx as f64
                    }
                })
                .collect()
        }
    }
}

pub fn sample_curve(
    baseline_revenue: f64,
    elasticity: f64,
    n_points: usize,
    domain: (f64, f64),
) -> Vec<CurvePoint> {
    linspace(domain.0, domain.1, n_points)
        .into_iter()
        .map(|price_change_pct| CurvePoint {
            price_change_pct,
            projected_revenue: project(baseline_revenue, price_change_pct, elasticity)
                .projected_revenue,
        })
        .collect()
}

/// Samples the curve over the slider range.
pub fn sample_slider_curve(
    baseline_revenue: f64,
    params: &ElasticityParameters,
    n_points: usize,
) -> Vec<CurvePoint> {
    sample_curve(
        baseline_revenue,
        params.elasticity,
        n_points,
        (MIN_PRICE_CHANGE_PCT, MAX_PRICE_CHANGE_PCT),
    )
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevenueIndicator {
    pub status: RevenueIndicatorStatus,
    pub delta_pct: f64,
    pub rationale: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevenueIndicatorStatus {
    Gain,
    Flat,
    Loss,
}

/// Classifies a projection; changes within half a percent of baseline count as flat.
pub fn revenue_indicator(projection: &Projection) -> RevenueIndicator {
    const FLAT_BAND_PCT: f64 = 0.5;

    if projection.baseline_revenue <= 0.0 {
        return RevenueIndicator {
            status: RevenueIndicatorStatus::Flat,
            delta_pct: 0.0,
            rationale: "No baseline revenue to compare against".to_string(),
        };
    }

    let delta_pct = projection.revenue_delta / projection.baseline_revenue * 100.0;
    let status = if delta_pct > FLAT_BAND_PCT {
        RevenueIndicatorStatus::Gain
    } else if delta_pct < -FLAT_BAND_PCT {
        RevenueIndicatorStatus::Loss
    } else {
        RevenueIndicatorStatus::Flat
    };

    let rationale = format!(
        "Price {:+.1}% x demand {:+.1}%",
        projection.price_change_pct,
        projection.demand_impact_pct * 100.0
    );

    RevenueIndicator {
        status,
        delta_pct,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: f64 = -1.6;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_change_keeps_baseline() {
        for baseline in [0.0, 1.0, 1234.56, 1e9] {
            let p = project(baseline, 0.0, E);
            assert_eq!(p.projected_revenue, baseline);
            assert_eq!(p.revenue_delta, 0.0);
            assert_eq!(p.demand_impact_pct, 0.0);
        }
    }

    #[test]
    fn ten_percent_increase_at_retail_elasticity() {
        let p = project(1000.0, 10.0, E);
        assert!(close(p.demand_impact_pct, -0.16));
        assert!(close(p.projected_revenue, 1000.0 * 1.10 * 0.84));
        assert!(close(p.projected_revenue, 924.0));
        assert!(close(p.revenue_delta, -76.0));
    }

    #[test]
    fn price_cut_raises_revenue_for_elastic_demand() {
        let p = project(1000.0, -10.0, E);
        assert!(close(p.projected_revenue, 1000.0 * 0.9 * 1.16));
        assert!(p.revenue_delta > 0.0);
    }

    #[test]
    fn optimum_matches_closed_form() {
        assert_eq!(optimal_price_change_pct(E), -18.75);
        let expected = round2(-50.0 * (1.0 + E) / E);
        assert_eq!(optimal_price_change_pct(E), expected);
    }

    #[test]
    fn optimum_is_clamped_to_slider_range() {
        // -0.5 would put the sweet spot at +50%; -0.4 pushes it to +75%.
        assert_eq!(optimal_price_change_pct(-0.5), 50.0);
        assert_eq!(optimal_price_change_pct(-0.4), 50.0);
    }

    #[test]
    fn analytic_optimum_requires_negative_elasticity() {
        assert!(analytic_optimum(0.0).is_none());
        assert!(analytic_optimum(0.3).is_none());
        let vertex = analytic_optimum(E).unwrap();
        assert!(close(vertex, -18.75));
    }

    #[test]
    fn analytic_optimum_is_a_maximum() {
        let vertex = analytic_optimum(E).unwrap();
        let at = |pct: f64| project(500.0, pct, E).projected_revenue;
        assert!(at(vertex) > at(vertex - 1.0));
        assert!(at(vertex) > at(vertex + 1.0));
    }

    #[test]
    fn curve_has_requested_resolution_and_endpoints() {
        let curve = sample_curve(1000.0, E, 20, (-50.0, 50.0));
        assert_eq!(curve.len(), 20);
        assert_eq!(curve.first().unwrap().price_change_pct, -50.0);
        assert_eq!(curve.last().unwrap().price_change_pct, 50.0);
        assert!(curve
            .windows(2)
            .all(|pair| pair[0].price_change_pct < pair[1].price_change_pct));
    }

    #[test]
    fn curve_points_agree_with_projection() {
        let curve = sample_curve(750.0, E, 11, (-50.0, 50.0));
        for point in &curve {
            let expected = project(750.0, point.price_change_pct, E).projected_revenue;
            assert_eq!(point.projected_revenue, expected);
        }
        assert!(close(curve[5].price_change_pct, 0.0));
    }

    #[test]
    fn degenerate_resolutions() {
        assert!(linspace(-50.0, 50.0, 0).is_empty());
        assert_eq!(linspace(-50.0, 50.0, 1), vec![-50.0]);
        assert_eq!(linspace(-50.0, 50.0, 2), vec![-50.0, 50.0]);
    }

    #[test]
    fn grid_search_lands_next_to_closed_form() {
        let curve = sample_slider_curve(1000.0, &ElasticityParameters::RETAIL_DEFAULT, 201);
        let best = grid_search_optimum(&curve).unwrap();
        // Grid spacing is 0.5 points.
        assert!((best.price_change_pct - optimal_price_change_pct(E)).abs() <= 0.25);
    }

    #[test]
    fn grid_search_on_empty_curve() {
        assert!(grid_search_optimum(&[]).is_none());
    }

    #[test]
    fn indicator_classifies_direction() {
        let loss = revenue_indicator(&project(1000.0, 10.0, E));
        assert_eq!(loss.status, RevenueIndicatorStatus::Loss);
        assert!(close(loss.delta_pct, -7.6));

        let gain = revenue_indicator(&project(1000.0, -18.75, E));
        assert_eq!(gain.status, RevenueIndicatorStatus::Gain);

        let flat = revenue_indicator(&project(1000.0, 0.0, E));
        assert_eq!(flat.status, RevenueIndicatorStatus::Flat);

        let empty = revenue_indicator(&project(0.0, 10.0, E));
        assert_eq!(empty.status, RevenueIndicatorStatus::Flat);
    }
}
