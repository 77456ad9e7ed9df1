use dioxus::prelude::*;

use crate::domain::{CurvePoint, MAX_PRICE_CHANGE_PCT, MIN_PRICE_CHANGE_PCT};
use crate::util::format;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 260.0;
const PAD_LEFT: f64 = 84.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 32.0;
const X_TICKS: [f64; 5] = [-50.0, -25.0, 0.0, 25.0, 50.0];

/// Maps price change / revenue pairs onto the SVG viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ChartScale {
    min_revenue: f64,
    max_revenue: f64,
}

impl ChartScale {
    fn fit(curve: &[CurvePoint]) -> Option<Self> {
        let (min, max) = curve
            .iter()
            .map(|p| p.projected_revenue)
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })?;
        let span = if max > min { max - min } else { max.abs().max(1.0) };
        let margin = span * 0.05;
        Some(Self {
            min_revenue: min - margin,
            max_revenue: max + margin,
        })
    }

    fn x(&self, pct: f64) -> f64 {
        let t = (pct - MIN_PRICE_CHANGE_PCT) / (MAX_PRICE_CHANGE_PCT - MIN_PRICE_CHANGE_PCT);
        PAD_LEFT + t * (WIDTH - PAD_LEFT - PAD_RIGHT)
    }

    fn y(&self, revenue: f64) -> f64 {
        let t = (revenue - self.min_revenue) / (self.max_revenue - self.min_revenue);
        HEIGHT - PAD_BOTTOM - t * (HEIGHT - PAD_TOP - PAD_BOTTOM)
    }

    fn polyline(&self, curve: &[CurvePoint]) -> String {
        curve
            .iter()
            .map(|p| format!("{:.1},{:.1}", self.x(p.price_change_pct), self.y(p.projected_revenue)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[component]
pub fn RevenueChart(
    curve: Vec<CurvePoint>,
    current: Option<CurvePoint>,
    optimum_pct: f64,
    best_sampled: Option<CurvePoint>,
) -> Element {
    let Some(scale) = ChartScale::fit(&curve) else {
        return rsx! {
            div { class: "chart-empty", "No revenue curve to plot for this dataset." }
        };
    };

    let points = scale.polyline(&curve);
    let optimum_x = scale.x(optimum_pct);
    let axis_left = PAD_LEFT;
    let axis_right = WIDTH - PAD_RIGHT;
    let axis_top = PAD_TOP;
    let axis_y = HEIGHT - PAD_BOTTOM;
    let label_x = PAD_LEFT - 6.0;
    let top_label_y = PAD_TOP + 4.0;
    let tick_y = HEIGHT - 10.0;
    let top_label = format::currency(scale.max_revenue);
    let bottom_label = format::currency(scale.min_revenue);
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let ticks: Vec<(f64, String)> = X_TICKS
        .iter()
        .map(|tick| (scale.x(*tick), format!("{tick:+.0}%")))
        .collect();
    let best_marker = best_sampled.map(|p| (scale.x(p.price_change_pct), scale.y(p.projected_revenue)));
    let current_marker = current.map(|p| (scale.x(p.price_change_pct), scale.y(p.projected_revenue)));

    rsx! {
        svg {
            class: "revenue-chart",
            view_box: "{view_box}",
            line { class: "chart-axis", x1: "{axis_left}", y1: "{axis_y}", x2: "{axis_right}", y2: "{axis_y}" }
            line { class: "chart-axis", x1: "{axis_left}", y1: "{axis_top}", x2: "{axis_left}", y2: "{axis_y}" }
            text { class: "chart-label", x: "{label_x}", y: "{top_label_y}", text_anchor: "end", "{top_label}" }
            text { class: "chart-label", x: "{label_x}", y: "{axis_y}", text_anchor: "end", "{bottom_label}" }
            for (tick_x, tick_label) in ticks {
                text {
                    class: "chart-label",
                    x: "{tick_x}",
                    y: "{tick_y}",
                    text_anchor: "middle",
                    "{tick_label}"
                }
            }
            line {
                class: "chart-optimum",
                x1: "{optimum_x}",
                y1: "{axis_top}",
                x2: "{optimum_x}",
                y2: "{axis_y}",
            }
            polyline { class: "chart-curve", points: "{points}" }
            if let Some((cx, cy)) = best_marker {
                circle { class: "chart-best", cx: "{cx}", cy: "{cy}", r: "4" }
            }
            if let Some((cx, cy)) = current_marker {
                circle { class: "chart-current", cx: "{cx}", cy: "{cy}", r: "6" }
            }
        }
    }
}
