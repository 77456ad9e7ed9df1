use dioxus::prelude::*;

use crate::domain::MarkdownBox;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 280.0;
const PAD_LEFT: f64 = 44.0;
const PAD_RIGHT: f64 = 12.0;
const PAD_TOP: f64 = 12.0;
const PAD_BOTTOM: f64 = 48.0;

#[derive(Clone, Debug, PartialEq)]
struct BoxView {
    center_x: f64,
    box_left: f64,
    box_right: f64,
    box_width: f64,
    whisker_top: f64,
    whisker_bottom: f64,
    box_top: f64,
    box_height: f64,
    median_y: f64,
    class: &'static str,
    label: String,
    tooltip: String,
}

fn y_for(markdown: f64, ceiling: f64) -> f64 {
    let t = (markdown / ceiling).clamp(0.0, 1.0);
    HEIGHT - PAD_BOTTOM - t * (HEIGHT - PAD_TOP - PAD_BOTTOM)
}

/// Markdown axis runs from 0 to at least 100%.
fn ceiling(boxes: &[MarkdownBox]) -> f64 {
    boxes.iter().map(|b| b.max).fold(100.0, f64::max)
}

fn layout(boxes: &[MarkdownBox]) -> Vec<BoxView> {
    let ceiling = ceiling(boxes);
    let slot = (WIDTH - PAD_LEFT - PAD_RIGHT) / boxes.len().max(1) as f64;
    boxes
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            let box_top = y_for(group.q3, ceiling);
            let center_x = PAD_LEFT + slot * (idx as f64 + 0.5);
            let half_width = (slot * 0.3).min(28.0);
            BoxView {
                center_x,
                box_left: center_x - half_width,
                box_right: center_x + half_width,
                box_width: half_width * 2.0,
                whisker_top: y_for(group.max, ceiling),
                whisker_bottom: y_for(group.min, ceiling),
                box_top,
                box_height: (y_for(group.q1, ceiling) - box_top).max(1.0),
                median_y: y_for(group.median, ceiling),
                class: if group.is_returned {
                    "box box--returned"
                } else {
                    "box box--kept"
                },
                label: group.category.clone(),
                tooltip: format!(
                    "{} ({}): n={}, median {:.1}%",
                    group.category,
                    if group.is_returned { "returned" } else { "kept" },
                    group.count,
                    group.median
                ),
            }
        })
        .collect()
}

#[component]
pub fn MarkdownBoxPlot(boxes: Vec<MarkdownBox>) -> Element {
    if boxes.is_empty() {
        return rsx! {
            div { class: "chart-empty", "No markdown values to compare." }
        };
    }

    let ceiling = ceiling(&boxes);
    let views = layout(&boxes);
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let axis_y = HEIGHT - PAD_BOTTOM;
    let axis_right = WIDTH - PAD_RIGHT;
    let label_y = HEIGHT - PAD_BOTTOM + 18.0;
    let top_y = y_for(ceiling, ceiling);
    let ceiling_label = format!("{ceiling:.0}%");

    rsx! {
        svg {
            class: "box-plot",
            view_box: "{view_box}",
            line { class: "chart-axis", x1: "{PAD_LEFT}", y1: "{axis_y}", x2: "{axis_right}", y2: "{axis_y}" }
            text { class: "chart-label", x: "{PAD_LEFT}", y: "{top_y}", text_anchor: "end", "{ceiling_label}" }
            text { class: "chart-label", x: "{PAD_LEFT}", y: "{axis_y}", text_anchor: "end", "0%" }
            for view in views {
                g {
                    class: view.class,
                    title { "{view.tooltip}" }
                    line {
                        class: "box-whisker",
                        x1: "{view.center_x}",
                        y1: "{view.whisker_top}",
                        x2: "{view.center_x}",
                        y2: "{view.whisker_bottom}",
                    }
                    rect {
                        class: "box-body",
                        x: "{view.box_left}",
                        y: "{view.box_top}",
                        width: "{view.box_width}",
                        height: "{view.box_height}",
                    }
                    line {
                        class: "box-median",
                        x1: "{view.box_left}",
                        y1: "{view.median_y}",
                        x2: "{view.box_right}",
                        y2: "{view.median_y}",
                    }
                    text {
                        class: "chart-label",
                        x: "{view.center_x}",
                        y: "{label_y}",
                        text_anchor: "middle",
                        "{view.label}"
                    }
                }
            }
        }
        div { class: "legend",
            span { class: "legend-swatch legend-swatch--kept" }
            span { "Kept" }
            span { class: "legend-swatch legend-swatch--returned" }
            span { "Returned" }
        }
    }
}
