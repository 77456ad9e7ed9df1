use dioxus::prelude::*;

use crate::{
    app::activate_source,
    domain::{
        revenue_indicator, AppState, CurvePoint, DashboardSnapshot, DataSource, DatasetStatus,
        MAX_PRICE_CHANGE_PCT, MIN_PRICE_CHANGE_PCT,
    },
    infra::cache::DatasetCache,
    ui::components::{
        kpi_card::KpiCard,
        markdown_box_plot::MarkdownBoxPlot,
        revenue_chart::RevenueChart,
        revenue_indicator::RevenueIndicator,
        source_picker::SourcePicker,
        toast::{push_toast, ToastKind, ToastMessage},
    },
    util::format,
};

const SLIDER_STEP: f64 = 0.5;

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let cache = use_context::<Signal<DatasetCache>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let (current_source, default_source, status, snapshot) = state.with(|st| {
        (
            st.source.clone(),
            DataSource::default_for(st.settings.dataset_path.as_ref()),
            st.dataset.clone(),
            st.snapshot(),
        )
    });
    let price_change = state.with(|st| st.simulation.price_change_pct());

    let on_select_source = move |source: DataSource| {
        activate_source(state, cache, toasts, source);
    };

    let on_slider = move |evt: FormEvent| {
        let mut state = state;
        if let Ok(value) = evt.value().parse::<f64>() {
            state.with_mut(|st| st.simulation.set(value));
        }
    };

    let on_optimum = move |_| {
        let mut state = state;
        let optimum = state.with_mut(|st| {
            let params = st.params;
            st.simulation.set_to_optimum(&params);
            st.simulation.price_change_pct()
        });
        push_toast(
            toasts,
            ToastKind::Success,
            format!("Price change set to the sweet spot ({}).", format::optimum_pct(optimum)),
        );
    };

    let on_reset = move |_| {
        let mut state = state;
        state.with_mut(|st| st.simulation.set(0.0));
    };

    let dataset_info = status.dataset().map(|dataset| {
        (
            dataset.label.clone(),
            dataset.len(),
            format::loaded_at(dataset.loaded_at),
            dataset.schema.missing_columns().join(", "),
        )
    });

    rsx! {
        div { class: "dashboard",
            aside { class: "sidebar",
                SourcePicker {
                    current: current_source,
                    default_source,
                    on_select: on_select_source,
                }
                div { class: "sidebar-section",
                    label { class: "field-label", "Price adjustment" }
                    input {
                        class: "slider",
                        r#type: "range",
                        min: "{MIN_PRICE_CHANGE_PCT}",
                        max: "{MAX_PRICE_CHANGE_PCT}",
                        step: "{SLIDER_STEP}",
                        value: "{price_change}",
                        oninput: on_slider,
                    }
                    p { class: "slider-value", {format::signed_pct(price_change)} }
                    div { class: "button-row",
                        button { class: "button button--primary", onclick: on_optimum, "Set to sweet spot" }
                        button { class: "button", onclick: on_reset, "Reset" }
                    }
                }
                if let Some((label, rows, loaded, missing)) = dataset_info {
                    div { class: "sidebar-section sidebar-meta",
                        p { "{label}" }
                        p { "{rows} rows, loaded {loaded}" }
                        if !missing.is_empty() {
                            p { class: "field-hint", "Missing columns: {missing}" }
                        }
                    }
                }
            }
            div { class: "dashboard-main",
                match (status, snapshot) {
                    (DatasetStatus::Failed { label, message }, _) => rsx! {
                        div { class: "panel panel--error",
                            h2 { class: "panel-title", "Could not load {label}" }
                            p { "{message}" }
                            p { class: "field-hint", "Pick another dataset or upload a corrected file." }
                        }
                    },
                    (_, Some(snapshot)) => rsx! { SnapshotView { snapshot } },
                    _ => rsx! {
                        div { class: "panel", "Loading dataset..." }
                    },
                }
            }
        }
    }
}

#[component]
fn SnapshotView(snapshot: DashboardSnapshot) -> Element {
    let projection = snapshot.projection;
    let indicator = projection.as_ref().map(revenue_indicator);
    let current_point = projection.map(|p| CurvePoint {
        price_change_pct: p.price_change_pct,
        projected_revenue: p.projected_revenue,
    });
    let best_sampled_text = snapshot.best_sampled_point.map(|p| {
        format!(
            "Best sampled point on this curve: {} for {}",
            format::signed_pct(p.price_change_pct),
            format::currency(p.projected_revenue)
        )
    });

    let baseline_display = snapshot
        .baseline_revenue
        .map(format::currency)
        .unwrap_or_else(|| "Unavailable".to_string());
    let (projected_display, projected_desc) = match projection {
        Some(p) => (
            format::currency(p.projected_revenue),
            Some(format!("{} vs. baseline", format::signed_currency(p.revenue_delta))),
        ),
        None => ("Unavailable".to_string(), Some("Needs a current_price column".to_string())),
    };
    let demand_display = projection
        .map(|p| format::signed_pct(p.demand_impact_pct * 100.0))
        .unwrap_or_else(|| "Unavailable".to_string());

    rsx! {
        section { class: "kpi-grid",
            KpiCard {
                title: "Baseline Revenue".to_string(),
                value: baseline_display,
                description: Some(format!("Sum of current_price over {} rows", snapshot.record_count)),
                muted: snapshot.baseline_revenue.is_none(),
            }
            KpiCard {
                title: "Projected Revenue".to_string(),
                value: projected_display,
                description: projected_desc,
                muted: projection.is_none(),
            }
            KpiCard {
                title: "Demand Impact".to_string(),
                value: demand_display,
                description: Some(format!("At {} price change", format::signed_pct(snapshot.price_change_pct))),
                muted: projection.is_none(),
            }
            KpiCard {
                title: "Revenue Sweet Spot".to_string(),
                value: format::optimum_pct(snapshot.optimal_price_change_pct),
                description: Some("Price change that maximises projected revenue".to_string()),
            }
        }

        if let Some(indicator) = indicator {
            RevenueIndicator { indicator }
        }

        section { class: "panel",
            h2 { class: "panel-title", "Revenue curve" }
            p { class: "panel-subtitle", "Projected revenue across the full -50% to +50% price range. The dashed line marks the sweet spot." }
            if snapshot.baseline_revenue.is_some() {
                RevenueChart {
                    curve: snapshot.curve_points.clone(),
                    current: current_point,
                    optimum_pct: snapshot.optimal_price_change_pct,
                    best_sampled: snapshot.best_sampled_point,
                }
                if let Some(text) = best_sampled_text {
                    p { class: "field-hint", "{text}" }
                }
            } else {
                div { class: "chart-empty", "Revenue metrics unavailable: the dataset has no current_price column." }
            }
        }

        section { class: "panel",
            h2 { class: "panel-title", "Return logistics" }
            p { class: "panel-subtitle",
                "Deep markdowns lift volume but tend to attract impulse buyers who return more often. "
                "A price strategy has to balance volume against returns to protect real profit."
            }
            match snapshot.return_rate {
                Some(rate) => rsx! {
                    p { class: "insight", {format!("Overall return rate is {}.", format::ratio_pct(rate))} }
                    match snapshot.markdown_breakdown.clone() {
                        Some(boxes) => rsx! {
                            h3 { class: "panel-subtitle", "How markdowns relate to returns by category" }
                            MarkdownBoxPlot { boxes }
                        },
                        None => rsx! {
                            p { class: "field-hint", "Add a markdown_percentage column to compare markdown depth by category." }
                        },
                    }
                },
                None => rsx! {
                    p { class: "field-hint", "Return analysis skipped: the dataset has no is_returned column or no rows." }
                },
            }
        }
    }
}
