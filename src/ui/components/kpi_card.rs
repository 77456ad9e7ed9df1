use dioxus::prelude::*;

#[component]
pub fn KpiCard(
    title: String,
    value: String,
    description: Option<String>,
    #[props(default)] muted: bool,
) -> Element {
    let class = if muted { "kpi-card kpi-card--muted" } else { "kpi-card" };
    rsx! {
        div {
            class: "{class}",
            h3 { class: "kpi-title", "{title}" }
            p { class: "kpi-value", "{value}" }
            if let Some(desc) = description {
                p { class: "kpi-description", "{desc}" }
            }
        }
    }
}
