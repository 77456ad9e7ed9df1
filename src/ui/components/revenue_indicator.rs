use dioxus::prelude::*;

use crate::domain::{RevenueIndicator as IndicatorState, RevenueIndicatorStatus};
use crate::util::format;

#[component]
pub fn RevenueIndicator(indicator: IndicatorState) -> Element {
    let (label, theme) = match indicator.status {
        RevenueIndicatorStatus::Gain => ("Revenue up", "indicator indicator--gain"),
        RevenueIndicatorStatus::Flat => ("About flat", "indicator indicator--flat"),
        RevenueIndicatorStatus::Loss => ("Revenue down", "indicator indicator--loss"),
    };
    let delta_display = format::signed_pct(indicator.delta_pct);

    rsx! {
        div {
            class: "{theme}",
            div {
                class: "indicator-header",
                span { "Outlook" }
                span { "{label}" }
            }
            p { class: "indicator-value", "{delta_display}" }
            p { class: "indicator-rationale", "{indicator.rationale}" }
        }
    }
}
