use dioxus::prelude::*;
use tracing::info;

use crate::{
    app::{activate_source, persist_settings},
    domain::{AppState, DashboardSettings, DataSource, SourceKey, CURVE_POINTS_RANGE},
    infra::cache::{DatasetCache, DATASET_CACHE_CAPACITY},
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

fn path_input(settings: &DashboardSettings) -> String {
    settings
        .dataset_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default()
}

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let cache = use_context::<Signal<DatasetCache>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| st.settings.clone());
    let mut curve_points_input = use_signal(|| initial.curve_points.to_string());
    let mut dataset_path_input = use_signal(|| path_input(&initial));

    let elasticity = state.with(|st| st.params.elasticity);
    let cached = cache.with(|c| c.len());
    let range_min = *CURVE_POINTS_RANGE.start();
    let range_max = *CURVE_POINTS_RANGE.end();

    let on_apply = move |_| {
        let mut state = state;
        let parsed = DashboardSettings::parse(&curve_points_input(), &dataset_path_input());
        match parsed {
            Ok(settings) => {
                let (previous, on_default) = state.with(|st| {
                    let previous = st.settings.clone();
                    let default = DataSource::default_for(previous.dataset_path.as_ref());
                    (previous, st.source == default)
                });
                let default_changed = previous.dataset_path != settings.dataset_path;
                let new_default = DataSource::default_for(settings.dataset_path.as_ref());

                info!(
                    curve_points = settings.curve_points,
                    dataset_path = ?settings.dataset_path,
                    "applying dashboard settings"
                );
                state.with_mut(|st| st.settings = settings);
                persist_settings(&state, toasts);
                push_toast(toasts, ToastKind::Success, "Settings saved.");

                if default_changed && on_default {
                    let mut cache = cache;
                    cache.with_mut(|c| c.invalidate(&new_default.key()));
                    activate_source(state, cache, toasts, new_default);
                }
            }
            Err(err) => push_toast(toasts, ToastKind::Error, err.to_string()),
        }
    };

    let on_reset = move |_| {
        let mut state = state;
        let defaults = DashboardSettings::default();
        curve_points_input.set(defaults.curve_points.to_string());
        dataset_path_input.set(path_input(&defaults));
        let was_configured = state.with(|st| st.settings.dataset_path.is_some());
        let on_default = state.with(|st| {
            st.source == DataSource::default_for(st.settings.dataset_path.as_ref())
        });
        state.with_mut(|st| st.settings = defaults);
        persist_settings(&state, toasts);
        push_toast(toasts, ToastKind::Info, "Restored default settings.");
        if was_configured && on_default {
            activate_source(state, cache, toasts, DataSource::Bundled);
        }
    };

    let on_reload = move |_| {
        let mut cache = cache;
        let source = state.with(|st| st.source.clone());
        cache.with_mut(|c| c.invalidate(&source.key()));
        activate_source(state, cache, toasts, source);
    };

    let on_clear_cache = move |_| {
        let mut cache = cache;
        cache.with_mut(|c| c.clear());
        push_toast(
            toasts,
            ToastKind::Info,
            "Cleared cached datasets. Sources are re-read on next selection.",
        );
    };

    let configured_key = state.with(|st| {
        st.settings
            .dataset_path
            .as_ref()
            .map(|path| SourceKey::ConfiguredFile(path.clone()))
    });
    let configured_cached = configured_key
        .map(|key| cache.with(|c| c.get(&key).is_some()))
        .unwrap_or(false);

    rsx! {
        div { class: "settings",
            section { class: "panel",
                h2 { class: "panel-title", "Dashboard Settings" }
                div { class: "form-grid",
                    div {
                        label { class: "field-label", "Curve points ({range_min}-{range_max})" }
                        input {
                            class: "field-input",
                            value: curve_points_input(),
                            oninput: move |evt| curve_points_input.set(evt.value()),
                        }
                        p { class: "field-hint", "Samples drawn along the revenue curve." }
                    }
                    div {
                        label { class: "field-label", "Default dataset path" }
                        input {
                            class: "field-input",
                            placeholder: "Leave empty for the bundled sample",
                            value: dataset_path_input(),
                            oninput: move |evt| dataset_path_input.set(evt.value()),
                        }
                        p { class: "field-hint", "A .csv file loaded when \"Default dataset\" is selected." }
                    }
                }
                div { class: "button-row",
                    button { class: "button button--primary", onclick: on_apply, "Apply" }
                    button { class: "button", onclick: on_reset, "Reset Defaults" }
                }
            }

            section { class: "panel",
                h2 { class: "panel-title", "Demand Model" }
                p { "Price elasticity: {elasticity}" }
                p { class: "field-hint",
                    "A 1% price change moves demand by {elasticity}%. This retail default is fixed for every dataset."
                }
            }

            section { class: "panel",
                h2 { class: "panel-title", "Dataset Cache" }
                p { "{cached} of {DATASET_CACHE_CAPACITY} datasets cached." }
                if configured_cached {
                    p { class: "field-hint", "The configured dataset is cached; reload it after editing the file." }
                }
                div { class: "button-row",
                    button { class: "button", onclick: on_reload, "Reload Current Dataset" }
                    button { class: "button button--warning", onclick: on_clear_cache, "Clear Dataset Cache" }
                }
            }
        }
    }
}
