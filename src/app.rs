use dioxus::{prelude::*, signals::Signal};
use tracing::{error, info, warn};

use crate::{
    domain::{AppState, DataSource, DatasetStatus},
    infra::cache::DatasetCache,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{DashboardPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_settings, save_settings},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Dashboard {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state);

    let cache = use_signal(DatasetCache::default);
    use_context_provider(|| cache);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_hook(move || {
        let mut state = state;
        if let Some(saved) = load_settings() {
            info!(curve_points = saved.curve_points, "restored dashboard settings");
            state.with_mut(|st| st.apply_persisted(saved));
        }
        let source = state.with(|st| st.source.clone());
        activate_source(state, cache, toasts, source);
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Loads `source` through the cache and makes it the active dataset.
///
/// A failed load leaves the dashboard in the failed state; the previous dataset is
/// not kept and the default is not substituted.
pub fn activate_source(
    mut state: Signal<AppState>,
    mut cache: Signal<DatasetCache>,
    toasts: Signal<Vec<ToastMessage>>,
    source: DataSource,
) {
    let label = source.label();
    let result = cache.with_mut(|cache| cache.load(&source));

    match result {
        Ok(dataset) => {
            let missing_price = !dataset.schema.supports_revenue();
            let missing_returns = !dataset.schema.supports_returns();
            state.with_mut(|st| {
                st.source = source;
                st.dataset = DatasetStatus::Loaded(dataset);
            });
            if missing_price {
                warn!(source = %label, "dataset has no current_price column");
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    format!("{label} has no current_price column; revenue metrics are unavailable."),
                );
            } else if missing_returns {
                push_toast(
                    toasts,
                    ToastKind::Info,
                    format!("{label} has no is_returned column; return analysis is skipped."),
                );
            }
        }
        Err(err) => {
            error!(source = %label, "failed to load dataset: {err}");
            let message = err.to_string();
            state.with_mut(|st| {
                st.source = source;
                st.dataset = DatasetStatus::Failed {
                    label: label.clone(),
                    message: message.clone(),
                };
            });
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Could not load {label}: {message}"),
            );
        }
    }
}

pub fn persist_settings(state: &Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_settings(&snapshot) {
        warn!("failed to persist settings: {err}");
        push_toast(toasts, ToastKind::Warning, format!("Settings not saved: {err}"));
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
