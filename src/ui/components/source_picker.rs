use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;

use crate::domain::{DataSource, Placeholder};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};

const DEFAULT_OPTION: &str = "default";
const UPLOAD_OPTION: &str = "upload";

fn option_value(source: &DataSource) -> &'static str {
    match source {
        DataSource::Bundled | DataSource::ConfiguredFile(_) => DEFAULT_OPTION,
        DataSource::Placeholder(placeholder) => placeholder.slug(),
        DataSource::Upload { .. } => UPLOAD_OPTION,
    }
}

/// Source for a dropdown value, `None` for the upload option which needs a file first.
fn source_for_option(value: &str, default_source: &DataSource) -> Option<DataSource> {
    match value {
        DEFAULT_OPTION => Some(default_source.clone()),
        UPLOAD_OPTION => None,
        slug => Placeholder::from_slug(slug).map(DataSource::Placeholder),
    }
}

#[component]
pub fn SourcePicker(
    current: DataSource,
    default_source: DataSource,
    on_select: EventHandler<DataSource>,
) -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut upload_mode = use_signal(|| matches!(current, DataSource::Upload { .. }));

    let selected = if upload_mode() {
        UPLOAD_OPTION
    } else {
        option_value(&current)
    };
    let default_label = default_source.label();

    let on_upload = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let name = file.name();
        match file.read_string().await {
            Ok(contents) => on_select.call(DataSource::Upload {
                name,
                contents: Arc::from(contents),
            }),
            Err(err) => {
                warn!(file = %name, "failed to read uploaded file: {err}");
                push_toast(
                    toasts,
                    ToastKind::Error,
                    format!("Could not read {name}: {err}"),
                );
            }
        }
    };

    rsx! {
        div { class: "sidebar-section",
            label { class: "field-label", "Dataset" }
            select {
                class: "field-input",
                value: "{selected}",
                onchange: move |evt: FormEvent| {
                    let value = evt.value();
                    upload_mode.set(value == UPLOAD_OPTION);
                    if let Some(source) = source_for_option(&value, &default_source) {
                        on_select.call(source);
                    }
                },
                option { value: DEFAULT_OPTION, "{default_label}" }
                for placeholder in Placeholder::ALL {
                    option { value: placeholder.slug(), {placeholder.label()} }
                }
                option { value: UPLOAD_OPTION, "Upload a CSV..." }
            }
            if upload_mode() {
                input {
                    class: "field-input",
                    r#type: "file",
                    accept: ".csv,text/csv",
                    onchange: on_upload,
                }
                p { class: "field-hint", "Needs a current_price column; is_returned, markdown_percentage and category are optional." }
            }
        }
    }
}
