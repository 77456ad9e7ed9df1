use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(5);
const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast--info",
            ToastKind::Success => "toast toast--success",
            ToastKind::Warning => "toast toast--warning",
            ToastKind::Error => "toast toast--error",
        }
    }

    /// Errors stay until dismissed so a failed load is not missed.
    fn auto_dismiss(&self) -> Option<Duration> {
        match self {
            ToastKind::Error => None,
            _ => Some(TOAST_AUTO_DISMISS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

/// Appends `message`, dropping the oldest entries beyond the visible limit.
/// A message identical to the newest one is not repeated.
fn enqueue(entries: &mut Vec<ToastMessage>, message: ToastMessage) {
    let repeated = entries
        .last()
        .is_some_and(|last| last.kind == message.kind && last.text == message.text);
    if repeated {
        return;
    }
    entries.push(message);
    let overflow = entries.len().saturating_sub(MAX_VISIBLE_TOASTS);
    entries.drain(..overflow);
}

fn dismiss(entries: &mut Vec<ToastMessage>, id: &str) {
    entries.retain(|toast| toast.id != id);
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let message = ToastMessage::new(kind, message);
    toasts.with_mut(|entries| enqueue(entries, message));
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let messages = toasts();

    if messages.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        ul {
            class: "toast-stack",
            for message in messages {
                ToastCard { key: "{message.id}", message, toasts }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let timer_id = message.id.clone();
    let delay = message.kind.auto_dismiss();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts;
        let id = timer_id.clone();
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
                toasts.with_mut(|items| dismiss(items, &id));
            }
        }
    });

    let dismiss_id = message.id.clone();
    rsx! {
        li {
            class: message.kind.class(),
            p { "{message.text}" }
            button {
                class: "toast-dismiss",
                onclick: move |_| {
                    let mut toasts = toasts;
                    toasts.with_mut(|items| dismiss(items, &dismiss_id));
                },
                "Dismiss"
            }
        }
    }
}
