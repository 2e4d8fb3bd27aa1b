//! Transient notifications shown in the corner of the screen.

use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

const TOAST_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Info => "toast toast--info",
            ToastKind::Warning => "toast toast--warning",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    items: RwSignal<Vec<Toast>>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = toast.id;
        self.items.update(|items| items.push(toast));
        self.dismiss_later(id);
        id
    }

    /// A message that stays until replaced with [`ToastService::resolve`].
    pub fn loading(&self, message: impl Into<String>) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind: ToastKind::Info,
            message: message.into(),
        };
        let id = toast.id;
        self.items.update(|items| items.push(toast));
        id
    }

    /// Turns a loading message into its outcome.
    pub fn resolve(&self, id: Uuid, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        self.items.update(|items| {
            if let Some(t) = items.iter_mut().find(|t| t.id == id) {
                t.kind = kind;
                t.message = message.clone();
            } else {
                items.push(Toast { id, kind, message });
            }
        });
        self.dismiss_later(id);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }

    fn dismiss_later(&self, id: Uuid) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            svc.dismiss(id);
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || svc.items.get()
                key=|t| (t.id, t.message.clone())
                children=move |t: Toast| {
                    let id = t.id;
                    view! {
                        <div class=t.kind.class()>
                            <span class="toast__message">{t.message}</span>
                            <button class="toast__close" on:click=move |_| svc.dismiss(id)>
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
