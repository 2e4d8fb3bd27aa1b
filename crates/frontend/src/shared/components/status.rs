//! Loading / error / empty placeholders shared by pages and widgets.

use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn LoadingBlock(#[prop(optional)] label: &'static str) -> impl IntoView {
    let label = if label.is_empty() { "Cargando..." } else { label };
    view! {
        <div class="state-block state-block--loading">
            <Spinner />
            <span>{label}</span>
        </div>
    }
}

#[component]
pub fn ErrorBlock(
    #[prop(into)] message: String,
    /// Shows a retry button when set
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="alert alert--error">
            {icon("alert")}
            <span>{message}</span>
            {on_retry.map(|retry| view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| retry.run(())>
                    "Reintentar"
                </Button>
            })}
        </div>
    }
}

#[component]
pub fn EmptyBlock(label: &'static str) -> impl IntoView {
    view! { <div class="state-block state-block--empty">{label}</div> }
}
