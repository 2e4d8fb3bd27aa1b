//! Session gate: the admin shell when a token is present, otherwise a notice
//! pointing back to the POS sign-in.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::keys;
use crate::layout::Shell;
use crate::shared::icons::icon;
use crate::system::session::use_session;
use leptos::prelude::*;

/// Main layout. Restores the active tab from the URL, or opens the default
/// page for the user's role.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let session = use_session();

    tabs_store.init_router_integration();

    if tabs_store.active.get_untracked().is_none() {
        let seller = session
            .user
            .with_untracked(|u| u.as_ref().map(|u| u.is_seller()).unwrap_or(true));
        let key = if seller { keys::INVENTORY } else { keys::OPERATIONS };
        tabs_store.open_tab(key, crate::layout::tabs::tab_label_for_key(key));
    }

    view! { <Shell /> }
}

#[component]
fn SessionMissing() -> impl IntoView {
    view! {
        <div class="session-missing">
            {icon("user")}
            <h2>"Sesión no válida"</h2>
            <p>"Inicie sesión desde el punto de venta para acceder al panel."</p>
        </div>
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <SessionMissing /> }
        >
            <MainLayout />
        </Show>
    }
}
