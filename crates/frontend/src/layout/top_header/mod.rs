//! Top bar: sidebar toggle, branch name, notifications and the user menu.

pub mod notifications;
pub mod user_menu;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::get_json;
use crate::shared::icons::icon;
use crate::shared::query_cache::use_query_cache;
use crate::system::session::use_session;
use contracts::shared::query_key::QueryKey;
use contracts::system::session::{branch_info_path, BranchInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;
use notifications::NotificationsBell;
use user_menu::UserMenu;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();
    let cache = use_query_cache();

    let branch_name = RwSignal::new(String::new());

    Effect::new(move |_| {
        let Some(branch_id) = session.branch_id() else {
            return;
        };
        let _ = cache.version(&QueryKey::BranchInfo(branch_id));
        spawn_local(async move {
            match get_json::<BranchInfo>(&branch_info_path(branch_id)).await {
                Ok(info) => branch_name.set(info.nombre),
                Err(e) => log::warn!("branch {} info not loaded: {}", branch_id, e),
            }
        });
    });

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Nova"</span>
                <Show when=move || !branch_name.get().is_empty()>
                    <span class="top-header__branch">{move || branch_name.get()}</span>
                </Show>
            </div>

            <div class="top-header__actions">
                <NotificationsBell />
                <UserMenu />
            </div>
        </div>
    }
}
