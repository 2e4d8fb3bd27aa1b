use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::query_cache::QueryCache;
use crate::shared::realtime::RealtimeClient;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::session::SessionContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    let session = SessionContext::restore();
    provide_context(session);

    let cache = QueryCache::new();
    provide_context(cache);
    provide_context(ToastService::new());

    if session.is_authenticated() {
        provide_context(RealtimeClient::start(cache, session));
    }

    view! {
        <AppShell />
        <ToastHost />
    }
}
