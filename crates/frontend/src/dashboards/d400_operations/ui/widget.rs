use crate::shared::components::status::{EmptyBlock, ErrorBlock, LoadingBlock};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Result of one widget read: `None` while the first request is in flight.
pub type Remote<T> = Option<Result<T, String>>;

#[component]
pub fn WidgetCard(
    title: &'static str,
    icon_name: &'static str,
    /// Counter shown next to the title
    #[prop(optional, into)]
    count: Option<Signal<usize>>,
    children: Children,
) -> impl IntoView {
    view! {
        <section class="dashboard-widget">
            <header class="dashboard-widget__header">
                {icon(icon_name)}
                <h3 class="dashboard-widget__title">{title}</h3>
                {count.map(|count| view! {
                    <span class="badge badge--primary">{move || count.get()}</span>
                })}
            </header>
            <div class="dashboard-widget__body">{children()}</div>
        </section>
    }
}

/// Loading, error, empty or the rendered list.
pub fn remote_list<T, F, V>(
    remote: RwSignal<Remote<Vec<T>>>,
    error_prefix: &'static str,
    empty_label: &'static str,
    render: F,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(Vec<T>) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || match remote.get() {
        None => view! { <LoadingBlock /> }.into_any(),
        Some(Err(message)) => view! {
            <ErrorBlock message=format!("{}: {}", error_prefix, message) />
        }
        .into_any(),
        Some(Ok(items)) if items.is_empty() => view! { <EmptyBlock label=empty_label /> }.into_any(),
        Some(Ok(items)) => render(items).into_any(),
    }
}

/// Number of loaded items, 0 while loading or failed.
pub fn loaded_count<T: Send + Sync + 'static>(remote: RwSignal<Remote<Vec<T>>>) -> Signal<usize> {
    Signal::derive(move || {
        remote.with(|r| match r {
            Some(Ok(items)) => items.len(),
            _ => 0,
        })
    })
}
