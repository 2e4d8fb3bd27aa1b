use crate::shared::icons::icon;
use contracts::shared::money::format_quetzal;
use leptos::prelude::*;

/// Money figure with a caption. `None` renders a placeholder while loading.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    #[prop(into)] value: Signal<Option<f64>>,
    /// Small text under the value
    #[prop(optional)]
    hint: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__header">
                <span class="stat-card__label">{label}</span>
                <span class="stat-card__icon">{icon(icon_name)}</span>
            </div>
            <div class="stat-card__value">
                {move || match value.get() {
                    Some(v) => format_quetzal(v),
                    None => "—".to_string(),
                }}
            </div>
            {(!hint.is_empty()).then(|| view! { <div class="stat-card__hint">{hint}</div> })}
        </div>
    }
}
