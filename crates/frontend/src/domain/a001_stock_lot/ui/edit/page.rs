use super::view_model::EditStockVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::status::{ErrorBlock, LoadingBlock};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;
use contracts::domain::a001_stock_lot::edit::summary_rows;
use contracts::domain::a001_stock_lot::{EditStockPhase, StockKind};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn EditStockPage(
    id: i64,
    kind: Option<StockKind>,
    tab_key: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = EditStockVm::new(id, kind);
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let cache = use_query_cache();

    vm.load();

    Effect::new(move |_| {
        vm.phase.with(|phase| {
            if let Some(record) = phase.record() {
                let title = detail_tab_label("Stock", &record.product_name);
                tabs_store.update_tab_title(&tab_key, &title);
            }
        });
    });

    let on_save = move |_| vm.save_command(toast, cache, on_close);

    view! {
        <PageFrame page_id="a001_stock_lot--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("inventory")}
                    <h2>"Editar fechas de stock"</h2>
                    {move || vm.phase.with(|p| p.record().map(|r| r.kind.label())).map(|label| view! {
                        <span class="badge badge--neutral">{label}</span>
                    })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || vm.saving.get() || vm.phase.with(|p| p.record().is_none()))
                    >
                        {move || if vm.saving.get() { "Guardando..." } else { "Guardar" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cerrar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match vm.phase.get() {
                    EditStockPhase::Loading => view! { <LoadingBlock /> }.into_any(),
                    EditStockPhase::Failed(message) => view! {
                        <ErrorBlock
                            message=format!("No se pudo cargar el stock: {}", message)
                            on_retry=Callback::new(move |_| vm.load())
                        />
                    }.into_any(),
                    EditStockPhase::Loaded(record) => view! {
                        <div class="detail-grid">
                            <div class="summary-box">
                                {summary_rows(&record).into_iter().map(|(label, value)| view! {
                                    <div class="summary-box__row">
                                        <span class="summary-box__label">{label}</span>
                                        <span class="summary-box__value">{value}</span>
                                    </div>
                                }).collect_view()}
                            </div>

                            <div class="form">
                                <div class="form__group">
                                    <label for="stock-intake">"Fecha de ingreso"</label>
                                    <input
                                        type="date"
                                        id="stock-intake"
                                        class="form__input"
                                        prop:value=move || vm.intake_input()
                                        on:change=move |ev| vm.set_intake(&event_target_value(&ev))
                                    />
                                </div>
                                <div class="form__group">
                                    <label for="stock-expiry">"Fecha de vencimiento"</label>
                                    <Flex gap=FlexGap::Small>
                                        <input
                                            type="date"
                                            id="stock-expiry"
                                            class="form__input"
                                            prop:value=move || vm.expiry_input()
                                            on:change=move |ev| vm.set_expiry(&event_target_value(&ev))
                                        />
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| vm.set_expiry("")
                                        >
                                            "Sin vencimiento"
                                        </Button>
                                    </Flex>
                                </div>
                            </div>
                        </div>
                    }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}
