use super::presentations::PresentationsEditor;
use super::prices::PriceListEditor;
use super::view_model::{PriceEdit, ProductEditorVm};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::status::{ErrorBlock, LoadingBlock};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;
use crate::system::session::use_session;
use contracts::domain::a002_product::EditorMode;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProductEditor(
    mode: EditorMode,
    id: Option<i64>,
    tab_key: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProductEditorVm::new(mode, id);
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();
    let toast = use_toast();
    let cache = use_query_cache();

    vm.load_reference_data();
    vm.load();

    Effect::new(move |_| {
        if let Some(name) = vm.record_name.get() {
            tabs_store.update_tab_title(&tab_key, &detail_tab_label(mode.title_noun(), &name));
        }
    });

    let title = match (mode, vm.is_edit_mode()) {
        (_, true) => format!("Editar {}", mode.noun()),
        (EditorMode::Product, false) => "Nuevo producto".to_string(),
        (EditorMode::Presentation, false) => "Nueva presentación".to_string(),
    };

    let on_save = move |_| vm.save_command(session.user_id(), toast, cache, on_close);

    view! {
        <PageFrame page_id="a002_product--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h2>{title}</h2>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                    >
                        {move || if vm.saving.get() { "Guardando..." } else if vm.is_edit_mode() { "Guardar cambios" } else { "Crear" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cancelar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if vm.loading.get() {
                        return view! { <LoadingBlock /> }.into_any();
                    }
                    if let Some(err) = vm.error.get() {
                        return view! {
                            <ErrorBlock message=err on_retry=Callback::new(move |_| vm.load()) />
                        }.into_any();
                    }
                    view! { <EditorForm vm=vm /> }.into_any()
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn EditorForm(vm: ProductEditorVm) -> impl IntoView {
    let is_product = vm.mode == EditorMode::Product;

    view! {
        <Show when=move || vm.validation_errors.with(|e| !e.is_empty())>
            <div class="alert alert--error">
                <ul>
                    {move || vm.validation_errors.get().into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                </ul>
            </div>
        </Show>

        <div class="details-section">
            <h4 class="details-section__title">"Información básica"</h4>
            <div class="details-grid--3col">
                <div class="form__group" style="grid-column: 1 / -1;">
                    <label class="form__label">"Nombre"</label>
                    <Input value=vm.nombre placeholder="Nombre del producto" />
                </div>
                <div class="form__group">
                    <label class="form__label">"Código de producto"</label>
                    <Input value=vm.codigo_producto />
                </div>
                <div class="form__group">
                    <label class="form__label">"Código de proveedor"</label>
                    <Input value=vm.codigo_proveedor placeholder="Opcional" />
                </div>
                <div class="form__group">
                    <label class="form__label">"Stock mínimo"</label>
                    <Input value=vm.stock_minimo placeholder="0" />
                </div>
                {is_product.then(|| view! {
                    <div class="form__group">
                        <label class="form__label">"Precio costo actual"</label>
                        <Input value=vm.precio_costo placeholder="0.00" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Tipo de presentación"</label>
                        <select
                            class="form__select"
                            prop:value=move || vm.tipo_presentacion_id.get()
                            on:change=move |ev| vm.tipo_presentacion_id.set(event_target_value(&ev))
                        >
                            <option value="">"Sin tipo"</option>
                            {move || vm.presentation_types.get().into_iter().map(|t| view! {
                                <option value=t.id.to_string()>{t.nombre}</option>
                            }).collect_view()}
                        </select>
                    </div>
                })}
                <div class="form__group" style="grid-column: 1 / -1;">
                    <label class="form__label">"Descripción"</label>
                    <Textarea value=vm.descripcion placeholder="Opcional" attr:rows=3 />
                </div>
            </div>

            <h5 class="details-section__subtitle">"Categorías"</h5>
            <div class="chip-list">
                {move || vm.all_categories.get().into_iter().map(|c| {
                    let id = c.id;
                    view! {
                        <label class="chip" class:chip--selected=move || vm.categorias.with(|ids| ids.contains(&id))>
                            <input
                                type="checkbox"
                                prop:checked=move || vm.categorias.with(|ids| ids.contains(&id))
                                on:change=move |_| vm.toggle_category(id)
                            />
                            {c.nombre}
                        </label>
                    }
                }).collect_view()}
            </div>

            <Show when=move || vm.images.with(|i| !i.is_empty())>
                <h5 class="details-section__subtitle">"Imágenes"</h5>
                <div class="image-strip">
                    {move || vm.images.get().into_iter().map(|img| view! {
                        <img class="image-strip__item" src=img.url alt="" />
                    }).collect_view()}
                </div>
            </Show>
        </div>

        {is_product.then(|| view! {
            <div class="details-section">
                <h4 class="details-section__title">"Precios del producto"</h4>
                <PriceListEditor
                    rows=vm.prices
                    on_edit=Callback::new(move |edit: PriceEdit| vm.edit_prices(edit))
                />
            </div>
        })}

        <div class="details-section">
            <h4 class="details-section__title">"Presentaciones"</h4>
            <PresentationsEditor vm=vm />
        </div>
    }
}
