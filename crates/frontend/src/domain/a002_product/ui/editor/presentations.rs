use super::prices::PriceListEditor;
use super::view_model::{PriceEdit, ProductEditorVm};
use crate::shared::icons::icon;
use contracts::domain::a002_product::PresentationForm;
use contracts::shared::lenient::parse_number;
use leptos::prelude::*;

/// One card per presentation: identity fields, type, reference cost,
/// default flag and its own price list.
#[component]
pub fn PresentationsEditor(vm: ProductEditorVm) -> impl IntoView {
    let count = move || vm.presentations.with(|items| items.len());

    view! {
        <div class="presentations">
            <For
                each=move || 0..count()
                key=|index| *index
                children=move |index| {
                    let field = move |read: fn(&PresentationForm) -> String| {
                        move || vm.presentations.with(|items| items.get(index).map(read).unwrap_or_default())
                    };
                    let rows = Signal::derive(move || {
                        vm.presentations.with(|items| {
                            items.get(index).map(|p| p.precios.clone()).unwrap_or_default()
                        })
                    });
                    let is_default = move || {
                        vm.presentations.with(|items| items.get(index).is_some_and(|p| p.es_default))
                    };
                    let type_id = move || {
                        vm.presentations.with(|items| {
                            items
                                .get(index)
                                .and_then(|p| p.tipo_presentacion_id)
                                .map(|id| id.to_string())
                                .unwrap_or_default()
                        })
                    };

                    view! {
                        <div class="presentation-card">
                            <div class="presentation-card__header">
                                <span class="presentation-card__title">
                                    {move || {
                                        let name = field(|p| p.display_name())();
                                        if name.is_empty() { format!("Presentación {}", index + 1) } else { name }
                                    }}
                                </span>
                                <label class="presentation-card__default">
                                    <input
                                        type="checkbox"
                                        prop:checked=is_default
                                        on:change=move |_| vm.toggle_default(index)
                                    />
                                    "Predeterminada"
                                </label>
                                <button
                                    class="button button--ghost"
                                    title="Quitar presentación"
                                    on:click=move |_| vm.remove_presentation(index)
                                >
                                    {icon("trash")}
                                </button>
                            </div>

                            <div class="details-grid--3col">
                                <div class="form__group">
                                    <label class="form__label">"Nombre"</label>
                                    <input
                                        class="form__input"
                                        prop:value=field(|p| p.nombre.clone())
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.update_presentation(index, |p| p.nombre = value);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Código de barras"</label>
                                    <input
                                        class="form__input"
                                        prop:value=field(|p| p.codigo_barras.clone())
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.update_presentation(index, |p| p.codigo_barras = value);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Tipo de presentación"</label>
                                    <select
                                        class="form__select"
                                        prop:value=type_id
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev).parse().ok();
                                            vm.update_presentation(index, |p| p.tipo_presentacion_id = value);
                                        }
                                    >
                                        <option value="">"Seleccione"</option>
                                        {move || vm.presentation_types.get().into_iter().map(|t| view! {
                                            <option value=t.id.to_string()>{t.nombre}</option>
                                        }).collect_view()}
                                    </select>
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Costo referencial"</label>
                                    <input
                                        type="number"
                                        step="0.01"
                                        class="form__input"
                                        prop:value=field(|p| p.costo_referencial.clone())
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.update_presentation(index, |p| p.costo_referencial = value);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Stock mínimo"</label>
                                    <input
                                        type="number"
                                        class="form__input"
                                        prop:value=field(|p| p.stock_minimo.to_string())
                                        on:change=move |ev| {
                                            let value = parse_number(&event_target_value(&ev)).unwrap_or(0.0);
                                            vm.update_presentation(index, |p| p.stock_minimo = value);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Descripción"</label>
                                    <input
                                        class="form__input"
                                        prop:value=field(|p| p.descripcion.clone())
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.update_presentation(index, |p| p.descripcion = value);
                                        }
                                    />
                                </div>
                            </div>

                            <h5 class="details-section__subtitle">"Precios"</h5>
                            <PriceListEditor
                                rows=rows
                                on_edit=Callback::new(move |edit: PriceEdit| vm.edit_presentation_prices(index, edit))
                            />
                        </div>
                    }
                }
            />
            <button class="button button--secondary" on:click=move |_| vm.add_presentation()>
                {icon("plus")}
                "Agregar presentación"
            </button>
        </div>
    }
}
