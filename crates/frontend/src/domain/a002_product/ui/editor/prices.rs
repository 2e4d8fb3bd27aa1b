use super::view_model::PriceEdit;
use crate::shared::icons::icon;
use contracts::domain::a002_product::prices::PriceRowChange;
use contracts::domain::a002_product::{PriceRole, PriceRow};
use leptos::prelude::*;

/// Editable price list. Rows are addressed by index; every change goes
/// through `on_edit`.
#[component]
pub fn PriceListEditor(
    #[prop(into)] rows: Signal<Vec<PriceRow>>,
    on_edit: Callback<PriceEdit>,
) -> impl IntoView {
    view! {
        <div class="price-list">
            <table class="table__data table--compact">
                <thead>
                    <tr>
                        <th>"Rol"</th>
                        <th>"Orden"</th>
                        <th>"Precio"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows.get().into_iter().enumerate().map(|(index, row)| {
                        let role_value = row.rol.map(|r| r.as_str()).unwrap_or("");
                        view! {
                            <tr>
                                <td>
                                    <select
                                        class="form__select"
                                        prop:value=role_value
                                        on:change=move |ev| {
                                            let role = PriceRole::parse(&event_target_value(&ev));
                                            on_edit.run(PriceEdit::Update(index, PriceRowChange::Role(role)));
                                        }
                                    >
                                        <option value="">"Seleccione"</option>
                                        {PriceRole::ALL.into_iter().map(|role| view! {
                                            <option value=role.as_str() selected=row.rol == Some(role)>
                                                {role.label()}
                                            </option>
                                        }).collect_view()}
                                    </select>
                                </td>
                                <td>
                                    <input
                                        type="number"
                                        min="1"
                                        class="form__input form__input--narrow"
                                        prop:value=row.orden.to_string()
                                        on:change=move |ev| {
                                            let order = event_target_value(&ev).trim().parse().unwrap_or(0);
                                            on_edit.run(PriceEdit::Update(index, PriceRowChange::Order(order)));
                                        }
                                    />
                                </td>
                                <td>
                                    <input
                                        type="number"
                                        step="0.01"
                                        min="0"
                                        class="form__input"
                                        placeholder="0.00"
                                        prop:value=row.precio.clone()
                                        on:change=move |ev| {
                                            on_edit.run(PriceEdit::Update(index, PriceRowChange::Price(event_target_value(&ev))));
                                        }
                                    />
                                </td>
                                <td>
                                    <button
                                        class="button button--ghost"
                                        title="Quitar precio"
                                        on:click=move |_| on_edit.run(PriceEdit::Remove(index))
                                    >
                                        {icon("trash")}
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
            <button class="button button--secondary" on:click=move |_| on_edit.run(PriceEdit::Add)>
                {icon("plus")}
                "Agregar precio"
            </button>
        </div>
    }
}
