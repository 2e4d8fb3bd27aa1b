use super::widget::{loaded_count, remote_list, Remote, WidgetCard};
use crate::dashboards::d400_operations::api;
use crate::shared::clock::local_date_text;
use crate::shared::components::ui::badge::StatePill;
use crate::shared::query_cache::{use_query_cache, QueryCache};
use crate::shared::toast::{use_toast, ToastKind, ToastService};
use crate::system::session::{use_session, SessionContext};
use contracts::dashboards::d400_operations::credit::MISSING_IDS_MESSAGE;
use contracts::dashboards::d400_operations::warranty::{
    FinishWarrantyForm, UpdateWarrantyRequest,
};
use contracts::dashboards::d400_operations::{Repair, Warranty, WarrantyState};
use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn OpenRepairsWidget() -> impl IntoView {
    let cache = use_query_cache();
    let repairs: RwSignal<Remote<Vec<Repair>>> = RwSignal::new(None);

    Effect::new(move |_| {
        let _ = cache.version(&QueryKey::OpenRepairs);
        spawn_local(async move {
            repairs.set(Some(api::fetch_open_repairs().await));
        });
    });

    view! {
        <WidgetCard title="Reparaciones abiertas" icon_name="tool" count=loaded_count(repairs)>
            {remote_list(repairs, "Error al cargar reparaciones", "No hay reparaciones abiertas", |items| view! {
                <ul class="dashboard-list">
                    {items.into_iter().map(|repair| {
                        let customer = repair.cliente.as_ref().map(|c| c.nombre.clone()).unwrap_or_default();
                        view! {
                            <li class="dashboard-list__item">
                                <div class="dashboard-list__main">
                                    <span class="dashboard-list__title">{repair.product_name()}</span>
                                    <span class="dashboard-list__meta">
                                        {format!("{} · {}", customer, local_date_text(repair.fecha_recibido.as_deref()))}
                                    </span>
                                    {repair.problemas.clone().filter(|p| !p.trim().is_empty()).map(|p| view! {
                                        <span class="dashboard-list__note">{p}</span>
                                    })}
                                </div>
                                <span class="badge badge--warning">{repair.estado.clone()}</span>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            })}
        </WidgetCard>
    }
}

/// Warranty claims with their state, plus update and close dialogs.
#[component]
pub fn WarrantiesWidget() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();
    let toast = use_toast();
    let warranties: RwSignal<Remote<Vec<Warranty>>> = RwSignal::new(None);
    let selected = RwSignal::new(None::<Warranty>);
    let update_open = RwSignal::new(false);
    let finish_open = RwSignal::new(false);

    Effect::new(move |_| {
        let _ = cache.version(&QueryKey::Warranties);
        spawn_local(async move {
            warranties.set(Some(api::fetch_warranties().await));
        });
    });

    let pick = move |warranty: Warranty, finish: bool| {
        selected.set(Some(warranty));
        if finish {
            finish_open.set(true);
        } else {
            update_open.set(true);
        }
    };

    view! {
        <WidgetCard title="Garantías" icon_name="check" count=loaded_count(warranties)>
            {remote_list(warranties, "Error al cargar garantías", "No hay garantías registradas", move |items| view! {
                <ul class="dashboard-list">
                    {items.into_iter().map(|warranty| {
                        let for_update = warranty.clone();
                        let for_finish = warranty.clone();
                        view! {
                            <li class="dashboard-list__item">
                                <div class="dashboard-list__main">
                                    <span class="dashboard-list__title">{warranty.product_name().to_string()}</span>
                                    <span class="dashboard-list__meta">
                                        {format!(
                                            "{} · {}",
                                            warranty.customer_name(),
                                            local_date_text(warranty.fecha_recepcion.as_deref()),
                                        )}
                                    </span>
                                </div>
                                <StatePill class=warranty.estado.color_class() label=warranty.estado.label() />
                                <div class="dashboard-list__actions">
                                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| pick(for_update.clone(), false)>
                                        "Actualizar"
                                    </Button>
                                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| pick(for_finish.clone(), true)>
                                        "Finalizar"
                                    </Button>
                                </div>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            })}
        </WidgetCard>

        <UpdateWarrantyDialog open=update_open warranty=selected cache=cache toast=toast />
        <FinishWarrantyDialog open=finish_open warranty=selected session=session cache=cache toast=toast />
    }
}

fn state_options(states: &[WarrantyState], current: RwSignal<String>) -> impl IntoView {
    states
        .iter()
        .map(|&state| {
            view! {
                <option value=state.as_str() selected=move || current.get() == state.as_str()>
                    {state.label()}
                </option>
            }
        })
        .collect_view()
}

#[component]
fn UpdateWarrantyDialog(
    open: RwSignal<bool>,
    warranty: RwSignal<Option<Warranty>>,
    cache: QueryCache,
    toast: ToastService,
) -> impl IntoView {
    let comment = RwSignal::new(String::new());
    let problem = RwSignal::new(String::new());
    let state = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Seed the fields from the claim being edited.
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        if let Some(current) = warranty.get_untracked() {
            let seed = UpdateWarrantyRequest::from_warranty(&current);
            comment.set(seed.comentario);
            problem.set(seed.descripcion_problema);
            state.set(seed.estado.map(|s| s.as_str().to_string()).unwrap_or_default());
        }
    });

    let submit = move |_| {
        let Some(id) = warranty.with_untracked(|w| w.as_ref().map(|w| w.id)) else {
            return;
        };
        let request = UpdateWarrantyRequest {
            comentario: comment.get_untracked().trim().to_string(),
            descripcion_problema: problem.get_untracked().trim().to_string(),
            estado: WarrantyState::parse(&state.get_untracked()),
        };
        busy.set(true);
        let pending = toast.loading("Actualizando garantía...");
        spawn_local(async move {
            match api::update_warranty(id, &request).await {
                Ok(()) => {
                    toast.resolve(pending, ToastKind::Success, "Garantía actualizada");
                    cache.invalidate(&QueryKey::Warranties);
                    open.set(false);
                }
                Err(e) => {
                    log::error!("update warranty {}: {}", id, e);
                    toast.resolve(pending, ToastKind::Error, e);
                }
            }
            busy.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Actualizar garantía"</DialogTitle>
                    <DialogContent>
                        <div class="form">
                            <div class="form__group">
                                <label>"Estado"</label>
                                <select class="form__select" on:change=move |ev| state.set(event_target_value(&ev))>
                                    {state_options(&WarrantyState::ALL, state)}
                                </select>
                            </div>
                            <div class="form__group">
                                <label>"Descripción del problema"</label>
                                <Textarea value=problem attr:rows=3 />
                            </div>
                            <div class="form__group">
                                <label>"Comentario"</label>
                                <Textarea value=comment attr:rows=3 />
                            </div>
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || busy.get())
                        >
                            {move || if busy.get() { "Guardando..." } else { "Guardar" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
fn FinishWarrantyDialog(
    open: RwSignal<bool>,
    warranty: RwSignal<Option<Warranty>>,
    session: SessionContext,
    cache: QueryCache,
    toast: ToastService,
) -> impl IntoView {
    let state = RwSignal::new(String::new());
    let conclusion = RwSignal::new(String::new());
    let actions_taken = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move |_| {
        let Some((warranty_id, product_id)) =
            warranty.with_untracked(|w| w.as_ref().map(|w| (w.id, w.product_id())))
        else {
            return;
        };
        let Some(user_id) = session.user_id() else {
            toast.error(MISSING_IDS_MESSAGE);
            return;
        };
        let form = FinishWarrantyForm {
            state: state.get_untracked(),
            conclusion: conclusion.get_untracked(),
            actions_taken: actions_taken.get_untracked(),
        };
        let request = match form.to_request(warranty_id, product_id, user_id) {
            Ok(request) => request,
            Err(message) => {
                toast.warning(message);
                return;
            }
        };
        busy.set(true);
        let pending = toast.loading("Finalizando garantía...");
        spawn_local(async move {
            match api::finish_warranty(&request).await {
                Ok(()) => {
                    toast.resolve(pending, ToastKind::Success, "Garantía finalizada");
                    cache.invalidate_all(&[QueryKey::Warranties, QueryKey::Inventory]);
                    open.set(false);
                    state.set(String::new());
                    conclusion.set(String::new());
                    actions_taken.set(String::new());
                }
                Err(e) => {
                    log::error!("finish warranty {}: {}", warranty_id, e);
                    toast.resolve(pending, ToastKind::Error, e);
                }
            }
            busy.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Finalizar garantía"</DialogTitle>
                    <DialogContent>
                        <p>
                            {move || warranty.with(|w| w.as_ref().map(|w| format!(
                                "{} · {}",
                                w.product_name(),
                                w.customer_name()
                            )))}
                        </p>
                        <div class="form">
                            <div class="form__group">
                                <label>"Estado final"</label>
                                <select class="form__select" on:change=move |ev| state.set(event_target_value(&ev))>
                                    <option value="" selected=move || state.get().is_empty()>"Seleccione..."</option>
                                    {state_options(&WarrantyState::FINAL, state)}
                                </select>
                            </div>
                            <div class="form__group">
                                <label>"Conclusión"</label>
                                <Textarea value=conclusion attr:rows=3 />
                            </div>
                            <div class="form__group">
                                <label>"Acciones realizadas"</label>
                                <Textarea value=actions_taken attr:rows=3 />
                            </div>
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || busy.get())
                        >
                            {move || if busy.get() { "Finalizando..." } else { "Finalizar" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
