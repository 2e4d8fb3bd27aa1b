use super::widget::{loaded_count, remote_list, Remote, WidgetCard};
use crate::dashboards::d400_operations::api;
use crate::shared::clock::local_date_text;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::{use_toast, ToastKind, ToastService};
use crate::system::session::use_session;
use contracts::dashboards::d400_operations::credit::MISSING_IDS_MESSAGE;
use contracts::dashboards::d400_operations::requests::{
    PriceRequest, TransferRequest, PRICE_ACCEPTED, PRICE_REJECTED, TRANSFER_ACCEPTED,
    TRANSFER_REJECTED,
};
use contracts::domain::a001_stock_lot::edit::format_quantity;
use contracts::shared::money::format_quetzal;
use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use thaw::*;

/// Runs a request action behind a loading toast and calls `done` whatever
/// the outcome.
fn run_action<F>(
    toast: ToastService,
    busy: RwSignal<Option<i64>>,
    id: i64,
    success: &'static str,
    action: F,
    done: impl FnOnce() + 'static,
) where
    F: Future<Output = Result<(), String>> + 'static,
{
    busy.set(Some(id));
    let pending = toast.loading("Procesando...");
    spawn_local(async move {
        match action.await {
            Ok(()) => toast.resolve(pending, ToastKind::Success, success),
            Err(e) => {
                log::error!("request {}: {}", id, e);
                toast.resolve(pending, ToastKind::Error, e);
            }
        }
        busy.set(None);
        done();
    });
}

#[component]
pub fn PriceRequestsWidget() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();
    let toast = use_toast();
    let requests: RwSignal<Remote<Vec<PriceRequest>>> = RwSignal::new(None);
    let busy = RwSignal::new(None::<i64>);

    Effect::new(move |_| {
        let Some(branch_id) = session.branch_id() else {
            return;
        };
        let _ = cache.version(&QueryKey::PriceRequests(branch_id));
        spawn_local(async move {
            requests.set(Some(api::fetch_price_requests().await));
        });
    });

    let act = move |id: i64, accept: bool| {
        let (branch_id, user_id) = session.ids_untracked();
        if user_id == 0 {
            toast.error(MISSING_IDS_MESSAGE);
            return;
        }
        let done = move || cache.invalidate(&QueryKey::PriceRequests(branch_id));
        if accept {
            run_action(toast, busy, id, PRICE_ACCEPTED, api::accept_price(id, user_id), done);
        } else {
            run_action(toast, busy, id, PRICE_REJECTED, api::reject_price(id, user_id), done);
        }
    };

    view! {
        <WidgetCard title="Solicitudes de precio" icon_name="tag" count=loaded_count(requests)>
            {remote_list(requests, "Error al cargar solicitudes de precio", "No hay solicitudes de precio", move |items| view! {
                <ul class="dashboard-list">
                    {items.into_iter().map(|request| {
                        let id = request.id;
                        let disabled = Signal::derive(move || busy.get().is_some());
                        view! {
                            <li class="dashboard-list__item">
                                <div class="dashboard-list__main">
                                    <span class="dashboard-list__title">{request.product_name()}</span>
                                    <span class="dashboard-list__meta">
                                        {format!(
                                            "{} · {} · {}",
                                            format_quetzal(request.requested_price),
                                            request.requester_name(),
                                            local_date_text(request.requested_at.as_deref()),
                                        )}
                                    </span>
                                </div>
                                <div class="dashboard-list__actions">
                                    <Button appearance=ButtonAppearance::Primary disabled=disabled on_click=move |_| act(id, true)>
                                        "Aceptar"
                                    </Button>
                                    <Button appearance=ButtonAppearance::Secondary disabled=disabled on_click=move |_| act(id, false)>
                                        "Rechazar"
                                    </Button>
                                </div>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            })}
        </WidgetCard>
    }
}

#[component]
pub fn TransferRequestsWidget() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();
    let toast = use_toast();
    let requests: RwSignal<Remote<Vec<TransferRequest>>> = RwSignal::new(None);
    let busy = RwSignal::new(None::<i64>);

    Effect::new(move |_| {
        let Some(branch_id) = session.branch_id() else {
            return;
        };
        let _ = cache.version(&QueryKey::TransferRequests(branch_id));
        spawn_local(async move {
            requests.set(Some(api::fetch_transfer_requests().await));
        });
    });

    let act = move |id: i64, accept: bool| {
        let (branch_id, user_id) = session.ids_untracked();
        if user_id == 0 {
            toast.error(MISSING_IDS_MESSAGE);
            return;
        }
        let done = move || {
            cache.invalidate(&QueryKey::TransferRequests(branch_id));
            cache.invalidate(&QueryKey::Inventory);
        };
        if accept {
            run_action(toast, busy, id, TRANSFER_ACCEPTED, api::accept_transfer(id, user_id), done);
        } else {
            run_action(toast, busy, id, TRANSFER_REJECTED, api::reject_transfer(id, user_id), done);
        }
    };

    view! {
        <WidgetCard title="Solicitudes de transferencia" icon_name="truck" count=loaded_count(requests)>
            {remote_list(requests, "Error al cargar transferencias", "No hay solicitudes de transferencia", move |items| view! {
                <ul class="dashboard-list">
                    {items.into_iter().map(|request| {
                        let id = request.id;
                        let disabled = Signal::derive(move || busy.get().is_some());
                        view! {
                            <li class="dashboard-list__item">
                                <div class="dashboard-list__main">
                                    <span class="dashboard-list__title">
                                        {format!("{} × {}", request.product_name(), format_quantity(request.cantidad))}
                                    </span>
                                    <span class="dashboard-list__meta">
                                        {format!(
                                            "{} · {}",
                                            request.route(),
                                            local_date_text(request.requested_at.as_deref()),
                                        )}
                                    </span>
                                </div>
                                <div class="dashboard-list__actions">
                                    <Button appearance=ButtonAppearance::Primary disabled=disabled on_click=move |_| act(id, true)>
                                        "Aceptar"
                                    </Button>
                                    <Button appearance=ButtonAppearance::Secondary disabled=disabled on_click=move |_| act(id, false)>
                                        "Rechazar"
                                    </Button>
                                </div>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            })}
        </WidgetCard>
    }
}
