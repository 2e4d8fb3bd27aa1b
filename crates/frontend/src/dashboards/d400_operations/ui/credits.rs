use super::widget::{loaded_count, remote_list, Remote, WidgetCard};
use crate::dashboards::d400_operations::api;
use crate::shared::clock::local_date_text;
use crate::shared::components::status::ErrorBlock;
use crate::shared::query_cache::{use_query_cache, QueryCache};
use crate::shared::realtime::use_socket_event;
use crate::shared::toast::{use_toast, ToastKind, ToastService};
use crate::system::session::{use_session, SessionContext};
use contracts::dashboards::d400_operations::credit::{
    upsert_authorization, AcceptCreditForm, PosPaymentMethod, MISSING_IDS_MESSAGE,
};
use contracts::dashboards::d400_operations::{
    AcceptCreditRequest, ActiveCredit, CashRegister, CreditAuthorization, RejectCreditRequest,
    SelectOption,
};
use contracts::shared::money::format_quetzal;
use contracts::shared::query_key::QueryKey;
use contracts::shared::realtime::{effect_of, RealtimeEffect, CREDIT_AUTHORIZATION_EVENT};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

// ============================================================================
// Authorizations
// ============================================================================

/// Pending credit authorizations. New ones pushed over the socket are
/// prepended without a refetch.
#[component]
pub fn CreditAuthorizationsWidget() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();
    let toast = use_toast();
    let list: RwSignal<Remote<Vec<CreditAuthorization>>> = RwSignal::new(None);

    Effect::new(move |_| {
        let _ = cache.version(&QueryKey::CreditAuthorizations);
        spawn_local(async move {
            let result = api::fetch_authorizations().await.map(|l| l.data);
            if let Err(e) = &result {
                log::error!("credit authorizations: {}", e);
            }
            list.set(Some(result));
        });
    });

    use_socket_event(CREDIT_AUTHORIZATION_EVENT, move |envelope| {
        let (branch_id, user_id) = session.ids_untracked();
        if let Some(RealtimeEffect::UpsertAuthorization(item)) = effect_of(&envelope, branch_id, user_id) {
            list.update(|current| {
                if let Some(Ok(items)) = current {
                    upsert_authorization(items, item);
                }
            });
            toast.info("Nueva solicitud de crédito");
        }
    });

    let reviewing = RwSignal::new(None::<CreditAuthorization>);
    let accept_open = RwSignal::new(false);
    let reject_open = RwSignal::new(false);

    let review = move |item: CreditAuthorization, accept: bool| {
        reviewing.set(Some(item));
        if accept {
            accept_open.set(true);
        } else {
            reject_open.set(true);
        }
    };

    view! {
        <WidgetCard title="Autorizaciones de crédito" icon_name="credit-card" count=loaded_count(list)>
            {remote_list(list, "Error al cargar autorizaciones", "No hay solicitudes pendientes", move |items| view! {
                <ul class="dashboard-list">
                    {items.into_iter().map(|item| {
                        let for_accept = item.clone();
                        let for_reject = item.clone();
                        let requested_by = item.solicitado_por.as_ref().map(|u| u.nombre.clone()).unwrap_or_default();
                        view! {
                            <li class="dashboard-list__item">
                                <div class="dashboard-list__main">
                                    <span class="dashboard-list__title">{item.customer_name()}</span>
                                    <span class="dashboard-list__meta">
                                        {format!(
                                            "{} · {} · {}",
                                            format_quetzal(item.economico.total_propuesto),
                                            requested_by,
                                            local_date_text(item.fechas.solicitado_iso.as_deref()),
                                        )}
                                    </span>
                                </div>
                                <div class="dashboard-list__actions">
                                    <Button appearance=ButtonAppearance::Primary on_click=move |_| review(for_accept.clone(), true)>
                                        "Aprobar"
                                    </Button>
                                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| review(for_reject.clone(), false)>
                                        "Rechazar"
                                    </Button>
                                </div>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            })}
        </WidgetCard>

        <AcceptCreditDialog open=accept_open authorization=reviewing session=session cache=cache toast=toast />
        <RejectCreditDialog open=reject_open authorization=reviewing session=session cache=cache toast=toast />
    }
}

fn after_review(cache: QueryCache) {
    cache.invalidate_all(&[QueryKey::CreditAuthorizations, QueryKey::ActiveCredits]);
}

#[component]
fn AcceptCreditDialog(
    open: RwSignal<bool>,
    authorization: RwSignal<Option<CreditAuthorization>>,
    session: SessionContext,
    cache: QueryCache,
    toast: ToastService,
) -> impl IntoView {
    let method = RwSignal::new(PosPaymentMethod::Efectivo.as_str().to_string());
    let bank_account_id = RwSignal::new(String::new());
    let cash_register_id = RwSignal::new(String::new());
    let comment = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let bank_accounts = RwSignal::new(None::<Result<Vec<SelectOption>, String>>);
    let cash_registers = RwSignal::new(None::<Result<Vec<CashRegister>, String>>);

    // Reference lists load when the dialog opens.
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let _ = cache.version(&QueryKey::BankAccounts);
        spawn_local(async move {
            bank_accounts.set(Some(api::fetch_bank_accounts().await));
        });
    });
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let Some(branch_id) = session.branch_id() else {
            return;
        };
        let _ = cache.version(&QueryKey::CashRegisters(branch_id));
        spawn_local(async move {
            cash_registers.set(Some(api::fetch_cash_registers(branch_id).await));
        });
    });

    let selected_method = Signal::derive(move || PosPaymentMethod::from_selection(&method.get()));

    let reset = move || {
        method.set(PosPaymentMethod::Efectivo.as_str().to_string());
        bank_account_id.set(String::new());
        cash_register_id.set(String::new());
        comment.set(String::new());
    };

    let submit = move |_| {
        let Some(item) = authorization.get_untracked() else {
            return;
        };
        let Some(admin_id) = session.user_id() else {
            toast.error(MISSING_IDS_MESSAGE);
            return;
        };
        let form = AcceptCreditForm {
            comment: comment.get_untracked(),
            method: method.get_untracked(),
            bank_account_id: bank_account_id.get_untracked(),
            cash_register_id: cash_register_id.get_untracked(),
        };
        let request = AcceptCreditRequest::build(admin_id, item.id, &form);
        if request.metodo_pago.uses_bank_account() && request.cuenta_bancaria_id.is_none() {
            toast.warning("Seleccione una cuenta bancaria");
            return;
        }
        if request.metodo_pago.uses_cash_register() && request.caja_id.is_none() {
            toast.warning("Seleccione una caja");
            return;
        }
        busy.set(true);
        let pending = toast.loading("Aprobando crédito...");
        spawn_local(async move {
            match api::accept_credit(&request).await {
                Ok(()) => {
                    toast.resolve(pending, ToastKind::Success, "Crédito aprobado");
                    after_review(cache);
                    open.set(false);
                    reset();
                }
                Err(e) => {
                    log::error!("accept credit {}: {}", request.auth_credito_id, e);
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
                    <DialogTitle>"Aprobar crédito"</DialogTitle>
                    <DialogContent>
                        {move || authorization.get().map(|item| {
                            let first_due = local_date_text(item.fechas.primera_cuota_iso.as_deref());
                            view! {
                                <div class="summary-box">
                                    <div class="summary-box__row">
                                        <span class="summary-box__label">"Cliente"</span>
                                        <span class="summary-box__value">{item.customer_name()}</span>
                                    </div>
                                    <div class="summary-box__row">
                                        <span class="summary-box__label">"Total propuesto"</span>
                                        <span class="summary-box__value">{format_quetzal(item.economico.total_propuesto)}</span>
                                    </div>
                                    <div class="summary-box__row">
                                        <span class="summary-box__label">"Enganche"</span>
                                        <span class="summary-box__value">{format_quetzal(item.down_payment())}</span>
                                    </div>
                                    <p class="summary-box__note">{item.plan_summary(Some(&first_due))}</p>
                                </div>
                            }
                        })}
                        <div class="form">
                            <div class="form__group">
                                <label>"Método de pago del enganche"</label>
                                <select class="form__select" on:change=move |ev| method.set(event_target_value(&ev))>
                                    {PosPaymentMethod::CHOICES.into_iter().map(|choice| view! {
                                        <option
                                            value=choice.as_str()
                                            selected=move || method.get() == choice.as_str()
                                        >
                                            {choice.label()}
                                        </option>
                                    }).collect_view()}
                                </select>
                            </div>
                            <Show when=move || selected_method.get().uses_bank_account()>
                                <div class="form__group">
                                    <label>"Cuenta bancaria"</label>
                                    {move || match bank_accounts.get() {
                                        Some(Err(e)) => view! { <ErrorBlock message=e /> }.into_any(),
                                        other => {
                                            let options = other.and_then(Result::ok).unwrap_or_default();
                                            view! {
                                                <select class="form__select" on:change=move |ev| bank_account_id.set(event_target_value(&ev))>
                                                    <option value="">"Seleccione..."</option>
                                                    {options.into_iter().map(|o| view! {
                                                        <option value=o.id.to_string()>{o.nombre}</option>
                                                    }).collect_view()}
                                                </select>
                                            }
                                            .into_any()
                                        }
                                    }}
                                </div>
                            </Show>
                            <Show when=move || selected_method.get().uses_cash_register()>
                                <div class="form__group">
                                    <label>"Caja"</label>
                                    {move || match cash_registers.get() {
                                        Some(Err(e)) => view! { <ErrorBlock message=e /> }.into_any(),
                                        other => {
                                            let options = other.and_then(Result::ok).unwrap_or_default();
                                            view! {
                                                <select class="form__select" on:change=move |ev| cash_register_id.set(event_target_value(&ev))>
                                                    <option value="">"Seleccione..."</option>
                                                    {options.into_iter().map(|c| view! {
                                                        <option value=c.id.to_string()>
                                                            {format!("{} · {}", c.label(), format_quetzal(c.saldo_actual))}
                                                        </option>
                                                    }).collect_view()}
                                                </select>
                                            }
                                            .into_any()
                                        }
                                    }}
                                </div>
                            </Show>
                            <div class="form__group">
                                <label>"Comentario"</label>
                                <Textarea value=comment placeholder="Aprobación desde dashboard" attr:rows=3 />
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
                            {move || if busy.get() { "Aprobando..." } else { "Aprobar" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
fn RejectCreditDialog(
    open: RwSignal<bool>,
    authorization: RwSignal<Option<CreditAuthorization>>,
    session: SessionContext,
    cache: QueryCache,
    toast: ToastService,
) -> impl IntoView {
    let reason = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move |_| {
        let request = RejectCreditRequest::build(
            authorization.with_untracked(|a| a.as_ref().map(|a| a.id)),
            session.user_id().unwrap_or_default(),
            session.branch_id().unwrap_or_default(),
            &reason.get_untracked(),
        );
        let request = match request {
            Ok(request) => request,
            Err(message) => {
                toast.error(message);
                return;
            }
        };
        busy.set(true);
        let pending = toast.loading("Rechazando solicitud...");
        spawn_local(async move {
            match api::reject_credit(&request).await {
                Ok(()) => {
                    toast.resolve(pending, ToastKind::Success, "Solicitud de crédito rechazada");
                    after_review(cache);
                    open.set(false);
                    reason.set(String::new());
                }
                Err(e) => {
                    log::error!("reject credit {}: {}", request.auth_id, e);
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
                    <DialogTitle>"Rechazar crédito"</DialogTitle>
                    <DialogContent>
                        <p>
                            {move || authorization.with(|a| a.as_ref().map(|a| format!(
                                "Se rechazará la solicitud de {}.",
                                a.customer_name()
                            )))}
                        </p>
                        <Textarea value=reason placeholder="Motivo del rechazo" attr:rows=3 />
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
                            {move || if busy.get() { "Rechazando..." } else { "Rechazar" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

// ============================================================================
// Active credits
// ============================================================================

#[component]
pub fn ActiveCreditsWidget() -> impl IntoView {
    let cache = use_query_cache();
    let credits: RwSignal<Remote<Vec<ActiveCredit>>> = RwSignal::new(None);

    Effect::new(move |_| {
        let _ = cache.version(&QueryKey::ActiveCredits);
        spawn_local(async move {
            credits.set(Some(api::fetch_active_credits().await));
        });
    });

    view! {
        <WidgetCard title="Créditos activos" icon_name="credit-card" count=loaded_count(credits)>
            {remote_list(credits, "Error al cargar créditos", "No hay créditos activos", |items| view! {
                <ul class="dashboard-list">
                    {items.into_iter().map(|credit| {
                        let customer = credit.cliente.as_ref().map(|c| c.nombre.clone()).unwrap_or_default();
                        view! {
                            <li class="dashboard-list__item">
                                <div class="dashboard-list__main">
                                    <span class="dashboard-list__title">{customer}</span>
                                    <span class="dashboard-list__meta">
                                        {format!(
                                            "Saldo {} de {}",
                                            format_quetzal(credit.balance()),
                                            format_quetzal(credit.monto_total_con_interes),
                                        )}
                                    </span>
                                    <div class="progress">
                                        <div class="progress__bar" style=format!("width: {:.0}%;", credit.progress())></div>
                                    </div>
                                </div>
                                <span class="badge badge--neutral">{credit.estado.clone()}</span>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            })}
        </WidgetCard>
    }
}
