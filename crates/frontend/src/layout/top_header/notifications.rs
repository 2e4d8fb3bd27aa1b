//! Bell with unread badge and the notifications sheet.

use crate::shared::api_utils::{delete, get_json, post_json};
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::icons::icon;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;
use crate::system::session::use_session;
use contracts::shared::dates::parse_iso;
use contracts::shared::query_key::QueryKey;
use contracts::system::notifications::{
    badge_text, delete_all_path, my_notifications_path, remove_notification, unread_count,
    DeleteNotificationRequest, Notification, DELETE_ONE_PATH,
};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn NotificationsBell() -> impl IntoView {
    let session = use_session();
    let cache = use_query_cache();
    let toast = use_toast();

    let items = RwSignal::new(Vec::<Notification>::new());
    let loading = RwSignal::new(false);
    let is_open = RwSignal::new(false);
    let confirm_open = RwSignal::new(false);
    let deleting_all = RwSignal::new(false);

    // Reloads whenever the socket reports a new notification for this user.
    Effect::new(move |_| {
        let Some(user_id) = session.user_id() else {
            return;
        };
        let _ = cache.version(&QueryKey::Notifications(user_id));
        loading.set(true);
        spawn_local(async move {
            match get_json::<Vec<Notification>>(&my_notifications_path(user_id)).await {
                Ok(list) => items.set(list),
                Err(e) => log::warn!("notifications not loaded: {}", e),
            }
            loading.set(false);
        });
    });

    let delete_one = move |id: i64| {
        let Some(user_id) = session.user_id() else {
            return;
        };
        spawn_local(async move {
            let body = DeleteNotificationRequest {
                user_id,
                notification_id: id,
            };
            match post_json(DELETE_ONE_PATH, &body).await {
                Ok(()) => items.update(|list| remove_notification(list, id)),
                Err(e) => toast.error(format!("No se pudo eliminar la notificación: {}", e)),
            }
        });
    };

    let delete_all = Callback::new(move |_| {
        let Some(user_id) = session.user_id() else {
            return;
        };
        deleting_all.set(true);
        spawn_local(async move {
            match delete(&delete_all_path(user_id)).await {
                Ok(()) => {
                    items.set(Vec::new());
                    toast.success("Notificaciones eliminadas");
                }
                Err(e) => toast.error(format!("No se pudieron eliminar: {}", e)),
            }
            deleting_all.set(false);
            confirm_open.set(false);
        });
    });

    let badge = move || items.with(|list| badge_text(unread_count(list)));

    view! {
        <div class="notifications">
            <button
                class="top-header__icon-btn"
                title="Notificaciones"
                on:click=move |_| is_open.update(|open| *open = !*open)
            >
                {icon("bell")}
                {move || badge().map(|text| view! { <span class="notifications__badge">{text}</span> })}
            </button>

            <Show when=move || is_open.get()>
                <div class="notifications__sheet">
                    <div class="notifications__header">
                        <span>"Notificaciones"</span>
                        <button
                            class="notifications__clear"
                            disabled=move || items.with(|list| list.is_empty())
                            on:click=move |_| confirm_open.set(true)
                        >
                            {icon("trash")}
                            "Eliminar todas"
                        </button>
                    </div>
                    {move || {
                        if loading.get() && items.with(|list| list.is_empty()) {
                            return view! { <div class="notifications__empty">"Cargando..."</div> }.into_any();
                        }
                        let list = items.get();
                        if list.is_empty() {
                            return view! { <div class="notifications__empty">"Sin notificaciones"</div> }.into_any();
                        }
                        list.into_iter().map(|n| {
                            let id = n.id;
                            let when = n
                                .created_at
                                .as_deref()
                                .and_then(parse_iso)
                                .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
                                .unwrap_or_default();
                            view! {
                                <div class="notifications__item" class:notifications__item--unread=!n.leido>
                                    <div class="notifications__item-body">
                                        <div class="notifications__item-title">{n.title().to_string()}</div>
                                        <div class="notifications__item-text">{n.mensaje.clone()}</div>
                                        <div class="notifications__item-date">{when}</div>
                                    </div>
                                    <button
                                        class="notifications__item-delete"
                                        title="Eliminar"
                                        on:click=move |ev: ev::MouseEvent| {
                                            ev.stop_propagation();
                                            delete_one(id);
                                        }
                                    >
                                        {icon("x")}
                                    </button>
                                </div>
                            }
                        }).collect_view().into_any()
                    }}
                </div>
            </Show>

            <ConfirmDialog
                open=confirm_open
                title="Eliminar notificaciones"
                message=Signal::derive(|| "Se eliminarán todas sus notificaciones. ¿Desea continuar?".to_string())
                confirm_label="Eliminar"
                busy=deleting_all
                on_confirm=delete_all
            />
        </div>
    }
}
