use crate::shared::icons::icon;
use crate::shared::toast::use_toast;
use crate::system::session::use_session;
use leptos::prelude::*;

#[component]
pub fn UserMenu() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let is_open = RwSignal::new(false);

    let initials = move || {
        session
            .user
            .with(|u| u.as_ref().map(|u| u.initials()).unwrap_or_else(|| "??".to_string()))
    };
    let name = move || session.user.with(|u| u.as_ref().map(|u| u.nombre.clone()).unwrap_or_default());
    let email = move || session.user.with(|u| u.as_ref().map(|u| u.correo.clone()).unwrap_or_default());

    let logout = move |_| {
        is_open.set(false);
        toast.info("Sesión cerrada");
        session.logout();
    };

    view! {
        <div class="user-menu">
            <button
                class="user-menu__avatar"
                on:click=move |_| is_open.update(|open| *open = !*open)
                title=name
            >
                {initials}
            </button>
            <Show when=move || is_open.get()>
                <div class="user-menu__panel">
                    <div class="user-menu__name">{name}</div>
                    <div class="user-menu__email">{email}</div>
                    <div class="user-menu__role">{move || session.role()}</div>
                    <button class="user-menu__item" on:click=logout>
                        {icon("log-out")}
                        <span>"Cerrar sesión"</span>
                    </button>
                </div>
            </Show>
        </div>
    }
}
