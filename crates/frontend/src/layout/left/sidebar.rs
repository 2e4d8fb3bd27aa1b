//! Sidebar with collapsible menu groups. Every leaf opens a tab.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{keys, tab_label_for_key};
use crate::shared::icons::icon;
use crate::system::session::use_session;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (tab key, label, icon)
    hidden_for_seller: bool,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: keys::OPERATIONS,
            label: tab_label_for_key(keys::OPERATIONS),
            icon: "dashboard",
            items: vec![],
            hidden_for_seller: true,
        },
        MenuGroup {
            id: keys::INVENTORY,
            label: tab_label_for_key(keys::INVENTORY),
            icon: "inventory",
            items: vec![],
            hidden_for_seller: false,
        },
        MenuGroup {
            id: "catalog",
            label: "Catálogo",
            icon: "products",
            items: vec![
                (keys::PRODUCT_NEW, tab_label_for_key(keys::PRODUCT_NEW), "plus"),
                (
                    keys::PRESENTATION_NEW,
                    tab_label_for_key(keys::PRESENTATION_NEW),
                    "tag",
                ),
            ],
            hidden_for_seller: true,
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();

    let is_seller = session
        .user
        .with_untracked(|u| u.as_ref().map(|u| u.is_seller()).unwrap_or(true));

    let expanded_groups = RwSignal::new(vec!["catalog".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().filter_map(|group| {
                if group.hidden_for_seller && is_seller {
                    return None;
                }

                let group_id = group.id.to_string();
                let has_children = !group.items.is_empty();
                let group_id_stored = StoredValue::new(group_id.clone());
                let group_id_for_exp = group_id.clone();
                let group_id_for_click = group_id.clone();

                Some(view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                let gid = group_id_stored.get_value();
                                !has_children && ctx.active.get().as_ref() == Some(&gid)
                            }
                            style:padding-left="12px"
                            on:click=move |_| {
                                if has_children {
                                    let gid = group_id_for_click.clone();
                                    expanded_groups.update(move |items| {
                                        if let Some(pos) = items.iter().position(|x| x == &gid) {
                                            items.remove(pos);
                                        } else {
                                            items.push(gid);
                                        }
                                    });
                                } else {
                                    ctx.open_tab(group.id, group.label);
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            {has_children.then(|| {
                                let gid_exp = group_id_for_exp.clone();
                                view! {
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_exp)
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                }
                            })}
                        </div>

                        {has_children.then(|| {
                            let gid_show = group_id.clone();
                            let items_stored = StoredValue::new(group.items.clone());
                            view! {
                                <Show when=move || expanded_groups.get().contains(&gid_show)>
                                    <div class="app-sidebar__children">
                                        {items_stored.get_value().into_iter().map(|(id, label, icon_name)| {
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.get().as_deref() == Some(id)
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_tab(id, label)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            }
                        })}
                    </div>
                })
            }).collect_view()}
        </div>
    }
}
