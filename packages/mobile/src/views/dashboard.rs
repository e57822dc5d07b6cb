//! Home screen: the role's summary data and promotional banners.

use api::PromoImage;
use app::{promo_images, refresh_role_data, RoleData};
use dioxus::prelude::*;
use ui::{make_cache, session_store, use_services, use_session, SessionState};

use super::value_rows;
use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let mut session = use_session();
    let nav = use_navigator();
    let mut data = use_signal(|| Option::<RoleData>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut promos = use_signal(Vec::<PromoImage>::new);

    if !session().loading && session().session.is_none() {
        nav.replace(Route::Login {});
    }

    let mut loader = use_resource(move || {
        let api = services.api.clone();
        async move {
            let Some(current) = session().session else {
                return;
            };
            let cache = make_cache();
            match refresh_role_data(&api, &cache, &current).await {
                Ok(loaded) => {
                    data.set(Some(loaded));
                    error.set(None);
                    // A notification opened before the parcel list was cached
                    if let Some(code) = cache.take_pending_parcel_code().await {
                        nav.push(Route::ParcelDetail { code });
                    }
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            promos.set(promo_images(&api, &current).await);
        }
    });

    let handle_logout = move |_| {
        spawn(async move {
            session_store().logout().await;
            session.set(SessionState {
                session: None,
                loading: false,
            });
            nav.replace(Route::Login {});
        });
    };

    let name = session()
        .session
        .and_then(|s| s.display_name)
        .unwrap_or_default();

    rsx! {
        div {
            class: "flex flex-col gap-4 p-4",
            div {
                class: "flex items-center justify-between",
                h1 { class: "m-0 text-lg font-semibold", "Hello {name}" }
                div {
                    class: "flex gap-3",
                    button { class: "text-sm text-primary-500", onclick: move |_| loader.restart(), "Refresh" }
                    button { class: "text-sm text-neutral-600", onclick: handle_logout, "Log out" }
                }
            }

            for image in promos() {
                img { key: "{image.image_url}", class: "w-full rounded", src: "{image.image_url}" }
            }

            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }

            {match data() {
                Some(RoleData::Driver { dashboard, parcels }) => rsx! {
                    Summary { title: "Today", rows: value_rows(&dashboard) }
                    p { class: "text-neutral-600", "{parcels.len()} assigned parcels" }
                },
                Some(RoleData::Entity { balances, parcels }) => rsx! {
                    for (i, balance) in balances.into_iter().enumerate() {
                        Summary { key: "{i}", title: "Balance", rows: value_rows(&balance) }
                    }
                    p { class: "text-neutral-600", "{parcels.len()} parcels" }
                },
                None => rsx! {
                    p { class: "text-neutral-600", "Loading..." }
                },
            }}
        }
    }
}

#[component]
fn Summary(title: String, rows: Vec<(String, String)>) -> Element {
    rsx! {
        div {
            class: "p-3 border border-neutral-200 rounded",
            h2 { class: "m-0 mb-2 text-base font-semibold", "{title}" }
            for (label, value) in rows {
                div {
                    key: "{label}",
                    class: "flex justify-between text-[0.875rem]",
                    span { class: "text-neutral-600", "{label}" }
                    span { "{value}" }
                }
            }
        }
    }
}
