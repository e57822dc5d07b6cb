//! Layout wrapping every route: start-up gate, then the page and the tab bar.

use app::Navigation;
use dioxus::prelude::*;
use ui::{use_session, BootGate, UnreadBadge};

use crate::Route;

#[component]
pub fn Shell() -> Element {
    let navigator = use_navigator();
    let session = use_session();
    let logged_in = session().session.is_some();

    rsx! {
        BootGate {
            on_navigate: move |navigation: Navigation| match navigation {
                Navigation::ParcelDetail(parcel) => {
                    if let Some(code) = parcel.code() {
                        navigator.push(Route::ParcelDetail { code });
                    }
                }
            },
            div {
                class: "flex flex-col min-h-screen",
                div { class: "flex-1", Outlet::<Route> {} }
                if logged_in {
                    nav {
                        class: "tab-bar",
                        Link { to: Route::Dashboard {}, active_class: "active", "Home" }
                        Link { to: Route::Parcels {}, active_class: "active", "Parcels" }
                        Link {
                            to: Route::Notifications {},
                            active_class: "active",
                            "Inbox"
                            UnreadBadge {}
                        }
                    }
                }
            }
        }
    }
}
