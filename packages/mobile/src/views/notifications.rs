use dioxus::prelude::*;
use store::Notification;
use ui::NotificationList;

use crate::Route;

#[component]
pub fn Notifications() -> Element {
    let nav = use_navigator();

    let handle_open = move |notification: Notification| {
        if let Some(code) = notification.parcel_code {
            nav.push(Route::ParcelDetail { code });
        }
    };

    rsx! {
        NotificationList { on_open: handle_open }
    }
}
