use dioxus::prelude::*;
use store::Parcel;
use ui::{use_session, ParcelSearch};

use crate::Route;

#[component]
pub fn Parcels() -> Element {
    let session = use_session();
    let nav = use_navigator();

    let Some(current) = session().session else {
        return rsx! {};
    };

    rsx! {
        ParcelSearch {
            role: current.role,
            on_select: move |parcel: Parcel| {
                if let Some(code) = parcel.code() {
                    nav.push(Route::ParcelDetail { code });
                }
            },
        }
    }
}
