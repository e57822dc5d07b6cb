//! One parcel, read from the role's cached list.

use dioxus::prelude::*;
use store::Parcel;
use ui::{make_cache, use_session};

use super::field_rows;

#[component]
pub fn ParcelDetail(code: String) -> Element {
    let session = use_session();
    let mut code_signal = use_signal(|| code.clone());
    if *code_signal.peek() != code {
        code_signal.set(code.clone());
    }

    let parcel = use_resource(move || {
        let code = code_signal();
        async move {
            let role = session().session?.role;
            make_cache().find_parcel(role, &code).await
        }
    });

    let loaded = parcel.read().clone();
    match loaded {
        None => rsx! {
            p { class: "p-4 text-neutral-600", "Loading..." }
        },
        Some(None) => rsx! {
            p { class: "p-4 text-neutral-600", "Parcel #{code} is not in your list yet." }
        },
        Some(Some(parcel)) => rsx! {
            ParcelCard { parcel: parcel }
        },
    }
}

#[component]
fn ParcelCard(parcel: Parcel) -> Element {
    let rows = field_rows(parcel.fields());
    let code = parcel.code().unwrap_or_default();

    rsx! {
        div {
            class: "flex flex-col gap-1 p-4",
            h1 { class: "m-0 mb-2 text-lg font-semibold", "Parcel #{code}" }
            for (label, value) in rows {
                div {
                    key: "{label}",
                    class: "flex justify-between py-1 border-b border-neutral-100 text-[0.875rem]",
                    span { class: "text-neutral-600", "{label}" }
                    span { "{value}" }
                }
            }
        }
    }
}
