//! Search box over the cached parcel list.

use app::ParcelIndex;
use dioxus::prelude::*;
use store::{Parcel, Role};

use crate::services::make_cache;

/// Filters the role's cached parcels on every keystroke. Results stay hidden
/// until something is typed.
#[component]
pub fn ParcelSearch(role: Role, on_select: EventHandler<Parcel>) -> Element {
    let mut query = use_signal(String::new);
    let index = use_resource(move || async move { ParcelIndex::load(&make_cache(), role).await });

    let results: Vec<Parcel> = match &*index.read() {
        Some(index) => index.query(&query()).into_iter().cloned().collect(),
        None => Vec::new(),
    };
    let no_match = !query().trim().is_empty() && results.is_empty();

    rsx! {
        div {
            class: "flex flex-col gap-2 p-4",
            input {
                class: "w-full px-3 py-2 border border-neutral-300 rounded",
                r#type: "search",
                placeholder: "Search parcels",
                value: query(),
                oninput: move |evt: FormEvent| query.set(evt.value()),
            }
            if no_match {
                p { class: "text-neutral-600 text-[0.8125rem]", "No matching parcels" }
            }
            for parcel in results {
                ParcelRow { key: "{parcel.code().unwrap_or_default()}", parcel: parcel.clone(), on_select: on_select }
            }
        }
    }
}

#[component]
pub fn ParcelRow(parcel: Parcel, on_select: EventHandler<Parcel>) -> Element {
    let code = parcel.code().unwrap_or_default();
    let recipient = parcel.recipient_name().unwrap_or_default();
    let city = parcel.city_name().unwrap_or_default();
    let status = parcel.status_name().unwrap_or_default();

    rsx! {
        button {
            class: "flex justify-between w-full px-3 py-2 border-b border-neutral-100 text-left",
            onclick: move |_| on_select.call(parcel.clone()),
            div {
                div { class: "font-medium", "#{code} {recipient}" }
                div { class: "text-[0.8125rem] text-neutral-600", "{city}" }
            }
            span { class: "text-xs text-neutral-600", "{status}" }
        }
    }
}
