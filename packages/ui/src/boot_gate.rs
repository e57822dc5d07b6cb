//! Start-up gate: runs the bootstrap workflow and shows its children only once
//! it reports ready.

use app::{BootOutcome, Bootstrap, Gate, Navigation};
use dioxus::prelude::*;
use tokio::sync::mpsc;

use crate::services::{make_cache, use_services};

#[derive(Clone, Debug, PartialEq)]
enum BootState {
    Starting,
    Ready,
    Blocked(Gate),
}

/// Blocks the app behind the version check.
///
/// On ready, the push listener is spawned for the rest of the process and its
/// navigation requests are forwarded to `on_navigate`.
#[component]
pub fn BootGate(on_navigate: EventHandler<Navigation>, children: Element) -> Element {
    let services = use_services();
    let mut boot = use_signal(|| BootState::Starting);

    let _startup = use_resource(move || {
        let services = services.clone();
        async move {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let bootstrap = Bootstrap::new(
                services.api.clone(),
                make_cache(),
                services.push.clone(),
                services.config.app.clone(),
                tx,
            );
            match bootstrap.run().await {
                BootOutcome::Ready(listener) => {
                    spawn(listener.run());
                    spawn(async move {
                        while let Some(navigation) = rx.recv().await {
                            on_navigate.call(navigation);
                        }
                    });
                    boot.set(BootState::Ready);
                }
                BootOutcome::Blocked(gate) => boot.set(BootState::Blocked(gate)),
            }
        }
    });

    match boot() {
        BootState::Starting => rsx! {
            div {
                class: "flex-1 flex items-center justify-center min-h-screen text-neutral-600",
                "Starting..."
            }
        },
        BootState::Ready => rsx! {
            {children}
        },
        BootState::Blocked(Gate::Connectivity) => rsx! {
            GateAlert {
                title: "No connection",
                message: "Could not reach the server. Check your internet connection and restart the app.",
            }
        },
        BootState::Blocked(Gate::UpdateRequired { store_url, .. }) => rsx! {
            GateAlert {
                title: "Update required",
                message: "This version of the app is no longer supported. Please install the latest version to continue.",
                if let Some(url) = store_url {
                    a {
                        class: "mt-4 px-5 py-2.5 rounded bg-primary-500 text-white no-underline",
                        href: "{url}",
                        "Update now"
                    }
                }
            }
        },
    }
}

#[component]
fn GateAlert(title: String, message: String, children: Element) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 text-center",
            role: "alertdialog",
            h2 { class: "m-0 mb-2 font-semibold text-neutral-800 text-lg", "{title}" }
            p { class: "text-neutral-600 text-[0.9375rem]", "{message}" }
            {children}
        }
    }
}
