use dioxus::prelude::*;
use store::CourierConfig;
use tracing_subscriber::EnvFilter;
use views::{Dashboard, Login, Notifications, ParcelDetail, Parcels, Register, Shell};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/notifications")]
        Notifications {},
        #[route("/parcels")]
        Parcels {},
        #[route("/parcels/:code")]
        ParcelDetail { code: String },
}

fn main() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    dioxus::launch(App);
}

/// Read `courier.toml` from the data directory, then apply `COURIER_*` overrides.
fn load_config() -> CourierConfig {
    let path = ui::data_dir().join(CourierConfig::filename());
    let config = match std::fs::read_to_string(&path) {
        Ok(text) => CourierConfig::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            CourierConfig::default()
        }),
        Err(_) => CourierConfig::default(),
    };
    config.with_env_overrides()
}

#[component]
fn App() -> Element {
    let services = use_hook(|| ui::Services::new(load_config()).map_err(|e| e.to_string()));
    let services = match services {
        Ok(services) => services,
        Err(e) => {
            tracing::error!(error = %e, "cannot start with this API configuration");
            return rsx! {
                document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
                p { class: "p-8 text-center text-red-600", "Cannot start: {e}" }
            };
        }
    };
    use_context_provider(|| services);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::SessionProvider {
            ui::InboxProvider {
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn Root() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();
    let state = session();
    if !state.loading {
        if state.session.is_some() {
            nav.replace(Route::Dashboard {});
        } else {
            nav.replace(Route::Login {});
        }
    }
    rsx! {}
}
