//! Phone/password sign-in.

use app::{sync_push_token, AppError, FieldError};
use dioxus::prelude::*;
use ui::{make_cache, session_store, use_services, use_session, SessionState};

use super::FieldMessage;
use crate::Route;

#[component]
pub fn Login() -> Element {
    let services = use_services();
    let mut session = use_session();
    let nav = use_navigator();
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(Vec::<FieldError>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if !session().loading && session().session.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = services.api.clone();
        let platform = services.config.app.platform;
        spawn(async move {
            field_errors.set(Vec::new());
            error.set(None);
            loading.set(true);

            match session_store().login_with(&api, &phone(), &password()).await {
                Ok(current) => {
                    sync_push_token(&api, &make_cache(), platform).await;
                    session.set(SessionState {
                        session: Some(current),
                        loading: false,
                    });
                    nav.replace(Route::Dashboard {});
                }
                Err(AppError::Validation(errors)) => field_errors.set(errors),
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8",

            h1 { class: "mb-8 text-neutral-800 font-bold text-[1.75rem]", "Sign in" }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    div {
                        class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                        "{err}"
                    }
                }

                input {
                    class: "w-full px-3 py-2 border border-neutral-300 rounded",
                    r#type: "tel",
                    placeholder: "Phone",
                    value: phone(),
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
                FieldMessage { errors: field_errors(), field: "phone" }

                input {
                    class: "w-full px-3 py-2 border border-neutral-300 rounded",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                FieldMessage { errors: field_errors(), field: "password" }

                button {
                    class: "w-full px-5 py-2.5 rounded bg-primary-500 text-white font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "New merchant? "
                Link { class: "text-primary-500 no-underline", to: Route::Register {}, "Register" }
            }
        }
    }
}
