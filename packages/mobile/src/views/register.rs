//! Merchant sign-up: phone, OTP, then the details form.

use api::Registration;
use app::{AppError, FieldError, RegistrationFlow};
use dioxus::prelude::*;
use ui::use_services;

use super::FieldMessage;
use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Phone,
    Otp,
    Details,
    Done,
}

#[component]
pub fn Register() -> Element {
    let services = use_services();
    let flow = RegistrationFlow::new(services.api.clone());
    let mut step = use_signal(|| Step::Phone);
    let mut phone = use_signal(String::new);
    let mut otp = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut branch_code = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut field_errors = use_signal(Vec::<FieldError>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let send_flow = flow.clone();
    let handle_send = move |evt: FormEvent| {
        evt.prevent_default();
        let flow = send_flow.clone();
        spawn(async move {
            field_errors.set(Vec::new());
            error.set(None);
            busy.set(true);
            match flow.send_otp(&phone()).await {
                Ok(ack) => {
                    notice.set(ack.message);
                    step.set(Step::Otp);
                }
                Err(e) => show_error(e, field_errors, error),
            }
            busy.set(false);
        });
    };

    let verify_flow = flow.clone();
    let handle_verify = move |evt: FormEvent| {
        evt.prevent_default();
        let flow = verify_flow.clone();
        spawn(async move {
            field_errors.set(Vec::new());
            error.set(None);
            busy.set(true);
            match flow.verify_otp(&phone(), &otp()).await {
                Ok(_) => step.set(Step::Details),
                Err(e) => show_error(e, field_errors, error),
            }
            busy.set(false);
        });
    };

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let flow = flow.clone();
        spawn(async move {
            field_errors.set(Vec::new());
            error.set(None);
            busy.set(true);
            let form = Registration {
                name: name(),
                phone: phone(),
                password: password(),
                branch_code: branch_code(),
                address: Some(address()),
                email: Some(email()),
            };
            match flow.register(&form).await {
                Ok(ack) => {
                    notice.set(ack.message);
                    step.set(Step::Done);
                }
                Err(e) => show_error(e, field_errors, error),
            }
            busy.set(false);
        });
    };

    let input_class = "w-full px-3 py-2 border border-neutral-300 rounded";
    let button_class = "w-full px-5 py-2.5 rounded bg-primary-500 text-white font-medium";

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8",
            h1 { class: "mb-6 text-neutral-800 font-bold text-[1.75rem]", "Register" }

            if let Some(err) = error() {
                div {
                    class: "mb-3 px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }
            if let Some(text) = notice() {
                p { class: "mb-3 text-neutral-600 text-[0.8125rem]", "{text}" }
            }

            {match step() {
                Step::Phone => rsx! {
                    form {
                        onsubmit: handle_send,
                        class: "flex flex-col gap-3 w-full max-w-[320px]",
                        input {
                            class: input_class,
                            r#type: "tel",
                            placeholder: "Phone",
                            value: phone(),
                            oninput: move |evt: FormEvent| phone.set(evt.value()),
                        }
                        FieldMessage { errors: field_errors(), field: "phone" }
                        button { class: button_class, r#type: "submit", disabled: busy(), "Send code" }
                    }
                },
                Step::Otp => rsx! {
                    form {
                        onsubmit: handle_verify,
                        class: "flex flex-col gap-3 w-full max-w-[320px]",
                        input {
                            class: input_class,
                            placeholder: "6-digit code",
                            value: otp(),
                            oninput: move |evt: FormEvent| otp.set(evt.value()),
                        }
                        FieldMessage { errors: field_errors(), field: "otp" }
                        button { class: button_class, r#type: "submit", disabled: busy(), "Verify" }
                    }
                },
                Step::Details => rsx! {
                    form {
                        onsubmit: handle_register,
                        class: "flex flex-col gap-3 w-full max-w-[320px]",
                        input {
                            class: input_class,
                            placeholder: "Business name",
                            value: name(),
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                        FieldMessage { errors: field_errors(), field: "name" }
                        input {
                            class: input_class,
                            r#type: "password",
                            placeholder: "Password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        FieldMessage { errors: field_errors(), field: "password" }
                        input {
                            class: input_class,
                            placeholder: "Branch code",
                            value: branch_code(),
                            oninput: move |evt: FormEvent| branch_code.set(evt.value()),
                        }
                        FieldMessage { errors: field_errors(), field: "branch" }
                        input {
                            class: input_class,
                            placeholder: "Address (optional)",
                            value: address(),
                            oninput: move |evt: FormEvent| address.set(evt.value()),
                        }
                        input {
                            class: input_class,
                            r#type: "email",
                            placeholder: "Email (optional)",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                        FieldMessage { errors: field_errors(), field: "email" }
                        FieldMessage { errors: field_errors(), field: "phone" }
                        button { class: button_class, r#type: "submit", disabled: busy(), "Create account" }
                    }
                },
                Step::Done => rsx! {
                    Link { class: "text-primary-500 no-underline", to: Route::Login {}, "Continue to sign in" }
                },
            }}
        }
    }
}

fn show_error(
    e: AppError,
    mut field_errors: Signal<Vec<FieldError>>,
    mut error: Signal<Option<String>>,
) {
    match e {
        AppError::Validation(errors) => field_errors.set(errors),
        other => {
            tracing::warn!(error = %other, "registration step failed");
            error.set(Some(other.to_string()));
        }
    }
}
