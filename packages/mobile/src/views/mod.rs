use app::FieldError;
use dioxus::prelude::*;
use serde_json::{Map, Value};

mod shell;
pub use shell::Shell;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::Dashboard;

mod notifications;
pub use notifications::Notifications;

mod parcels;
pub use parcels::Parcels;

mod parcel_detail;
pub use parcel_detail::ParcelDetail;

/// Inline message for one form field, if it has one.
#[component]
fn FieldMessage(errors: Vec<FieldError>, field: &'static str) -> Element {
    let Some(error) = errors.iter().find(|e| e.field == field) else {
        return rsx! {};
    };
    let message = error.message.clone();
    rsx! {
        p { class: "field-error m-0", "{message}" }
    }
}

/// Label/value pairs for the scalar fields of a JSON object.
fn value_rows(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(fields) => field_rows(fields),
        _ => Vec::new(),
    }
}

fn field_rows(fields: &Map<String, Value>) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}
