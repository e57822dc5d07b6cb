//! # Request bodies
//!
//! [`TokenUpdate`] is sent as JSON; the registration and login bodies are sent
//! form-encoded, so their field names are the form keys the server reads.

use serde::Serialize;
use store::{Platform, UserId};

/// Body of `POST /{role}/updateToken`.
///
/// Exactly one of the two token fields is set, matching the running platform;
/// the other serializes as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenUpdate {
    #[serde(rename = "Id")]
    pub id: UserId,
    #[serde(rename = "IosToken")]
    pub ios_token: Option<String>,
    #[serde(rename = "AndroidToken")]
    pub android_token: Option<String>,
}

impl TokenUpdate {
    pub fn new(id: UserId, platform: Platform, token: &str) -> Self {
        let token = Some(token.to_string());
        match platform {
            Platform::Android => Self {
                id,
                ios_token: None,
                android_token: token,
            },
            Platform::Ios => Self {
                id,
                ios_token: token,
                android_token: None,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OtpRequest {
    #[serde(rename = "Phone")]
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OtpVerification {
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Otp")]
    pub otp: String,
}

/// Merchant sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Registration {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "BranchCode")]
    pub branch_code: String,
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Password")]
    pub password: String,
}
