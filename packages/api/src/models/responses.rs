//! # Response bodies
//!
//! Most write endpoints answer `{ Success, Message }`; [`ApiMessage::into_result`]
//! turns a `Success: false` answer into [`ApiError::Rejected`] so callers only
//! see successful messages on the `Ok` path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// `{ Success, Message }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(rename = "Success", default)]
    pub success: bool,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "request was rejected".to_string()),
            ))
        }
    }
}

/// Login acknowledgement carrying the user profile in `Data`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Success", default)]
    pub success: bool,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "Data", default)]
    pub data: Option<Map<String, Value>>,
}

impl LoginResponse {
    /// The profile of a successful login.
    pub fn into_profile(self) -> Result<Map<String, Value>, ApiError> {
        let ack = ApiMessage {
            success: self.success,
            message: self.message,
        };
        ack.into_result()?;
        self.data
            .ok_or_else(|| ApiError::Decode("login response has no Data".to_string()))
    }
}

/// Response of `GET /api/checkUpdate/{platform-id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UpdateCheck {
    #[serde(rename = "strValue")]
    pub value: Value,
}

impl UpdateCheck {
    /// The required build number. The server sends it as a string or a number.
    pub fn required_build_number(&self) -> Result<u64, ApiError> {
        let parsed = match &self.value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| {
            ApiError::Decode(format!("required build number {} is not a number", self.value))
        })
    }
}

/// One promotional banner for a branch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromoImage {
    #[serde(rename = "ImageUrl", alias = "imageUrl", alias = "Url", default)]
    pub image_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
