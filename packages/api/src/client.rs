//! HTTP client for the courier API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use store::config::ApiConfig;
use store::{NotificationFeed, Parcel, Platform, Role};

use crate::endpoints;
use crate::error::ApiError;
use crate::models::{
    ApiMessage, Credentials, LoginResponse, OtpRequest, OtpVerification, PromoImage, Registration,
    TokenUpdate, UpdateCheck,
};
use crate::CourierApi;

/// `reqwest`-backed implementation of [`CourierApi`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST json");
        let response = self.http.post(&url).json(body).send().await?;
        check_status(&response)
    }

    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url).send().await?;
        check_status(&response)
    }

    async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "POST form");
        let response = self.http.post(&url).form(form).send().await?;
        decode(response).await
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    check_status(&response)?;
    let url = response.url().to_string();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("{url}: {e}")))
}

impl CourierApi for ApiClient {
    async fn required_build_number(&self, platform: Platform) -> Result<u64, ApiError> {
        let check: UpdateCheck = self.get_json(&endpoints::check_update(platform)).await?;
        check.required_build_number()
    }

    async fn update_token(&self, role: Role, update: &TokenUpdate) -> Result<(), ApiError> {
        self.post_json(&endpoints::update_token(role), update).await
    }

    async fn notifications(
        &self,
        role: Role,
        branch_code: &str,
        entity_code: &str,
    ) -> Result<NotificationFeed, ApiError> {
        self.get_json(&endpoints::notifications(role, branch_code, entity_code))
            .await
    }

    async fn mark_all_read(
        &self,
        role: Role,
        branch_code: &str,
        entity_code: &str,
    ) -> Result<(), ApiError> {
        self.post_empty(&endpoints::mark_all_read(role, branch_code, entity_code))
            .await
    }

    async fn send_otp(&self, request: &OtpRequest) -> Result<ApiMessage, ApiError> {
        let ack: ApiMessage = self.post_form(endpoints::SEND_OTP, request).await?;
        ack.into_result()
    }

    async fn verify_otp(&self, verification: &OtpVerification) -> Result<ApiMessage, ApiError> {
        let ack: ApiMessage = self.post_form(endpoints::VERIFY_OTP, verification).await?;
        ack.into_result()
    }

    async fn register(&self, registration: &Registration) -> Result<ApiMessage, ApiError> {
        let ack: ApiMessage = self.post_form(endpoints::REGISTER, registration).await?;
        ack.into_result()
    }

    async fn login(&self, credentials: &Credentials) -> Result<Map<String, Value>, ApiError> {
        let response: LoginResponse = self.post_form(endpoints::LOGIN, credentials).await?;
        response.into_profile()
    }

    async fn driver_parcels(&self, driver_id: &str) -> Result<Vec<Parcel>, ApiError> {
        self.get_json(&endpoints::driver_parcels(driver_id)).await
    }

    async fn entity_parcels(&self, entity_id: &str) -> Result<Vec<Parcel>, ApiError> {
        self.get_json(&endpoints::entity_parcels(entity_id)).await
    }

    async fn driver_dashboard(&self, driver_id: &str) -> Result<Value, ApiError> {
        self.get_json(&endpoints::driver_dashboard(driver_id)).await
    }

    async fn entity_balances(&self, entity_id: &str) -> Result<Vec<Value>, ApiError> {
        self.get_json(&endpoints::entity_balances(entity_id)).await
    }

    async fn promo_images(&self, branch_code: &str) -> Result<Vec<PromoImage>, ApiError> {
        self.get_json(&endpoints::promo_images(branch_code)).await
    }
}
