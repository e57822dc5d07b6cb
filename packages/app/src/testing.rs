//! In-memory [`CourierApi`] used by the workflow tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api::{
    ApiError, ApiMessage, CourierApi, Credentials, OtpRequest, OtpVerification, PromoImage,
    Registration, TokenUpdate,
};
use serde_json::{Map, Value};
use store::{NotificationFeed, Parcel, Platform, Role};
use tokio::sync::Notify;

fn offline() -> ApiError {
    ApiError::Status {
        status: 503,
        url: "fake".to_string(),
    }
}

/// Scripted responses and recorded calls.
#[derive(Debug, Default)]
pub(crate) struct Fake {
    /// `None` makes the version check fail.
    pub required_build: Option<u64>,
    pub version_checks: usize,

    pub fail_token_update: bool,
    pub token_updates: Vec<(Role, TokenUpdate)>,

    /// `None` makes the notification fetch fail.
    pub feed: Option<NotificationFeed>,
    pub notification_calls: Vec<(Role, String, String)>,
    pub fail_mark_all_read: bool,
    pub mark_all_read_calls: Vec<(Role, String, String)>,

    pub reject_otp: bool,
    pub otp_requests: Vec<OtpRequest>,
    pub otp_verifications: Vec<OtpVerification>,
    pub registrations: Vec<Registration>,
    pub login_profile: Option<Map<String, Value>>,

    pub fail_data: bool,
    pub fail_promo: bool,
    pub driver_parcels: Vec<Parcel>,
    pub entity_parcels: Vec<Parcel>,
    pub dashboard: Value,
    pub balances: Vec<Value>,
    pub data_calls: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct FakeApi {
    state: Arc<Mutex<Fake>>,
    /// When set, `mark_all_read` waits for a notification before answering.
    mark_gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn state(&self) -> MutexGuard<'_, Fake> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_mark_gate(mut self, gate: Arc<Notify>) -> Self {
        self.mark_gate = Some(gate);
        self
    }
}

impl CourierApi for FakeApi {
    async fn required_build_number(&self, _platform: Platform) -> Result<u64, ApiError> {
        let mut state = self.state();
        state.version_checks += 1;
        state.required_build.ok_or_else(offline)
    }

    async fn update_token(&self, role: Role, update: &TokenUpdate) -> Result<(), ApiError> {
        let mut state = self.state();
        state.token_updates.push((role, update.clone()));
        if state.fail_token_update {
            Err(offline())
        } else {
            Ok(())
        }
    }

    async fn notifications(
        &self,
        role: Role,
        branch_code: &str,
        entity_code: &str,
    ) -> Result<NotificationFeed, ApiError> {
        let mut state = self.state();
        state
            .notification_calls
            .push((role, branch_code.to_string(), entity_code.to_string()));
        state.feed.clone().ok_or_else(offline)
    }

    async fn mark_all_read(
        &self,
        role: Role,
        branch_code: &str,
        entity_code: &str,
    ) -> Result<(), ApiError> {
        let fail = {
            let mut state = self.state();
            state
                .mark_all_read_calls
                .push((role, branch_code.to_string(), entity_code.to_string()));
            state.fail_mark_all_read
        };
        if let Some(gate) = &self.mark_gate {
            gate.notified().await;
        }
        if fail {
            Err(offline())
        } else {
            Ok(())
        }
    }

    async fn send_otp(&self, request: &OtpRequest) -> Result<ApiMessage, ApiError> {
        let mut state = self.state();
        state.otp_requests.push(request.clone());
        if state.reject_otp {
            return Err(ApiError::Rejected("Phone already registered".to_string()));
        }
        Ok(ApiMessage {
            success: true,
            message: Some("OTP sent".to_string()),
        })
    }

    async fn verify_otp(&self, verification: &OtpVerification) -> Result<ApiMessage, ApiError> {
        let mut state = self.state();
        state.otp_verifications.push(verification.clone());
        if state.reject_otp {
            return Err(ApiError::Rejected("Invalid OTP".to_string()));
        }
        Ok(ApiMessage {
            success: true,
            message: None,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<ApiMessage, ApiError> {
        self.state().registrations.push(registration.clone());
        Ok(ApiMessage {
            success: true,
            message: Some("Registered".to_string()),
        })
    }

    async fn login(&self, _credentials: &Credentials) -> Result<Map<String, Value>, ApiError> {
        self.state()
            .login_profile
            .clone()
            .ok_or_else(|| ApiError::Rejected("Wrong phone or password".to_string()))
    }

    async fn driver_parcels(&self, driver_id: &str) -> Result<Vec<Parcel>, ApiError> {
        let mut state = self.state();
        state.data_calls.push(format!("driver_parcels/{driver_id}"));
        if state.fail_data {
            return Err(offline());
        }
        Ok(state.driver_parcels.clone())
    }

    async fn entity_parcels(&self, entity_id: &str) -> Result<Vec<Parcel>, ApiError> {
        let mut state = self.state();
        state.data_calls.push(format!("entity_parcels/{entity_id}"));
        if state.fail_data {
            return Err(offline());
        }
        Ok(state.entity_parcels.clone())
    }

    async fn driver_dashboard(&self, driver_id: &str) -> Result<Value, ApiError> {
        let mut state = self.state();
        state.data_calls.push(format!("driver_dashboard/{driver_id}"));
        if state.fail_data {
            return Err(offline());
        }
        Ok(state.dashboard.clone())
    }

    async fn entity_balances(&self, entity_id: &str) -> Result<Vec<Value>, ApiError> {
        let mut state = self.state();
        state.data_calls.push(format!("entity_balances/{entity_id}"));
        if state.fail_data {
            return Err(offline());
        }
        Ok(state.balances.clone())
    }

    async fn promo_images(&self, branch_code: &str) -> Result<Vec<PromoImage>, ApiError> {
        let mut state = self.state();
        state.data_calls.push(format!("promo_images/{branch_code}"));
        if state.fail_promo {
            return Err(offline());
        }
        Ok(vec![PromoImage {
            image_url: format!("https://cdn.test/{branch_code}.png"),
            extra: Map::new(),
        }])
    }
}
