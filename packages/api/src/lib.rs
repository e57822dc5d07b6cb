//! # API crate: client for the courier backend
//!
//! Everything the app sends to or reads from the remote HTTP API goes through
//! the [`CourierApi`] trait. [`ApiClient`] is the `reqwest` implementation;
//! the `app` crate is generic over the trait so its workflows can be tested
//! against in-memory fakes.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL handling, JSON/form requests, status and body decoding |
//! | [`endpoints`] | Path builders for every endpoint, including the role-dependent ones |
//! | [`error`] | [`ApiError`] |
//! | [`models`] | Request bodies (token update, OTP, registration, login) and response bodies |
//!
//! ## Endpoints
//!
//! - **Version gate**: `required_build_number`
//! - **Push token**: `update_token`
//! - **Inbox**: `notifications`, `mark_all_read`
//! - **Registration / login**: `send_otp`, `verify_otp`, `register`, `login`
//! - **Role data**: `driver_parcels`, `entity_parcels`, `driver_dashboard`,
//!   `entity_balances`, `promo_images`

use std::future::Future;

use serde_json::{Map, Value};

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    ApiMessage, Credentials, OtpRequest, OtpVerification, PromoImage, Registration, TokenUpdate,
};

pub use store::{Notification, NotificationFeed, Parcel, Platform, Role, Session, UserId};

/// The remote courier API.
pub trait CourierApi {
    /// Minimum build number the server accepts for `platform`.
    fn required_build_number(
        &self,
        platform: Platform,
    ) -> impl Future<Output = Result<u64, ApiError>>;

    /// Register the device's push token for the user. `Ok` means the server
    /// answered with a success status.
    fn update_token(
        &self,
        role: Role,
        update: &TokenUpdate,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn notifications(
        &self,
        role: Role,
        branch_code: &str,
        entity_code: &str,
    ) -> impl Future<Output = Result<NotificationFeed, ApiError>>;

    fn mark_all_read(
        &self,
        role: Role,
        branch_code: &str,
        entity_code: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn send_otp(&self, request: &OtpRequest) -> impl Future<Output = Result<ApiMessage, ApiError>>;

    fn verify_otp(
        &self,
        verification: &OtpVerification,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>>;

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>>;

    /// Log in and return the raw user profile.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Map<String, Value>, ApiError>>;

    fn driver_parcels(
        &self,
        driver_id: &str,
    ) -> impl Future<Output = Result<Vec<Parcel>, ApiError>>;

    fn entity_parcels(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Vec<Parcel>, ApiError>>;

    fn driver_dashboard(&self, driver_id: &str) -> impl Future<Output = Result<Value, ApiError>>;

    fn entity_balances(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, ApiError>>;

    fn promo_images(
        &self,
        branch_code: &str,
    ) -> impl Future<Output = Result<Vec<PromoImage>, ApiError>>;
}
