//! # Start-up workflow
//!
//! [`Bootstrap::run`] runs once per process start, before the main UI, in a
//! fixed order:
//!
//! 1. **Version gate**: compare the local build number with the server's
//!    required one. A failed check or an outdated build blocks start-up.
//! 2. **Permission and token**: ask for notification permission and make sure
//!    a push token is stored.
//! 3. **Listener**: subscribe a [`PushListener`] to the gateway.
//! 4. **Token sync**: register the stored token for the logged-in user.
//!
//! Only step 1 can stop the app. Steps 2–4 log their failures and carry on,
//! and there is no automatic retry: a blocked start is retried by running the
//! workflow again.

use api::CourierApi;
use store::{AppConfig, KeyValueStore, LocalCache};
use tokio::sync::mpsc;

use crate::listener::{Navigation, PushListener};
use crate::push::PushGateway;
use crate::token_sync::sync_push_token;

const STORE_URL_SCHEMES: [&str; 4] = ["https://", "http://", "market://", "itms-apps://"];

/// Why start-up stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// The version check could not be completed.
    Connectivity,
    /// This build is older than the server accepts. `store_url` is `None`
    /// when the configured listing is not a usable link.
    UpdateRequired {
        required: u64,
        current: u64,
        store_url: Option<String>,
    },
}

pub enum BootOutcome<S: KeyValueStore, G: PushGateway> {
    Ready(PushListener<S, G>),
    Blocked(Gate),
}

impl<S: KeyValueStore, G: PushGateway> BootOutcome<S, G> {
    pub fn gate(&self) -> Option<&Gate> {
        match self {
            BootOutcome::Ready(_) => None,
            BootOutcome::Blocked(gate) => Some(gate),
        }
    }
}

fn usable_store_url(url: &str) -> Option<String> {
    let url = url.trim();
    let valid = STORE_URL_SCHEMES
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme));
    if valid {
        Some(url.to_string())
    } else {
        tracing::error!(url, "configured store URL is not a usable link");
        None
    }
}

/// The listener gets its own handle on the cache, so the store must be `Clone`.
pub struct Bootstrap<A: CourierApi, S: KeyValueStore + Clone, G: PushGateway + Clone> {
    api: A,
    cache: LocalCache<S>,
    gateway: G,
    config: AppConfig,
    navigation: mpsc::UnboundedSender<Navigation>,
}

impl<A, S, G> Bootstrap<A, S, G>
where
    A: CourierApi,
    S: KeyValueStore + Clone,
    G: PushGateway + Clone,
{
    pub fn new(
        api: A,
        cache: LocalCache<S>,
        gateway: G,
        config: AppConfig,
        navigation: mpsc::UnboundedSender<Navigation>,
    ) -> Self {
        Self {
            api,
            cache,
            gateway,
            config,
            navigation,
        }
    }

    pub async fn run(&self) -> BootOutcome<S, G> {
        if let Some(gate) = self.check_version().await {
            return BootOutcome::Blocked(gate);
        }

        self.prepare_push_token().await;

        let listener = PushListener::new(
            self.cache.clone(),
            self.gateway.clone(),
            self.navigation.clone(),
        );

        let synced = sync_push_token(&self.api, &self.cache, self.config.platform).await;
        tracing::info!(token = ?synced, "bootstrap complete");

        BootOutcome::Ready(listener)
    }

    async fn check_version(&self) -> Option<Gate> {
        let required = match self.api.required_build_number(self.config.platform).await {
            Ok(required) => required,
            Err(e) => {
                tracing::error!(error = %e, "version check failed");
                return Some(Gate::Connectivity);
            }
        };
        let current = self.config.build_number;
        if current < required {
            tracing::warn!(current, required, "build is out of date");
            return Some(Gate::UpdateRequired {
                required,
                current,
                store_url: usable_store_url(self.config.store_url()),
            });
        }
        None
    }

    async fn prepare_push_token(&self) {
        if let Err(e) = self.gateway.request_permission().await {
            tracing::warn!(error = %e, "notification permission not granted");
        }
        if self.cache.push_token().await.is_some() {
            return;
        }
        match self.gateway.token().await {
            Ok(token) => self.cache.store_push_token(&token).await,
            Err(e) => tracing::warn!(error = %e, "could not obtain a push token"),
        }
    }
}
