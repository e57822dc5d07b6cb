//! # Push notifications: typed events over a channel
//!
//! The platform's messaging SDK is reached through the [`PushGateway`] trait.
//! Instead of registering callbacks, a consumer calls
//! [`subscribe`](PushGateway::subscribe) once and receives [`PushEvent`]s from a
//! `tokio::sync::broadcast` channel for the rest of the process.
//!
//! [`PushBus`] is the in-process gateway the app ships with: platform glue
//! hands it the device token and permission result and publishes raw events
//! into it; foreground messages it is asked to display are re-broadcast to
//! the UI as in-app banners. Tests drive the same type with synthetic events.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Push payload: `{ data: { intParcelCode }, notification: { title, body } }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(default)]
    pub data: PushData,
    #[serde(default)]
    pub notification: Option<PushContent>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PushData {
    #[serde(
        rename = "intParcelCode",
        default,
        deserialize_with = "store::lenient::opt_string"
    )]
    pub parcel_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PushContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PushMessage {
    /// A message about a parcel.
    pub fn for_parcel(code: &str, title: &str, body: &str) -> Self {
        Self {
            data: PushData {
                parcel_code: Some(code.to_string()),
            },
            notification: Some(PushContent {
                title: Some(title.to_string()),
                body: Some(body.to_string()),
            }),
        }
    }

    /// The referenced parcel code, if any.
    pub fn parcel_code(&self) -> Option<&str> {
        self.data
            .parcel_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    pub fn title(&self) -> &str {
        self.notification
            .as_ref()
            .and_then(|n| n.title.as_deref())
            .unwrap_or_default()
    }

    pub fn body(&self) -> &str {
        self.notification
            .as_ref()
            .and_then(|n| n.body.as_deref())
            .unwrap_or_default()
    }
}

/// Everything the gateway reports after start-up.
#[derive(Clone, Debug, PartialEq)]
pub enum PushEvent {
    /// The gateway rotated the device token.
    TokenRefreshed(String),
    /// A message arrived while the app was in the foreground.
    MessageReceived(PushMessage),
    /// The user opened a system notification while the app was in the background.
    NotificationOpened(PushMessage),
    /// The user tapped a notification the app displayed itself.
    LocalNotificationPressed(PushMessage),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    #[error("notification permission denied")]
    PermissionDenied,
    #[error("push gateway unavailable: {0}")]
    Unavailable(String),
}

/// The platform's push messaging facility.
pub trait PushGateway {
    /// Ask the user for permission to show notifications.
    fn request_permission(&self) -> impl Future<Output = Result<(), PushError>>;

    /// Fetch the device's current push token.
    fn token(&self) -> impl Future<Output = Result<String, PushError>>;

    /// Start receiving events. Only events published after this call are seen.
    fn subscribe(&self) -> broadcast::Receiver<PushEvent>;

    /// Display a message as a local notification.
    fn show_local(&self, message: &PushMessage) -> impl Future<Output = Result<(), PushError>>;
}

#[derive(Debug, Default)]
struct DeviceState {
    permission: Option<bool>,
    token: Option<String>,
}

/// In-process [`PushGateway`].
#[derive(Clone, Debug)]
pub struct PushBus {
    events: broadcast::Sender<PushEvent>,
    local: broadcast::Sender<PushMessage>,
    device: Arc<Mutex<DeviceState>>,
}

impl Default for PushBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PushBus {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (local, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            events,
            local,
            device: Arc::default(),
        }
    }

    /// Record the permission answer the platform got from the user.
    pub fn set_permission(&self, granted: bool) {
        self.device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .permission = Some(granted);
    }

    /// Record the token the platform SDK issued.
    pub fn set_token(&self, token: impl Into<String>) {
        self.device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .token = Some(token.into());
    }

    /// Publish an event to every subscriber. Returns how many received it.
    pub fn publish(&self, event: PushEvent) -> usize {
        if let PushEvent::TokenRefreshed(token) = &event {
            self.set_token(token.clone());
        }
        self.events.send(event).unwrap_or(0)
    }

    /// Messages the app asked to display, for rendering as in-app banners.
    pub fn local_notifications(&self) -> broadcast::Receiver<PushMessage> {
        self.local.subscribe()
    }
}

impl PushGateway for PushBus {
    async fn request_permission(&self) -> Result<(), PushError> {
        match self
            .device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .permission
        {
            Some(true) => Ok(()),
            Some(false) => Err(PushError::PermissionDenied),
            None => Err(PushError::Unavailable(
                "platform has not reported a permission result".to_string(),
            )),
        }
    }

    async fn token(&self) -> Result<String, PushError> {
        self.device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
            .ok_or_else(|| PushError::Unavailable("no token issued yet".to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<PushEvent> {
        self.events.subscribe()
    }

    async fn show_local(&self, message: &PushMessage) -> Result<(), PushError> {
        // No banner subscriber just means nothing is on screen to show it.
        let _ = self.local.send(message.clone());
        Ok(())
    }
}
