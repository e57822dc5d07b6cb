//! # Push listener: reacting to gateway events for the process lifetime
//!
//! Bootstrap creates one [`PushListener`] (which subscribes to the gateway at
//! construction) and hands it to the UI, which drives [`PushListener::run`].
//!
//! | Event | Reaction |
//! |-------|----------|
//! | `TokenRefreshed` | Persist the token and mark it unsynced. |
//! | `MessageReceived` | Show it as a local notification. |
//! | `NotificationOpened` / `LocalNotificationPressed` | Resolve the parcel from the role's cached list and request navigation to it. If it cannot be resolved, remember its code under `pending_notification_parcel_code`. |
//!
//! Each reaction reads what it needs from the store and overwrites whole
//! records, so events can arrive in any order and any number of times.

use store::{KeyValueStore, LocalCache, Parcel};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};

use crate::push::{PushEvent, PushGateway, PushMessage};

/// A screen change requested from outside the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    ParcelDetail(Parcel),
}

pub struct PushListener<S: KeyValueStore, G: PushGateway> {
    cache: LocalCache<S>,
    gateway: G,
    events: broadcast::Receiver<PushEvent>,
    navigation: mpsc::UnboundedSender<Navigation>,
}

impl<S: KeyValueStore, G: PushGateway> PushListener<S, G> {
    /// Subscribe to `gateway`. Events published before this call are not seen.
    pub fn new(
        cache: LocalCache<S>,
        gateway: G,
        navigation: mpsc::UnboundedSender<Navigation>,
    ) -> Self {
        let events = gateway.subscribe();
        Self {
            cache,
            gateway,
            events,
            navigation,
        }
    }

    /// Handle events until the gateway goes away.
    pub async fn run(mut self) {
        while self.next().await {}
        tracing::info!("push gateway closed, listener stopping");
    }

    /// Wait for and handle the next event. Returns `false` once the channel is closed.
    pub async fn next(&mut self) -> bool {
        match self.events.recv().await {
            Ok(event) => {
                self.handle(event).await;
                true
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "push listener fell behind, events dropped");
                true
            }
            Err(RecvError::Closed) => false,
        }
    }

    /// Handle one event.
    pub async fn handle(&self, event: PushEvent) {
        match event {
            PushEvent::TokenRefreshed(token) => {
                tracing::info!("push token refreshed");
                self.cache.store_push_token(&token).await;
            }
            PushEvent::MessageReceived(message) => {
                if let Err(e) = self.gateway.show_local(&message).await {
                    tracing::warn!(error = %e, "failed to display foreground message");
                }
            }
            PushEvent::NotificationOpened(message) | PushEvent::LocalNotificationPressed(message) => {
                self.open_parcel(&message).await;
            }
        }
    }

    async fn open_parcel(&self, message: &PushMessage) {
        let Some(code) = message.parcel_code() else {
            tracing::debug!("opened notification has no parcel code");
            return;
        };

        let parcel = match self.cache.session().await {
            Some(session) => self.cache.find_parcel(session.role, code).await,
            None => None,
        };

        match parcel {
            Some(parcel) => {
                if self.navigation.send(Navigation::ParcelDetail(parcel)).is_err() {
                    tracing::warn!(code, "no navigator attached, deferring parcel");
                    self.cache.set_pending_parcel_code(code).await;
                }
            }
            None => {
                tracing::info!(code, "parcel not cached yet, deferring");
                self.cache.set_pending_parcel_code(code).await;
            }
        }
    }
}
