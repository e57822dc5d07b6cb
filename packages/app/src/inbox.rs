//! # Notification inbox: shared list state with optimistic mark-all-read
//!
//! [`NotificationInbox`] owns the notification list, the unread count and a
//! loading flag behind a shared handle, so every clone (one per screen that
//! shows a badge or the list) sees the same state.
//!
//! ## Fetch
//!
//! [`fetch`](NotificationInbox::fetch) derives an [`InboxScope`] from the
//! session (role, branch code, entity code), calls the role's endpoint and
//! replaces the list and count wholesale. Any failure empties both; no partial
//! state survives.
//!
//! ## Mark all as read
//!
//! [`mark_all_as_read`](NotificationInbox::mark_all_as_read) is a two-phase
//! transition:
//!
//! 1. **Apply**: every record's `is_read` becomes `true` and the unread count
//!    `0`, before any network traffic. Readers see this immediately.
//! 2. **Confirm**: the server call runs. On failure the whole list is fetched
//!    again and replaces local state; nothing is rolled back by hand.
//!
//! A second call while one is in flight, or a call with nothing unread, does
//! nothing at all.
//!
//! Every change is published on a `watch` channel, so a screen that
//! [subscribes](NotificationInbox::subscribe) sees the applied state while the
//! confirmation is still pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use api::CourierApi;
use store::{KeyValueStore, LocalCache, Notification, Role, Session};
use tokio::sync::watch;

use crate::error::AppError;

/// What the UI renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InboxSnapshot {
    pub notifications: Vec<Notification>,
    pub unread_count: u32,
    pub loading: bool,
}

/// Which inbox to talk to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboxScope {
    pub role: Role,
    pub branch_code: String,
    pub entity_code: String,
}

impl InboxScope {
    pub fn from_session(session: &Session) -> Result<Self, AppError> {
        let branch_code = session
            .branch_code
            .clone()
            .ok_or(AppError::MissingField("branch code"))?;
        let entity_code = session
            .entity_code
            .clone()
            .ok_or(AppError::MissingField("entity code"))?;
        Ok(Self {
            role: session.role,
            branch_code,
            entity_code,
        })
    }
}

/// Result of [`NotificationInbox::mark_all_as_read`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkAllRead {
    /// Nothing unread, no session, or a call already in flight.
    Skipped,
    /// The server accepted the change.
    Confirmed,
    /// The server call failed and local state was replaced by a fresh fetch.
    Reconciled,
}

#[derive(Clone)]
pub struct NotificationInbox<A: CourierApi, S: KeyValueStore> {
    api: A,
    cache: LocalCache<S>,
    state: Arc<watch::Sender<InboxSnapshot>>,
    marking: Arc<AtomicBool>,
}

impl<A: CourierApi, S: KeyValueStore> NotificationInbox<A, S> {
    pub fn new(api: A, cache: LocalCache<S>) -> Self {
        Self {
            api,
            cache,
            state: Arc::new(watch::channel(InboxSnapshot::default()).0),
            marking: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> InboxSnapshot {
        self.state.borrow().clone()
    }

    pub fn unread_count(&self) -> u32 {
        self.state.borrow().unread_count
    }

    /// Receive every later state change.
    pub fn subscribe(&self) -> watch::Receiver<InboxSnapshot> {
        self.state.subscribe()
    }

    async fn scope(&self) -> Result<InboxScope, AppError> {
        let session = self.cache.session().await.ok_or(AppError::NoSession)?;
        InboxScope::from_session(&session)
    }

    /// Replace local state with the server's list.
    pub async fn fetch(&self) -> Result<(), AppError> {
        self.state.send_modify(|state| state.loading = true);

        let result = match self.scope().await {
            Ok(scope) => self
                .api
                .notifications(scope.role, &scope.branch_code, &scope.entity_code)
                .await
                .map_err(AppError::from),
            Err(e) => Err(e),
        };

        let (notifications, unread_count, result) = match result {
            Ok(feed) => (feed.notifications, feed.unread_count, Ok(())),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch notifications");
                (Vec::new(), 0, Err(e))
            }
        };
        self.state.send_replace(InboxSnapshot {
            notifications,
            unread_count,
            loading: false,
        });
        result
    }

    /// Mark everything read locally, then confirm with the server.
    pub async fn mark_all_as_read(&self) -> MarkAllRead {
        if self
            .marking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return MarkAllRead::Skipped;
        }
        let outcome = self.mark_all_as_read_inner().await;
        self.marking.store(false, Ordering::Release);
        outcome
    }

    async fn mark_all_as_read_inner(&self) -> MarkAllRead {
        if self.unread_count() == 0 {
            return MarkAllRead::Skipped;
        }
        let scope = match self.scope().await {
            Ok(scope) => scope,
            Err(e) => {
                tracing::debug!(error = %e, "cannot mark notifications read");
                return MarkAllRead::Skipped;
            }
        };

        self.state.send_modify(|state| {
            for notification in &mut state.notifications {
                notification.is_read = true;
            }
            state.unread_count = 0;
        });

        match self
            .api
            .mark_all_read(scope.role, &scope.branch_code, &scope.entity_code)
            .await
        {
            Ok(()) => MarkAllRead::Confirmed,
            Err(e) => {
                tracing::warn!(error = %e, "mark-all-read failed, reloading notifications");
                // fetch() logs its own failure and leaves an empty list
                let _ = self.fetch().await;
                MarkAllRead::Reconciled
            }
        }
    }
}
