//! Registering the device's push token with the server.
//!
//! The local token record carries a synced flag. It is cleared whenever the
//! token changes (first issue, refresh, new login) and set only after the
//! server acknowledged the token, so a failed attempt is simply repeated on
//! the next call. Failures are logged, never returned.

use api::{CourierApi, TokenUpdate};
use store::{KeyValueStore, LocalCache, Platform};

/// What a sync attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenSync {
    NoSession,
    AlreadySynced,
    NoToken,
    MissingUserId,
    Synced,
    Failed,
}

/// POST the stored token to the session role's endpoint if it is not yet
/// acknowledged. At most one request is made.
pub async fn sync_push_token<A, S>(api: &A, cache: &LocalCache<S>, platform: Platform) -> TokenSync
where
    A: CourierApi,
    S: KeyValueStore,
{
    let Some(session) = cache.session().await else {
        return TokenSync::NoSession;
    };
    if cache.is_push_token_synced().await {
        return TokenSync::AlreadySynced;
    }
    let Some(token) = cache.push_token().await else {
        tracing::debug!("no push token to sync yet");
        return TokenSync::NoToken;
    };
    let Some(user_id) = session.user_id.clone() else {
        tracing::warn!(role = %session.role, "session has no userId, cannot sync push token");
        return TokenSync::MissingUserId;
    };

    let update = TokenUpdate::new(user_id, platform, &token);
    match api.update_token(session.role, &update).await {
        Ok(()) => {
            cache.mark_push_token_synced().await;
            tracing::info!(role = %session.role, "push token synced");
            TokenSync::Synced
        }
        Err(e) => {
            tracing::warn!(error = %e, "push token sync failed, will retry on next start");
            TokenSync::Failed
        }
    }
}
