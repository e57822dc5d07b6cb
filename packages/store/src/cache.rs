//! # Local cache: typed access to the app's key-value store
//!
//! The platform gives the app an opaque async string store. [`KeyValueStore`]
//! is that interface; [`LocalCache`] layers the app's records on top of it:
//! the session profile, the push token record, the per-role parcel lists, the
//! dashboard blob and the pending notification parcel code.
//!
//! Every write is a whole-record overwrite of a single key, so callers from
//! different places (bootstrap, screens, push listeners) can race without
//! leaving a half-written record behind.
//!
//! | Record | Keys | Methods |
//! |--------|------|---------|
//! | Session | `user` | [`profile`](LocalCache::profile), [`session`](LocalCache::session), [`set_profile`](LocalCache::set_profile), [`clear_session`](LocalCache::clear_session) |
//! | Push token | `fcmToken`, `fcmTokenSynced` | [`push_token`](LocalCache::push_token), [`store_push_token`](LocalCache::store_push_token), [`is_push_token_synced`](LocalCache::is_push_token_synced), [`mark_push_token_synced`](LocalCache::mark_push_token_synced), [`mark_push_token_unsynced`](LocalCache::mark_push_token_unsynced) |
//! | Parcels | `all_parcels`, `all_parcels_driver` | [`parcels`](LocalCache::parcels), [`set_parcels`](LocalCache::set_parcels), [`find_parcel`](LocalCache::find_parcel) |
//! | Dashboard | `dashboard_data` | [`dashboard_data`](LocalCache::dashboard_data), [`set_dashboard_data`](LocalCache::set_dashboard_data) |
//! | Pending parcel | `pending_notification_parcel_code` | [`set_pending_parcel_code`](LocalCache::set_pending_parcel_code), [`take_pending_parcel_code`](LocalCache::take_pending_parcel_code) |
//!
//! Unreadable JSON under a key is logged and treated as absent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::keys;
use crate::models::{Parcel, Role, Session};

/// Async string-keyed store provided by the platform.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(&self, key: &str, value: String) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}

/// Typed records over a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct LocalCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LocalCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and decode a JSON value.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable cached value");
                None
            }
        }
    }

    /// Encode and write a JSON value.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.set(key, raw).await,
            Err(e) => tracing::warn!(key, error = %e, "failed to encode value for cache"),
        }
    }

    // -- session --

    /// The raw profile stored at login.
    pub async fn profile(&self) -> Option<Map<String, Value>> {
        self.get_json(keys::USER).await
    }

    /// The normalised session, if a usable profile is stored.
    pub async fn session(&self) -> Option<Session> {
        self.profile().await.and_then(Session::from_profile)
    }

    pub async fn set_profile(&self, profile: &Map<String, Value>) {
        self.set_json(keys::USER, profile).await;
    }

    /// Remove everything tied to the logged-in user.
    pub async fn clear_session(&self) {
        self.store.remove(keys::USER).await;
        self.store.remove(keys::DASHBOARD_DATA).await;
    }

    // -- push token --

    pub async fn push_token(&self) -> Option<String> {
        self.store
            .get(keys::FCM_TOKEN)
            .await
            .filter(|token| !token.trim().is_empty())
    }

    /// Persist a newly issued token. It is unsynced until the server acknowledges it.
    pub async fn store_push_token(&self, token: &str) {
        self.store.set(keys::FCM_TOKEN, token.to_string()).await;
        self.mark_push_token_unsynced().await;
    }

    pub async fn is_push_token_synced(&self) -> bool {
        self.store.get(keys::FCM_TOKEN_SYNCED).await.as_deref() == Some("true")
    }

    pub async fn mark_push_token_synced(&self) {
        self.store
            .set(keys::FCM_TOKEN_SYNCED, "true".to_string())
            .await;
    }

    pub async fn mark_push_token_unsynced(&self) {
        self.store
            .set(keys::FCM_TOKEN_SYNCED, "false".to_string())
            .await;
    }

    // -- parcels --

    /// The cached parcel list for a role; empty when nothing is cached.
    pub async fn parcels(&self, role: Role) -> Vec<Parcel> {
        self.get_json(keys::parcels_for(role))
            .await
            .unwrap_or_default()
    }

    pub async fn set_parcels(&self, role: Role, parcels: &[Parcel]) {
        self.set_json(keys::parcels_for(role), parcels).await;
    }

    /// Look up a cached parcel by the code carried in a push payload.
    pub async fn find_parcel(&self, role: Role, code: &str) -> Option<Parcel> {
        self.parcels(role)
            .await
            .into_iter()
            .find(|parcel| parcel.matches_code(code))
    }

    // -- dashboard --

    pub async fn dashboard_data(&self) -> Option<Value> {
        self.get_json(keys::DASHBOARD_DATA).await
    }

    pub async fn set_dashboard_data(&self, data: &Value) {
        self.set_json(keys::DASHBOARD_DATA, data).await;
    }

    // -- pending notification --

    pub async fn set_pending_parcel_code(&self, code: &str) {
        self.store
            .set(keys::PENDING_NOTIFICATION_PARCEL_CODE, code.to_string())
            .await;
    }

    /// Read and clear the pending parcel code.
    pub async fn take_pending_parcel_code(&self) -> Option<String> {
        let code = self
            .store
            .get(keys::PENDING_NOTIFICATION_PARCEL_CODE)
            .await?;
        self.store
            .remove(keys::PENDING_NOTIFICATION_PARCEL_CODE)
            .await;
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use serde_json::json;

    fn parcel(code: i64, recipient: &str) -> Parcel {
        serde_json::from_value(json!({ "intParcelCode": code, "RecipientName": recipient }))
            .unwrap()
    }

    #[tokio::test]
    async fn test_session_roundtrip_and_clear() {
        let cache = LocalCache::new(MemoryStore::new());
        assert!(cache.session().await.is_none());

        let profile = json!({ "userId": 42, "roleName": "Driver" });
        cache.set_profile(profile.as_object().unwrap()).await;
        cache.set_dashboard_data(&json!({ "delivered": 3 })).await;

        let session = cache.session().await.unwrap();
        assert_eq!(session.role, Role::Driver);
        assert_eq!(cache.profile().await.unwrap()["userId"], json!(42));

        cache.clear_session().await;
        assert!(cache.session().await.is_none());
        assert!(cache.dashboard_data().await.is_none());
    }

    #[tokio::test]
    async fn test_push_token_marks_unsynced() {
        let cache = LocalCache::new(MemoryStore::new());
        assert!(cache.push_token().await.is_none());
        assert!(!cache.is_push_token_synced().await);

        cache.store_push_token("tok123").await;
        assert_eq!(cache.push_token().await.as_deref(), Some("tok123"));
        assert_eq!(
            cache.store().get(keys::FCM_TOKEN_SYNCED).await.as_deref(),
            Some("false")
        );

        cache.mark_push_token_synced().await;
        assert!(cache.is_push_token_synced().await);

        // A refreshed token has to be acknowledged again
        cache.store_push_token("tok456").await;
        assert!(!cache.is_push_token_synced().await);
    }

    #[tokio::test]
    async fn test_parcels_are_cached_per_role() {
        let cache = LocalCache::new(MemoryStore::new());
        cache
            .set_parcels(Role::Driver, &[parcel(1, "Karim"), parcel(2, "Salma")])
            .await;

        assert_eq!(cache.parcels(Role::Driver).await.len(), 2);
        assert!(cache.parcels(Role::Entity).await.is_empty());
        assert_eq!(
            cache.find_parcel(Role::Driver, "2").await.unwrap().recipient_name().as_deref(),
            Some("Salma")
        );
        assert!(cache.find_parcel(Role::Entity, "2").await.is_none());
    }

    #[tokio::test]
    async fn test_parcels_are_cached_as_sent() {
        let cache = LocalCache::new(MemoryStore::new());
        let raw = json!([
            { "intParcelCode": 1, "dcFee": "60.00", "Quantity": 2.5, "ReferenceNo": " R-1 " },
            { "intParcelCode": "2", "CityName": 5 },
        ]);
        let parcels: Vec<Parcel> = serde_json::from_value(raw.clone()).unwrap();
        cache.set_parcels(Role::Entity, &parcels).await;

        let stored = cache.store().get(keys::ALL_PARCELS).await.unwrap();
        assert_eq!(serde_json::from_str::<Value>(&stored).unwrap(), raw);
        assert_eq!(cache.parcels(Role::Entity).await, parcels);
    }

    #[tokio::test]
    async fn test_unreadable_json_is_absent() {
        let cache = LocalCache::new(MemoryStore::new());
        cache
            .store()
            .set(keys::ALL_PARCELS, "not json".to_string())
            .await;
        assert!(cache.parcels(Role::Entity).await.is_empty());
    }

    #[tokio::test]
    async fn test_pending_parcel_code_is_taken_once() {
        let cache = LocalCache::new(MemoryStore::new());
        cache.set_pending_parcel_code("1001").await;
        assert_eq!(cache.take_pending_parcel_code().await.as_deref(), Some("1001"));
        assert!(cache.take_pending_parcel_code().await.is_none());
    }
}
