//! Loading the data each role's home screen shows.
//!
//! Parcel lists and the driver dashboard are written to the local cache so
//! search and notification navigation can work from them. Entity balances are
//! only handed to the caller.

use api::{CourierApi, PromoImage};
use serde_json::Value;
use store::{KeyValueStore, LocalCache, Parcel, Role, Session};

use crate::error::AppError;

#[derive(Clone, Debug, PartialEq)]
pub enum RoleData {
    Driver {
        dashboard: Value,
        parcels: Vec<Parcel>,
    },
    Entity {
        balances: Vec<Value>,
        parcels: Vec<Parcel>,
    },
}

impl RoleData {
    pub fn parcels(&self) -> &[Parcel] {
        match self {
            RoleData::Driver { parcels, .. } | RoleData::Entity { parcels, .. } => parcels,
        }
    }
}

/// Fetch the session role's data and refresh the cache with it.
///
/// Any failed call fails the whole refresh and leaves the cache as it was for
/// the records not yet written.
pub async fn refresh_role_data<A, S>(
    api: &A,
    cache: &LocalCache<S>,
    session: &Session,
) -> Result<RoleData, AppError>
where
    A: CourierApi,
    S: KeyValueStore,
{
    let id = session
        .entity_code
        .as_deref()
        .ok_or(AppError::MissingField("entity code"))?;

    let data = match session.role {
        Role::Driver => {
            let dashboard = api.driver_dashboard(id).await?;
            cache.set_dashboard_data(&dashboard).await;
            let parcels = api.driver_parcels(id).await?;
            cache.set_parcels(Role::Driver, &parcels).await;
            RoleData::Driver { dashboard, parcels }
        }
        Role::Entity => {
            let balances = api.entity_balances(id).await?;
            let parcels = api.entity_parcels(id).await?;
            cache.set_parcels(Role::Entity, &parcels).await;
            RoleData::Entity { balances, parcels }
        }
    };
    tracing::debug!(role = %session.role, parcels = data.parcels().len(), "role data refreshed");
    Ok(data)
}

/// Promotional banners for the session's branch. Never fails.
pub async fn promo_images<A: CourierApi>(api: &A, session: &Session) -> Vec<PromoImage> {
    let Some(branch_code) = session.branch_code.as_deref() else {
        return Vec::new();
    };
    match api.promo_images(branch_code).await {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load promo images");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use serde_json::json;
    use store::MemoryStore;

    fn session(profile: Value) -> Session {
        Session::from_profile(profile.as_object().unwrap().clone()).unwrap()
    }

    fn parcel(code: i64) -> Parcel {
        serde_json::from_value(json!({ "intParcelCode": code })).unwrap()
    }

    #[tokio::test]
    async fn test_driver_data_is_cached() {
        let api = FakeApi::default();
        api.state().dashboard = json!({ "TotalParcels": 3 });
        api.state().driver_parcels = vec![parcel(1), parcel(2)];
        let cache = LocalCache::new(MemoryStore::new());
        let driver = session(json!({ "roleName": "Driver", "userId": 42 }));

        let data = refresh_role_data(&api, &cache, &driver).await.unwrap();

        assert_eq!(data.parcels().len(), 2);
        assert_eq!(cache.parcels(Role::Driver).await.len(), 2);
        assert_eq!(cache.dashboard_data().await, Some(json!({ "TotalParcels": 3 })));
        assert_eq!(
            api.state().data_calls,
            vec!["driver_dashboard/42", "driver_parcels/42"]
        );
    }

    #[tokio::test]
    async fn test_entity_data_uses_sender_code() {
        let api = FakeApi::default();
        api.state().balances = vec![json!({ "Balance": 1200 })];
        api.state().entity_parcels = vec![parcel(7)];
        let cache = LocalCache::new(MemoryStore::new());
        let entity = session(json!({ "roleName": "Entity", "strSenderEntityCode": "E-9" }));

        match refresh_role_data(&api, &cache, &entity).await.unwrap() {
            RoleData::Entity { balances, parcels } => {
                assert_eq!(balances.len(), 1);
                assert_eq!(parcels[0].code().as_deref(), Some("7"));
            }
            other => panic!("expected entity data, got {other:?}"),
        }
        assert_eq!(cache.parcels(Role::Entity).await.len(), 1);
        assert!(cache.parcels(Role::Driver).await.is_empty());
        assert!(cache.dashboard_data().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_surfaced_and_cache_kept() {
        let api = FakeApi::default();
        let cache = LocalCache::new(MemoryStore::new());
        cache.set_parcels(Role::Driver, &[parcel(5)]).await;
        api.state().fail_data = true;
        let driver = session(json!({ "roleName": "Driver", "userId": 42 }));

        assert!(matches!(
            refresh_role_data(&api, &cache, &driver).await,
            Err(AppError::Api(_))
        ));
        assert_eq!(cache.parcels(Role::Driver).await[0].code().as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_missing_code_makes_no_call() {
        let api = FakeApi::default();
        let cache = LocalCache::new(MemoryStore::new());
        let driver = session(json!({ "roleName": "Driver" }));

        assert!(matches!(
            refresh_role_data(&api, &cache, &driver).await,
            Err(AppError::MissingField(_))
        ));
        assert!(api.state().data_calls.is_empty());
    }

    #[tokio::test]
    async fn test_promo_images_are_best_effort() {
        let api = FakeApi::default();
        let entity = session(json!({ "roleName": "Entity", "branchCode": "DHK" }));

        let images = promo_images(&api, &entity).await;
        assert_eq!(images[0].image_url, "https://cdn.test/DHK.png");

        api.state().fail_promo = true;
        assert!(promo_images(&api, &entity).await.is_empty());

        let no_branch = session(json!({ "roleName": "Entity" }));
        assert!(promo_images(&api, &no_branch).await.is_empty());
    }
}
