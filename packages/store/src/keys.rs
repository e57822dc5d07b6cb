//! Names of the keys the app persists in the local key-value store.

use crate::models::Role;

/// Raw session profile (JSON object).
pub const USER: &str = "user";
/// Last push token issued by the gateway.
pub const FCM_TOKEN: &str = "fcmToken";
/// `"true"` once the server acknowledged [`FCM_TOKEN`], `"false"` otherwise.
pub const FCM_TOKEN_SYNCED: &str = "fcmTokenSynced";
/// Cached parcel list for the Entity role.
pub const ALL_PARCELS: &str = "all_parcels";
/// Cached parcel list for the Driver role.
pub const ALL_PARCELS_DRIVER: &str = "all_parcels_driver";
pub const DASHBOARD_DATA: &str = "dashboard_data";
/// Parcel code of an opened notification that could not be resolved yet.
pub const PENDING_NOTIFICATION_PARCEL_CODE: &str = "pending_notification_parcel_code";

/// The parcel cache key for a role.
pub fn parcels_for(role: Role) -> &'static str {
    match role {
        Role::Entity => ALL_PARCELS,
        Role::Driver => ALL_PARCELS_DRIVER,
    }
}
