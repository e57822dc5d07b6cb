//! Path builders for every endpoint the app calls.
//!
//! Paths are relative to the configured base URL. Role-dependent endpoints
//! take a [`Role`] and use its lowercase path segment.

use store::{Platform, Role};

pub fn check_update(platform: Platform) -> String {
    format!("/api/checkUpdate/{}", platform.id())
}

pub fn update_token(role: Role) -> String {
    format!("/{}/updateToken", role.path_segment())
}

pub fn notifications(role: Role, branch_code: &str, entity_code: &str) -> String {
    format!(
        "/{}/notifications/{}/{}",
        role.path_segment(),
        branch_code,
        entity_code
    )
}

pub fn mark_all_read(role: Role, branch_code: &str, entity_code: &str) -> String {
    format!(
        "/notifications/{}/mark-all-read/{}/{}",
        role.path_segment(),
        branch_code,
        entity_code
    )
}

pub const SEND_OTP: &str = "/register/sendotp";
pub const VERIFY_OTP: &str = "/register/verifyotp";
pub const REGISTER: &str = "/register";
pub const LOGIN: &str = "/login";

pub fn driver_parcels(driver_id: &str) -> String {
    format!("/parcels/DriverParcels/{driver_id}")
}

pub fn entity_parcels(entity_id: &str) -> String {
    format!("/parcels/EntityParcels/{entity_id}")
}

pub fn driver_dashboard(driver_id: &str) -> String {
    format!("/driverparcels/DashboardData/{driver_id}")
}

pub fn entity_balances(entity_id: &str) -> String {
    format!("/Entity/getentitybalances/{entity_id}")
}

pub fn promo_images(branch_code: &str) -> String {
    format!("/promoimages/{branch_code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_paths() {
        assert_eq!(update_token(Role::Driver), "/driver/updateToken");
        assert_eq!(update_token(Role::Entity), "/entity/updateToken");
        assert_eq!(
            notifications(Role::Entity, "12", "E-9"),
            "/entity/notifications/12/E-9"
        );
        assert_eq!(
            mark_all_read(Role::Driver, "12", "42"),
            "/notifications/driver/mark-all-read/12/42"
        );
    }

    #[test]
    fn test_platform_and_id_paths() {
        assert_eq!(check_update(Platform::Android), "/api/checkUpdate/android");
        assert_eq!(check_update(Platform::Ios), "/api/checkUpdate/ios");
        assert_eq!(driver_parcels("42"), "/parcels/DriverParcels/42");
        assert_eq!(driver_dashboard("42"), "/driverparcels/DashboardData/42");
        assert_eq!(entity_balances("7"), "/Entity/getentitybalances/7");
        assert_eq!(promo_images("DHK"), "/promoimages/DHK");
    }
}
