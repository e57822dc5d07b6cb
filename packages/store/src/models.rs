//! # Domain models for sessions, parcels and notifications
//!
//! Defines the records the courier app caches locally and exchanges with the
//! remote API. Server payloads mix PascalCase and camelCase field names and are
//! loose about JSON types, so every struct here carries explicit `serde`
//! renames and the [`crate::lenient`] deserializers.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | The two user roles, `"Entity"` (merchant/sender) and `"Driver"`. |
//! | [`UserId`] | A user identifier exactly as the server sent it (number or string). |
//! | [`Session`] | The canonical, normalised view of the logged-in user's profile. |
//! | [`Parcel`] | A parcel record, kept as the raw server object so the cached list round-trips verbatim. |
//! | [`Notification`] | One inbox notification. |
//! | [`NotificationFeed`] | The notification list endpoint's response. |
//!
//! ## Profile normalisation
//!
//! The stored profile is whatever the login endpoint returned. Which field
//! carries the branch code or the entity code depends on the role, so
//! [`branch_code_of`] and [`entity_code_of`] resolve them with a fixed
//! precedence:
//!
//! - branch code: `intFromBranchCode` > `branchCode` > `BranchCode`
//! - entity code: `userId` > `strSenderEntityCode`
//!
//! Numbers are stringified and blank strings skipped, so the first *usable*
//! field wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

const BRANCH_CODE_FIELDS: [&str; 3] = ["intFromBranchCode", "branchCode", "BranchCode"];
const ENTITY_CODE_FIELDS: [&str; 2] = ["userId", "strSenderEntityCode"];
const DISPLAY_NAME_FIELDS: [&str; 3] = ["name", "Name", "userName"];

/// A user role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Entity,
    Driver,
}

impl Role {
    /// Parse a `roleName` value. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("entity") {
            Some(Role::Entity)
        } else if name.eq_ignore_ascii_case("driver") {
            Some(Role::Driver)
        } else {
            None
        }
    }

    /// The `roleName` the server uses.
    pub fn name(self) -> &'static str {
        match self {
            Role::Entity => "Entity",
            Role::Driver => "Driver",
        }
    }

    /// Lowercase form used in endpoint paths: `/entity/...`, `/driver/...`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Role::Entity => "entity",
            Role::Driver => "driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user id as the server sent it. Echoed back unchanged in request bodies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(UserId::Number),
            Value::String(s) if !s.trim().is_empty() => Some(UserId::Text(s.trim().to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

fn first_text(profile: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| profile.get(*field).and_then(lenient::value_text))
}

/// Resolve the branch code from a raw profile.
pub fn branch_code_of(profile: &Map<String, Value>) -> Option<String> {
    first_text(profile, &BRANCH_CODE_FIELDS)
}

/// Resolve the entity/driver code from a raw profile.
pub fn entity_code_of(profile: &Map<String, Value>) -> Option<String> {
    first_text(profile, &ENTITY_CODE_FIELDS)
}

/// The logged-in user, normalised from the stored profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub role: Role,
    pub branch_code: Option<String>,
    pub entity_code: Option<String>,
    pub display_name: Option<String>,
    /// The profile exactly as persisted under the `user` key.
    pub profile: Map<String, Value>,
}

impl Session {
    /// Normalise a raw profile. Returns `None` when `roleName` is missing or unknown.
    pub fn from_profile(profile: Map<String, Value>) -> Option<Self> {
        let role = profile
            .get("roleName")
            .and_then(Value::as_str)
            .and_then(Role::from_name)?;

        Some(Self {
            user_id: profile.get("userId").and_then(UserId::from_value),
            role,
            branch_code: branch_code_of(&profile),
            entity_code: entity_code_of(&profile),
            display_name: first_text(&profile, &DISPLAY_NAME_FIELDS),
            profile,
        })
    }
}

/// A parcel record, kept exactly as the server sent it.
///
/// The server's field set and JSON types vary by endpoint, so nothing is
/// normalised on the way in. The accessors read the commonly displayed
/// fields, accepting numbers or strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parcel(Map<String, Value>);

impl Parcel {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Every field, unmodified.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn text(&self, field: &str) -> Option<String> {
        self.0.get(field).and_then(lenient::value_text)
    }

    /// `intParcelCode` as text.
    pub fn code(&self) -> Option<String> {
        self.text("intParcelCode")
    }

    pub fn recipient_name(&self) -> Option<String> {
        self.text("RecipientName")
    }

    pub fn recipient_phone(&self) -> Option<String> {
        self.text("RecipientPhone")
    }

    pub fn city_name(&self) -> Option<String> {
        self.text("CityName")
    }

    pub fn status_name(&self) -> Option<String> {
        self.text("StatusName")
    }

    pub fn reference_no(&self) -> Option<String> {
        self.text("ReferenceNo")
    }

    /// Whether this parcel's code equals `code` (as sent in push payloads).
    pub fn matches_code(&self, code: &str) -> bool {
        let code = code.trim();
        !code.is_empty() && self.code().as_deref() == Some(code)
    }
}

/// An inbox notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "NotificationId", deserialize_with = "lenient::code")]
    pub id: i64,
    #[serde(rename = "BranchCode", default, deserialize_with = "lenient::opt_string")]
    pub branch_code: Option<String>,
    #[serde(rename = "ParcelCode", default, deserialize_with = "lenient::opt_string")]
    pub parcel_code: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(rename = "Body", default, deserialize_with = "lenient::text")]
    pub body: String,
    #[serde(rename = "Url", default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(rename = "CreatedAt", default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(rename = "IsRead", default, deserialize_with = "lenient::flag")]
    pub is_read: bool,
}

/// Response of the notification list endpoint. A record without a usable id
/// is dropped; the rest of the feed still loads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFeed {
    #[serde(default, deserialize_with = "lenient::records")]
    pub notifications: Vec<Notification>,
    #[serde(rename = "unreadCount", default, deserialize_with = "lenient::count")]
    pub unread_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("profile must be an object"),
        }
    }

    #[test]
    fn test_branch_code_precedence() {
        let p = profile(json!({
            "intFromBranchCode": 7,
            "branchCode": "B2",
            "BranchCode": "B3",
        }));
        assert_eq!(branch_code_of(&p).as_deref(), Some("7"));

        let p = profile(json!({ "branchCode": "B2", "BranchCode": "B3" }));
        assert_eq!(branch_code_of(&p).as_deref(), Some("B2"));

        let p = profile(json!({ "BranchCode": "B3" }));
        assert_eq!(branch_code_of(&p).as_deref(), Some("B3"));

        let p = profile(json!({ "intFromBranchCode": "", "branchCode": null, "BranchCode": 12 }));
        assert_eq!(branch_code_of(&p).as_deref(), Some("12"));

        assert_eq!(branch_code_of(&profile(json!({}))), None);
    }

    #[test]
    fn test_entity_code_precedence() {
        let p = profile(json!({ "userId": 42, "strSenderEntityCode": "E-9" }));
        assert_eq!(entity_code_of(&p).as_deref(), Some("42"));

        let p = profile(json!({ "strSenderEntityCode": "E-9" }));
        assert_eq!(entity_code_of(&p).as_deref(), Some("E-9"));
    }

    #[test]
    fn test_session_from_profile() {
        let session = Session::from_profile(profile(json!({
            "userId": 42,
            "roleName": "Driver",
            "branchCode": "DHK",
            "name": "Rahim",
        })))
        .unwrap();

        assert_eq!(session.role, Role::Driver);
        assert_eq!(session.user_id, Some(UserId::Number(42)));
        assert_eq!(session.branch_code.as_deref(), Some("DHK"));
        assert_eq!(session.entity_code.as_deref(), Some("42"));
        assert_eq!(session.display_name.as_deref(), Some("Rahim"));
    }

    #[test]
    fn test_session_requires_known_role() {
        assert!(Session::from_profile(profile(json!({ "userId": 1 }))).is_none());
        assert!(Session::from_profile(profile(json!({ "userId": 1, "roleName": "Admin" }))).is_none());
        assert!(Session::from_profile(profile(json!({ "roleName": "entity" }))).is_some());
    }

    #[test]
    fn test_user_id_serializes_as_given() {
        assert_eq!(serde_json::to_value(UserId::Number(42)).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(UserId::Text("a7".into())).unwrap(), json!("a7"));
    }

    #[test]
    fn test_parcel_is_kept_verbatim() {
        let raw = json!({
            "intParcelCode": "1001",
            "dcFee": "60.00",
            "Quantity": 2.5,
            "ReferenceNo": " R-1 ",
            "CityName": 5,
            "RecipientPhone": 1711000000,
            "strPickupAddress": "Road 5",
        });
        let parcel: Parcel = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parcel.code().as_deref(), Some("1001"));
        assert_eq!(parcel.city_name().as_deref(), Some("5"));
        assert_eq!(parcel.recipient_phone().as_deref(), Some("1711000000"));
        assert_eq!(parcel.reference_no().as_deref(), Some("R-1"));
        assert!(parcel.recipient_name().is_none());
        assert!(parcel.matches_code(" 1001 "));
        assert!(!parcel.matches_code("100"));
        assert!(!parcel.matches_code(""));

        assert_eq!(serde_json::to_value(&parcel).unwrap(), raw);
    }

    #[test]
    fn test_parcel_list_tolerates_mixed_types() {
        let parcels: Vec<Parcel> = serde_json::from_value(json!([
            { "intParcelCode": 1, "CityName": "Dhaka" },
            { "intParcelCode": "2", "CityName": 5, "StatusName": null },
        ]))
        .unwrap();
        assert_eq!(parcels.len(), 2);
        assert_eq!(parcels[1].code().as_deref(), Some("2"));
        assert!(parcels[1].status_name().is_none());
    }

    #[test]
    fn test_notification_feed_decodes_loose_types() {
        let feed: NotificationFeed = serde_json::from_value(json!({
            "notifications": [
                { "NotificationId": 1, "BranchCode": 3, "ParcelCode": "77", "Title": "Picked", "IsRead": 0 },
                { "NotificationId": "2", "Title": "Delivered", "IsRead": true },
            ],
            "unreadCount": 1,
        }))
        .unwrap();

        assert_eq!(feed.unread_count, 1);
        assert_eq!(feed.notifications[0].branch_code.as_deref(), Some("3"));
        assert!(!feed.notifications[0].is_read);
        assert_eq!(feed.notifications[1].id, 2);
        assert!(feed.notifications[1].is_read);
    }

    #[test]
    fn test_notification_feed_survives_null_and_bad_records() {
        let feed: NotificationFeed = serde_json::from_value(json!({
            "notifications": [
                { "NotificationId": 1, "Title": "Picked", "Body": null, "Url": null },
                { "Title": "No id" },
                { "NotificationId": 3, "Title": null, "Body": "Out for delivery", "CreatedAt": 20240101 },
            ],
            "unreadCount": "2",
        }))
        .unwrap();

        assert_eq!(feed.unread_count, 2);
        let ids: Vec<i64> = feed.notifications.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(feed.notifications[0].body, "");
        assert_eq!(feed.notifications[1].title, "");
        assert_eq!(feed.notifications[1].created_at.as_deref(), Some("20240101"));

        let empty: NotificationFeed =
            serde_json::from_value(json!({ "notifications": null, "unreadCount": null })).unwrap();
        assert_eq!(empty, NotificationFeed::default());
    }
}
