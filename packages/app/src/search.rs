//! # Parcel search over the cached list
//!
//! A parcel matches a query when any of its fields, rendered as text,
//! contains the query case-insensitively. "Any field" means every field the
//! server sent, in the form it was sent: `"60.00"` matches `60.00`, not `60`.
//!
//! - An empty (or whitespace-only) query matches nothing: the result list is
//!   hidden rather than showing everything.
//! - Results keep the input order; there is no ranking.
//! - `null` fields never match. Numbers match on their decimal text, booleans
//!   on `true`/`false`, nested values on their JSON text.
//!
//! [`ParcelIndex`] renders each parcel's fields once so that re-running the
//! query on every keystroke only scans prepared lowercase strings.

use serde_json::Value;
use store::{KeyValueStore, LocalCache, Parcel, Role};

/// Lowercased text of every non-null field of `parcel`, as the server sent it.
fn field_texts(parcel: &Parcel) -> Vec<String> {
    parcel
        .fields()
        .values()
        .filter_map(|field| match field {
            Value::Null => None,
            Value::String(s) => Some(s.to_lowercase()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string().to_lowercase()),
        })
        .collect()
}

fn normalise_query(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

/// Filter `parcels` by `query`.
pub fn search<'a>(parcels: &'a [Parcel], query: &str) -> Vec<&'a Parcel> {
    let Some(needle) = normalise_query(query) else {
        return Vec::new();
    };
    parcels
        .iter()
        .filter(|parcel| field_texts(parcel).iter().any(|text| text.contains(&needle)))
        .collect()
}

/// Find a parcel by the code carried in a push payload or route.
pub fn find_by_code<'a>(parcels: &'a [Parcel], code: &str) -> Option<&'a Parcel> {
    parcels.iter().find(|parcel| parcel.matches_code(code))
}

/// A parcel list with its searchable text prepared.
#[derive(Clone, Debug, Default)]
pub struct ParcelIndex {
    parcels: Vec<Parcel>,
    texts: Vec<Vec<String>>,
}

impl ParcelIndex {
    pub fn new(parcels: Vec<Parcel>) -> Self {
        let texts = parcels.iter().map(field_texts).collect();
        Self { parcels, texts }
    }

    /// Index the role's cached parcel list.
    pub async fn load<S: KeyValueStore>(cache: &LocalCache<S>, role: Role) -> Self {
        Self::new(cache.parcels(role).await)
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    pub fn query(&self, query: &str) -> Vec<&Parcel> {
        let Some(needle) = normalise_query(query) else {
            return Vec::new();
        };
        self.parcels
            .iter()
            .zip(&self.texts)
            .filter(|(_, texts)| texts.iter().any(|text| text.contains(&needle)))
            .map(|(parcel, _)| parcel)
            .collect()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Parcel> {
        find_by_code(&self.parcels, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::MemoryStore;

    fn parcels() -> Vec<Parcel> {
        [
            json!({
                "intParcelCode": 1001,
                "RecipientName": "Karim Uddin",
                "CityName": "Dhaka",
                "StatusName": "Delivered",
                "dcFee": 60,
                "Remarks": null,
            }),
            json!({
                "intParcelCode": 1002,
                "RecipientName": "Salma Begum",
                "CityName": "Chattogram",
                "StatusName": "In Transit",
                "strPickupArea": "Mirpur DOHS",
            }),
            json!({
                "intParcelCode": 2001,
                "RecipientName": "Rafiq",
                "CityName": "Dhaka",
                "StatusName": "Pending",
                "RecipientPhone": "01819555555",
            }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
    }

    fn codes(found: &[&Parcel]) -> Vec<i64> {
        found
            .iter()
            .filter_map(|p| p.code())
            .map(|code| code.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let list = parcels();
        assert!(search(&list, "").is_empty());
        assert!(search(&list, "   ").is_empty());
        assert!(ParcelIndex::new(list).query("").is_empty());
    }

    #[test]
    fn test_case_insensitive_substring_preserves_order() {
        let list = parcels();
        assert_eq!(codes(&search(&list, "dhaka")), vec![1001, 2001]);
        assert_eq!(codes(&search(&list, "BEGUM")), vec![1002]);
        assert_eq!(codes(&search(&list, "a")), vec![1001, 1002, 2001]);
        assert!(search(&list, "sylhet").is_empty());
    }

    #[test]
    fn test_matches_numbers_and_unmodelled_fields() {
        let list = parcels();
        assert_eq!(codes(&search(&list, "100")), vec![1001, 1002]);
        assert_eq!(codes(&search(&list, "0181")), vec![2001]);
        assert_eq!(codes(&search(&list, "mirpur")), vec![1002]);
        assert_eq!(codes(&search(&list, "60")), vec![1001]);
    }

    #[test]
    fn test_matches_text_as_sent() {
        let list: Vec<Parcel> = [
            json!({ "intParcelCode": 1, "dcFee": "60.00", "Quantity": 2.5, "ReferenceNo": " R-1 " }),
            json!({ "intParcelCode": 2, "CityName": 5, "dcFee": 60 }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();

        assert_eq!(codes(&search(&list, "60.00")), vec![1]);
        assert_eq!(codes(&search(&list, "2.5")), vec![1]);
        assert_eq!(codes(&search(&list, " r-1")), vec![1]);
        assert_eq!(codes(&search(&list, "60")), vec![1, 2]);
        assert_eq!(codes(&ParcelIndex::new(list).query("60.00")), vec![1]);
    }

    #[test]
    fn test_null_fields_do_not_match() {
        let list = parcels();
        assert!(search(&list, "null").is_empty());
    }

    #[test]
    fn test_index_agrees_with_search() {
        let list = parcels();
        let index = ParcelIndex::new(list.clone());
        for query in ["dhaka", "transit", "2001", "x", "Uddin"] {
            assert_eq!(codes(&index.query(query)), codes(&search(&list, query)));
        }
        assert_eq!(index.find_by_code("1002").unwrap().code().as_deref(), Some("1002"));
        assert!(index.find_by_code("9").is_none());
    }

    #[tokio::test]
    async fn test_load_from_cache() {
        let cache = LocalCache::new(MemoryStore::new());
        cache.set_parcels(Role::Driver, &parcels()).await;

        let index = ParcelIndex::load(&cache, Role::Driver).await;
        assert_eq!(index.len(), 3);
        assert!(ParcelIndex::load(&cache, Role::Entity).await.is_empty());
    }
}
