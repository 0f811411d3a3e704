//! Restaurant records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Street address of a restaurant. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub building_number: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
}

/// A persisted restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub borough: String,
    pub cuisine: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    pub fn api_repr(&self) -> RestaurantRepr {
        RestaurantRepr {
            id: self.id,
            name: self.name.clone(),
            borough: self.borough.clone(),
            cuisine: self.cuisine.clone(),
            address: self.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRepr {
    pub id: i64,
    pub name: String,
    pub borough: String,
    pub cuisine: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub borough: String,
    pub cuisine: String,
    pub address: Address,
}

/// Partial update restricted to the mutable restaurant fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub borough: Option<String>,
    pub cuisine: Option<String>,
    pub address_building_number: Option<String>,
    pub address_street: Option<String>,
    pub address_zipcode: Option<String>,
}

impl RestaurantPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.borough.is_none()
            && self.cuisine.is_none()
            && self.address_building_number.is_none()
            && self.address_street.is_none()
            && self.address_zipcode.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_repr_nests_address() {
        let restaurant = Restaurant {
            id: 1,
            name: "Dominic's".to_string(),
            borough: "Bronx".to_string(),
            cuisine: "Italian".to_string(),
            address: Address {
                building_number: Some("2335".to_string()),
                street: Some("Arthur Avenue".to_string()),
                zipcode: Some("10458".to_string()),
            },
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        };

        let json = serde_json::to_value(restaurant.api_repr()).unwrap();
        assert_eq!(json["name"], "Dominic's");
        assert_eq!(json["address"]["buildingNumber"], "2335");
        assert_eq!(json["address"]["street"], "Arthur Avenue");
        assert_eq!(json["address"]["zipcode"], "10458");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_address_parts_default_to_none() {
        let address: Address = serde_json::from_str(r#"{"street": "Broadway"}"#).unwrap();
        assert_eq!(address.street.as_deref(), Some("Broadway"));
        assert!(address.building_number.is_none());
        assert!(address.zipcode.is_none());
    }

    #[test]
    fn test_empty_patch() {
        assert!(RestaurantPatch::default().is_empty());
        let patch = RestaurantPatch {
            cuisine: Some("Thai".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
