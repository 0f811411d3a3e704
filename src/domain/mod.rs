//! Domain types for the restaurant inspection API.
//!
//! This module provides:
//! - Persisted records: `Restaurant` and `Grade`
//! - Creation inputs and typed partial-update patches
//! - API projections (`RestaurantRepr`, `GradeRepr`) decoupled from column names

pub mod grade;
pub mod restaurant;

pub use grade::{Grade, GradePatch, GradeRepr, NewGrade};
pub use restaurant::{Address, NewRestaurant, Restaurant, RestaurantPatch, RestaurantRepr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Convert stored Unix milliseconds into a UTC timestamp.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn datetime_from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(|| {
        tracing::warn!(millis = ms, "Stored timestamp out of range, using epoch");
        DateTime::<Utc>::default()
    })
}

/// Deserialize a present field (including `null`) as `Some(..)`.
///
/// Used with `#[serde(default)]` so that an absent key stays `None` while an
/// explicit `null` becomes `Some(None)`.
pub(crate) fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
