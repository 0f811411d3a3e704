//! Inspection grade records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted inspection grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub id: i64,
    pub restaurant_id: i64,
    pub grade: String,
    pub score: Option<i64>,
    pub inspection_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    /// External JSON shape of this grade.
    pub fn api_repr(&self) -> GradeRepr {
        GradeRepr {
            id: self.id,
            restaurant_id: self.restaurant_id,
            grade: self.grade.clone(),
            score: self.score,
            inspection_date: self.inspection_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRepr {
    pub id: i64,
    pub restaurant_id: i64,
    pub grade: String,
    pub score: Option<i64>,
    pub inspection_date: DateTime<Utc>,
}

/// Attributes for inserting a grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGrade {
    pub restaurant_id: i64,
    pub grade: String,
    pub score: Option<i64>,
    pub inspection_date: DateTime<Utc>,
}

/// Partial update restricted to the mutable grade fields.
///
/// `None` leaves a column untouched. `score` is nullable, so
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradePatch {
    pub score: Option<Option<i64>>,
    pub grade: Option<String>,
    pub inspection_date: Option<DateTime<Utc>>,
    pub restaurant_id: Option<i64>,
}

impl GradePatch {
    pub fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.grade.is_none()
            && self.inspection_date.is_none()
            && self.restaurant_id.is_none()
    }
}
