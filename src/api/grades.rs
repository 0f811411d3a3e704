use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info};

use super::{ensure_ids_match, parse_id, require, AppState};
use crate::domain::{deserialize_present, GradePatch, GradeRepr, NewGrade};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeRequest {
    pub grade: Option<String>,
    pub restaurant_id: Option<i64>,
    pub score: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGradeRequest {
    pub id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub score: Option<Option<i64>>,
    pub grade: Option<String>,
    pub inspection_date: Option<DateTime<Utc>>,
    pub restaurant_id: Option<i64>,
}

impl UpdateGradeRequest {
    fn into_patch(self) -> GradePatch {
        GradePatch {
            score: self.score,
            grade: self.grade,
            inspection_date: self.inspection_date,
            restaurant_id: self.restaurant_id,
        }
    }
}

pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GradeRepr>, AppError> {
    let id = parse_id(&id)?;

    let grade = state
        .repo
        .find_grade_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Grade {} not found", id)))?;

    Ok(Json(grade.api_repr()))
}

/// Create a grade. The inspection date is always the current server time.
pub async fn create_grade(
    State(state): State<AppState>,
    payload: Result<Json<CreateGradeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GradeRepr>), AppError> {
    let Json(body) = payload?;

    let grade = require(body.grade, "grade")?;
    let restaurant_id = require(body.restaurant_id, "restaurantId")?;

    let new = NewGrade {
        restaurant_id,
        grade,
        score: body.score,
        inspection_date: Utc::now(),
    };

    let grade = state.repo.create_grade(&new).await.map_err(|e| {
        error!(error = %e, restaurant_id, "Failed to create grade");
        AppError::Internal(e.to_string())
    })?;

    info!(id = grade.id, restaurant_id, "Grade created");
    Ok((StatusCode::CREATED, Json(grade.api_repr())))
}

pub async fn update_grade(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    payload: Result<Json<UpdateGradeRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(body) = payload?;
    let id = ensure_ids_match(&path_id, body.id.as_ref())?;

    let patch = body.into_patch();
    let affected = state.repo.update_grade(id, &patch).await?;

    info!(id, affected, "Grade updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a grade. Succeeds whether or not the grade existed.
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let affected = state.repo.destroy_grade(id).await?;

    info!(id, affected, "Grade deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_score() {
        let cleared: UpdateGradeRequest =
            serde_json::from_str(r#"{"id": 1, "score": null}"#).unwrap();
        assert_eq!(cleared.into_patch().score, Some(None));

        let absent: UpdateGradeRequest = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let patch = absent.into_patch();
        assert_eq!(patch.score, None);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_request_ignores_fields_outside_allow_list() {
        let body: UpdateGradeRequest = serde_json::from_str(
            r#"{"id": "3", "grade": "Z", "score": 3000, "createdAt": "2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let patch = body.into_patch();
        assert_eq!(patch.grade.as_deref(), Some("Z"));
        assert_eq!(patch.score, Some(Some(3000)));
        assert!(patch.inspection_date.is_none());
        assert!(patch.restaurant_id.is_none());
    }

    #[test]
    fn test_create_request_ignores_inspection_date() {
        let body: CreateGradeRequest = serde_json::from_str(
            r#"{"grade": "A", "restaurantId": 2, "inspectionDate": "2019-05-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(body.grade.as_deref(), Some("A"));
        assert_eq!(body.restaurant_id, Some(2));
        assert_eq!(body.score, None);
    }
}
