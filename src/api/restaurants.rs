use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use super::{ensure_ids_match, parse_id, require, AppState};
use crate::domain::{Address, GradeRepr, NewRestaurant, RestaurantPatch, RestaurantRepr};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    pub name: Option<String>,
    pub borough: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    pub id: Option<serde_json::Value>,
    pub name: Option<String>,
    pub borough: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<Address>,
}

impl UpdateRestaurantRequest {
    fn into_patch(self) -> RestaurantPatch {
        let address = self.address.unwrap_or_default();
        RestaurantPatch {
            name: self.name,
            borough: self.borough,
            cuisine: self.cuisine,
            address_building_number: address.building_number,
            address_street: address.street,
            address_zipcode: address.zipcode,
        }
    }
}

pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantRepr>>, AppError> {
    let restaurants = state.repo.list_restaurants().await?;
    Ok(Json(restaurants.iter().map(|r| r.api_repr()).collect()))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantRepr>, AppError> {
    let id = parse_id(&id)?;

    let restaurant = state
        .repo
        .find_restaurant_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    Ok(Json(restaurant.api_repr()))
}

/// Grades of one restaurant, most recent inspection first.
pub async fn get_restaurant_grades(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<GradeRepr>>, AppError> {
    let id = parse_id(&id)?;

    if state.repo.find_restaurant_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Restaurant {} not found", id)));
    }

    let grades = state.repo.list_grades_for_restaurant(id).await?;
    Ok(Json(grades.iter().map(|g| g.api_repr()).collect()))
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantRepr>), AppError> {
    let Json(body) = payload?;

    let new = NewRestaurant {
        name: require(body.name, "name")?,
        borough: require(body.borough, "borough")?,
        cuisine: require(body.cuisine, "cuisine")?,
        address: body.address.unwrap_or_default(),
    };

    let restaurant = state.repo.create_restaurant(&new).await.map_err(|e| {
        error!(error = %e, "Failed to create restaurant");
        AppError::Internal(e.to_string())
    })?;

    info!(id = restaurant.id, "Restaurant created");
    Ok((StatusCode::CREATED, Json(restaurant.api_repr())))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    payload: Result<Json<UpdateRestaurantRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(body) = payload?;
    let id = ensure_ids_match(&path_id, body.id.as_ref())?;

    let affected = state.repo.update_restaurant(id, &body.into_patch()).await?;

    info!(id, affected, "Restaurant updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a restaurant and, by cascade, its grades.
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let affected = state.repo.destroy_restaurant(id).await?;

    info!(id, affected, "Restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_flattens_address() {
        let body: UpdateRestaurantRequest = serde_json::from_str(
            r#"{"id": 2, "cuisine": "Thai", "address": {"zipcode": "11201"}}"#,
        )
        .unwrap();
        let patch = body.into_patch();
        assert_eq!(patch.cuisine.as_deref(), Some("Thai"));
        assert_eq!(patch.address_zipcode.as_deref(), Some("11201"));
        assert!(patch.address_street.is_none());
        assert!(patch.name.is_none());
    }
}
