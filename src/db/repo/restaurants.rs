//! Restaurant operations for the repository.

use crate::domain::{datetime_from_millis, Address, NewRestaurant, Restaurant, RestaurantPatch};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{QueryBuilder, Row};
use tracing::debug;

use super::{now_ms, Repository};

const RESTAURANT_COLUMNS: &str = "id, name, borough, cuisine, address_building_number, \
     address_street, address_zipcode, created_at, updated_at";

fn restaurant_from_row(row: &SqliteRow) -> Restaurant {
    Restaurant {
        id: row.get("id"),
        name: row.get("name"),
        borough: row.get("borough"),
        cuisine: row.get("cuisine"),
        address: Address {
            building_number: row.get("address_building_number"),
            street: row.get("address_street"),
            zipcode: row.get("address_zipcode"),
        },
        created_at: datetime_from_millis(row.get("created_at")),
        updated_at: datetime_from_millis(row.get("updated_at")),
    }
}

impl Repository {
    /// Look up a restaurant by primary key.
    pub async fn find_restaurant_by_id(&self, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM restaurants WHERE id = ?",
            RESTAURANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(restaurant_from_row))
    }

    /// Every restaurant, ordered by id.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM restaurants ORDER BY id ASC",
            RESTAURANT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(restaurant_from_row).collect())
    }

    /// Insert a restaurant and return the stored record.
    pub async fn create_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, sqlx::Error> {
        let now = now_ms();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO restaurants (
                name, borough, cuisine, address_building_number,
                address_street, address_zipcode, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            RESTAURANT_COLUMNS
        ))
        .bind(new.name.as_str())
        .bind(new.borough.as_str())
        .bind(new.cuisine.as_str())
        .bind(new.address.building_number.as_deref())
        .bind(new.address.street.as_deref())
        .bind(new.address.zipcode.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let restaurant = restaurant_from_row(&row);
        debug!(id = restaurant.id, name = %restaurant.name, "Restaurant created");
        Ok(restaurant)
    }

    /// Apply `patch` to the restaurant with the given id.
    ///
    /// Returns the number of rows affected (0 or 1).
    pub async fn update_restaurant(
        &self,
        id: i64,
        patch: &RestaurantPatch,
    ) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE restaurants SET updated_at = ");
        qb.push_bind(now_ms());

        let columns = [
            ("name", &patch.name),
            ("borough", &patch.borough),
            ("cuisine", &patch.cuisine),
            ("address_building_number", &patch.address_building_number),
            ("address_street", &patch.address_street),
            ("address_zipcode", &patch.address_zipcode),
        ];
        for (column, value) in columns {
            if let Some(value) = value {
                qb.push(format!(", {} = ", column)).push_bind(value.clone());
            }
        }

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete the restaurant with the given id. Its grades are removed by cascade.
    pub async fn destroy_restaurant(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seed_restaurant, setup_test_db};
    use super::*;
    use crate::domain::NewGrade;

    #[tokio::test]
    async fn test_create_and_find_restaurant() {
        let (repo, _temp) = setup_test_db().await;
        let created = seed_restaurant(&repo, "Dominic's").await;

        let found = repo
            .find_restaurant_by_id(created.id)
            .await
            .unwrap()
            .expect("restaurant should exist");
        assert_eq!(found.name, "Dominic's");
        assert_eq!(found.address.street.as_deref(), Some("Arthur Avenue"));
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_list_restaurants_in_id_order() {
        let (repo, _temp) = setup_test_db().await;
        seed_restaurant(&repo, "First").await;
        seed_restaurant(&repo, "Second").await;

        let names: Vec<String> = repo
            .list_restaurants()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_update_restaurant_partial() {
        let (repo, _temp) = setup_test_db().await;
        let created = seed_restaurant(&repo, "Dominic's").await;

        let patch = RestaurantPatch {
            cuisine: Some("Pizza".to_string()),
            address_zipcode: Some("10001".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.update_restaurant(created.id, &patch).await.unwrap(), 1);

        let updated = repo.find_restaurant_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.cuisine, "Pizza");
        assert_eq!(updated.address.zipcode.as_deref(), Some("10001"));
        assert_eq!(updated.name, "Dominic's");
        assert_eq!(updated.address.street.as_deref(), Some("Arthur Avenue"));
    }

    #[tokio::test]
    async fn test_destroy_restaurant_cascades_to_grades() {
        let (repo, _temp) = setup_test_db().await;
        let restaurant = seed_restaurant(&repo, "Dominic's").await;
        let grade = repo
            .create_grade(&NewGrade {
                restaurant_id: restaurant.id,
                grade: "A".to_string(),
                score: None,
                inspection_date: chrono::Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(repo.destroy_restaurant(restaurant.id).await.unwrap(), 1);
        assert!(repo.find_restaurant_by_id(restaurant.id).await.unwrap().is_none());
        assert!(repo.find_grade_by_id(grade.id).await.unwrap().is_none());
    }
}
