//! Grade operations for the repository.

use crate::domain::{datetime_from_millis, Grade, GradePatch, NewGrade};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{QueryBuilder, Row};
use tracing::debug;

use super::{now_ms, Repository};

const GRADE_COLUMNS: &str =
    "id, restaurant_id, grade, score, inspection_date, created_at, updated_at";

fn grade_from_row(row: &SqliteRow) -> Grade {
    Grade {
        id: row.get("id"),
        restaurant_id: row.get("restaurant_id"),
        grade: row.get("grade"),
        score: row.get("score"),
        inspection_date: datetime_from_millis(row.get("inspection_date")),
        created_at: datetime_from_millis(row.get("created_at")),
        updated_at: datetime_from_millis(row.get("updated_at")),
    }
}

impl Repository {
    /// Look up a grade by primary key.
    ///
    /// Returns None if no such grade exists.
    pub async fn find_grade_by_id(&self, id: i64) -> Result<Option<Grade>, sqlx::Error> {
        let row = sqlx::query(&format!("SELECT {} FROM grades WHERE id = ?", GRADE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(grade_from_row))
    }

    /// All grades of a restaurant, most recent inspection first.
    pub async fn list_grades_for_restaurant(
        &self,
        restaurant_id: i64,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM grades WHERE restaurant_id = ? ORDER BY inspection_date DESC, id DESC",
            GRADE_COLUMNS
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(grade_from_row).collect())
    }

    /// Insert a grade and return the stored record.
    ///
    /// # Errors
    /// Fails with a database error if `restaurant_id` does not reference an
    /// existing restaurant.
    pub async fn create_grade(&self, new: &NewGrade) -> Result<Grade, sqlx::Error> {
        let now = now_ms();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO grades (restaurant_id, grade, score, inspection_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            GRADE_COLUMNS
        ))
        .bind(new.restaurant_id)
        .bind(new.grade.as_str())
        .bind(new.score)
        .bind(new.inspection_date.timestamp_millis())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let grade = grade_from_row(&row);
        debug!(id = grade.id, restaurant_id = grade.restaurant_id, "Grade created");
        Ok(grade)
    }

    /// Apply `patch` to the grade with the given id.
    ///
    /// Returns the number of rows affected (0 or 1). `updated_at` is always bumped.
    pub async fn update_grade(&self, id: i64, patch: &GradePatch) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE grades SET updated_at = ");
        qb.push_bind(now_ms());

        if let Some(score) = patch.score {
            qb.push(", score = ").push_bind(score);
        }
        if let Some(grade) = &patch.grade {
            qb.push(", grade = ").push_bind(grade.clone());
        }
        if let Some(inspection_date) = patch.inspection_date {
            qb.push(", inspection_date = ")
                .push_bind(inspection_date.timestamp_millis());
        }
        if let Some(restaurant_id) = patch.restaurant_id {
            qb.push(", restaurant_id = ").push_bind(restaurant_id);
        }

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete the grade with the given id.
    ///
    /// Returns the number of rows affected; deleting a missing id is not an error.
    pub async fn destroy_grade(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grades WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
