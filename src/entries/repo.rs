use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, Time};

/// A single calorie-consumption record owned by one user.
///
/// `calories` is nullable in storage but always resolved before a row is
/// persisted; it stays optional here so a patch can carry it through.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalorieEntry {
    pub id: i64,
    #[serde(rename = "date")]
    pub entry_date: Date,
    #[serde(rename = "time")]
    pub entry_time: Time,
    pub text: Option<String>,
    pub calories: Option<f64>,
    pub user_id: i64,
}

impl CalorieEntry {
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<CalorieEntry>> {
        let rows = sqlx::query_as::<_, CalorieEntry>(
            r#"
            SELECT id, entry_date, entry_time, text, calories, user_id
            FROM calorie_entries
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<CalorieEntry>> {
        let entry = sqlx::query_as::<_, CalorieEntry>(
            r#"
            SELECT id, entry_date, entry_time, text, calories, user_id
            FROM calorie_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(entry)
    }

    pub async fn insert(
        db: &PgPool,
        entry_date: Date,
        entry_time: Time,
        text: Option<&str>,
        calories: f64,
        user_id: i64,
    ) -> anyhow::Result<CalorieEntry> {
        let entry = sqlx::query_as::<_, CalorieEntry>(
            r#"
            INSERT INTO calorie_entries (entry_date, entry_time, text, calories, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, entry_date, entry_time, text, calories, user_id
            "#,
        )
        .bind(entry_date)
        .bind(entry_time)
        .bind(text)
        .bind(calories)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(entry)
    }

    /// Persist a patched entry inside a transaction; any failure rolls back
    /// and leaves the stored row unchanged.
    pub async fn update(db: &PgPool, entry: &CalorieEntry) -> anyhow::Result<CalorieEntry> {
        let mut tx = db.begin().await?;
        let result = sqlx::query_as::<_, CalorieEntry>(
            r#"
            UPDATE calorie_entries
            SET entry_date = $1, entry_time = $2, text = $3, calories = $4
            WHERE id = $5
            RETURNING id, entry_date, entry_time, text, calories, user_id
            "#,
        )
        .bind(entry.entry_date)
        .bind(entry.entry_time)
        .bind(entry.text.as_deref())
        .bind(entry.calories)
        .bind(entry.id)
        .fetch_one(&mut *tx)
        .await;

        match result {
            Ok(updated) => {
                tx.commit().await?;
                Ok(updated)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e.into())
            }
        }
    }

    /// Delete a row; returns whether a row existed.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM calorie_entries WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
