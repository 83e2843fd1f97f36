use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Chirp;

/// Outcome of an owner-checked delete. "Doesn't exist" and "exists but is
/// someone else's" must stay distinguishable so the handler can answer 404
/// vs 403.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Forbidden,
    NotFound,
}

/// Data access for the chirps table
pub struct ChirpStore {
    pool: PgPool,
}

impl ChirpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, body: &str, user_id: Uuid) -> Result<Chirp, sqlx::Error> {
        sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (body, user_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// All chirps, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Chirp>, sqlx::Error> {
        sqlx::query_as::<_, Chirp>("SELECT * FROM chirps ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Chirp>, sqlx::Error> {
        sqlx::query_as::<_, Chirp>("SELECT * FROM chirps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a chirp on behalf of `user_id`, refusing if it belongs to
    /// someone else.
    pub async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<DeleteOutcome, sqlx::Error> {
        let chirp = match self.get(id).await? {
            Some(chirp) => chirp,
            None => return Ok(DeleteOutcome::NotFound),
        };

        if chirp.user_id != user_id {
            return Ok(DeleteOutcome::Forbidden);
        }

        // The ownership condition is repeated here so the delete itself is
        // atomic; the read above only decides between 403 and 404.
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            // Deleted out from under us between the read and the delete
            return Ok(DeleteOutcome::NotFound);
        }

        Ok(DeleteOutcome::Deleted)
    }
}
