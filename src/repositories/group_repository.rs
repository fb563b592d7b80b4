use crate::models::group::Group;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar o crear el bucket (user, passenger_count) en una sola
    /// sentencia. El UPDATE del ON CONFLICT no cambia nada, solo hace
    /// que RETURNING devuelva la fila existente.
    pub async fn find_or_create(
        &self,
        user_id: Uuid,
        passenger_count: i32,
    ) -> Result<Group, AppError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO sharing_groups (id, user_id, passenger_count, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, passenger_count)
            DO UPDATE SET passenger_count = EXCLUDED.passenger_count
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(passenger_count)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Group>, AppError> {
        let groups = sqlx::query_as::<_, Group>(
            "SELECT * FROM sharing_groups WHERE user_id = $1 ORDER BY passenger_count",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }
}
