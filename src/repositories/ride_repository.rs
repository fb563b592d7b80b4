use crate::models::group::RideGroupLink;
use crate::models::ride::Ride;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Fila con los datos del conductor asignado a un ride
#[derive(Debug, sqlx::FromRow)]
pub struct DriverRow {
    pub full_name: String,
    pub email: String,
    pub plate_number: String,
    pub mobile: Option<String>,
}

/// Fila con los datos de un compañero de viaje
#[derive(Debug, sqlx::FromRow)]
pub struct CoRiderRow {
    pub full_name: String,
    pub gender: Option<i16>,
    pub passenger_count: i32,
}

pub struct RideRepository {
    pool: PgPool,
}

impl RideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        destination: &str,
        arrive_time: DateTime<Utc>,
        passenger_count: i32,
        vehicle_type: i16,
        if_share: bool,
    ) -> Result<Ride, AppError> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (id, owner_id, destination, arrive_time, passenger_count,
                               vehicle_type, vehicle_id, confirmed, completed, if_share, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, FALSE, FALSE, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(destination)
        .bind(arrive_time)
        .bind(passenger_count)
        .bind(vehicle_type)
        .bind(if_share)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(ride)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ride>, AppError> {
        let ride = sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ride)
    }

    /// Rides de un usuario filtrados por estado, ordenados por llegada
    pub async fn find_by_owner_and_status(
        &self,
        owner_id: Uuid,
        confirmed: bool,
        completed: bool,
    ) -> Result<Vec<Ride>, AppError> {
        let rides = sqlx::query_as::<_, Ride>(
            r#"
            SELECT * FROM rides
            WHERE owner_id = $1 AND confirmed = $2 AND completed = $3
            ORDER BY arrive_time
            "#,
        )
        .bind(owner_id)
        .bind(confirmed)
        .bind(completed)
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    pub async fn update(
        &self,
        id: Uuid,
        destination: &str,
        arrive_time: DateTime<Utc>,
        passenger_count: i32,
        vehicle_type: i16,
        if_share: bool,
    ) -> Result<Ride, AppError> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET destination = $2, arrive_time = $3, passenger_count = $4,
                vehicle_type = $5, if_share = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(destination)
        .bind(arrive_time)
        .bind(passenger_count)
        .bind(vehicle_type)
        .bind(if_share)
        .fetch_one(&self.pool)
        .await?;

        Ok(ride)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM rides WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Enlazar un grupo al ride. Idempotente si el enlace ya existe.
    pub async fn attach_group(&self, ride_id: Uuid, group_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO ride_groups (ride_id, group_id)
            VALUES ($1, $2)
            ON CONFLICT (ride_id, group_id) DO NOTHING
            "#,
        )
        .bind(ride_id)
        .bind(group_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Candidatos de búsqueda: abiertos, compartibles, dentro de la
    /// ventana de llegada y de otros usuarios. Los filtros de grupo,
    /// destino y capacidad se aplican después en memoria.
    pub async fn search_candidates(
        &self,
        excluded_owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Ride>, AppError> {
        let rides = sqlx::query_as::<_, Ride>(
            r#"
            SELECT * FROM rides
            WHERE completed = FALSE
              AND confirmed = FALSE
              AND if_share = TRUE
              AND arrive_time >= $2
              AND arrive_time <= $3
              AND owner_id != $1
            ORDER BY arrive_time
            "#,
        )
        .bind(excluded_owner)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rides)
    }

    /// Enlaces ride-grupo de los rides indicados
    pub async fn group_links_for_rides(
        &self,
        ride_ids: &[Uuid],
    ) -> Result<Vec<RideGroupLink>, AppError> {
        let links = sqlx::query_as::<_, RideGroupLink>(
            "SELECT ride_id, group_id FROM ride_groups WHERE ride_id = ANY($1)",
        )
        .bind(ride_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Pasajeros actuales por ride: suma de los tamaños de los grupos enlazados
    pub async fn passenger_sums_for_rides(
        &self,
        ride_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, i64)>, AppError> {
        let sums = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT rg.ride_id, COALESCE(SUM(sg.passenger_count), 0) AS passengers
            FROM ride_groups rg
            JOIN sharing_groups sg ON sg.id = rg.group_id
            WHERE rg.ride_id = ANY($1)
            GROUP BY rg.ride_id
            "#,
        )
        .bind(ride_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(sums)
    }

    pub async fn passenger_sum(&self, ride_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(sg.passenger_count), 0)
            FROM ride_groups rg
            JOIN sharing_groups sg ON sg.id = rg.group_id
            WHERE rg.ride_id = $1
            "#,
        )
        .bind(ride_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Compañeros de viaje del ride, excluyendo al usuario indicado
    pub async fn find_co_riders(
        &self,
        ride_id: Uuid,
        excluded_user: Uuid,
    ) -> Result<Vec<CoRiderRow>, AppError> {
        let riders = sqlx::query_as::<_, CoRiderRow>(
            r#"
            SELECT u.full_name, p.gender, sg.passenger_count
            FROM ride_groups rg
            JOIN sharing_groups sg ON sg.id = rg.group_id
            JOIN users u ON u.id = sg.user_id
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE rg.ride_id = $1 AND sg.user_id != $2
            ORDER BY u.full_name
            "#,
        )
        .bind(ride_id)
        .bind(excluded_user)
        .fetch_all(&self.pool)
        .await?;

        Ok(riders)
    }

    /// Datos del conductor a partir del vehículo asignado
    pub async fn find_driver(&self, vehicle_id: Uuid) -> Result<Option<DriverRow>, AppError> {
        let driver = sqlx::query_as::<_, DriverRow>(
            r#"
            SELECT u.full_name, u.email, v.plate_number, p.mobile
            FROM vehicles v
            JOIN users u ON u.id = v.owner_id
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE v.id = $1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    /// Asignar un vehículo a un ride abierto y confirmarlo
    pub async fn assign_vehicle(
        &self,
        ride_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Option<Ride>, AppError> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET vehicle_id = $2, confirmed = TRUE
            WHERE id = $1 AND confirmed = FALSE AND completed = FALSE
            RETURNING *
            "#,
        )
        .bind(ride_id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ride)
    }

    /// Marcar como completado un ride ya confirmado
    pub async fn mark_completed(&self, ride_id: Uuid) -> Result<Option<Ride>, AppError> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET completed = TRUE
            WHERE id = $1 AND confirmed = TRUE AND completed = FALSE
            RETURNING *
            "#,
        )
        .bind(ride_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ride)
    }
}
