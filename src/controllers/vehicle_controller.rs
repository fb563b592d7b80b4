use crate::models::response::ApiResponse;
use crate::models::vehicle::{CreateVehicleRequest, VehicleResponse};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar campos
        request.validate()?;

        // Verificar que la matrícula no exista para este usuario
        if self
            .repository
            .plate_exists(owner_id, &request.plate_number)
            .await?
        {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(owner_id, &request.plate_number, request.vehicle_type)
            .await?;

        log::info!("🚙 Vehículo registrado: {}", vehicle.plate_number);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_owner(owner_id).await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}
