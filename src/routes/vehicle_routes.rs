use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::middleware::auth::SessionUser;
use crate::models::response::ApiResponse;
use crate::models::vehicle::{CreateVehicleRequest, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new().route("/", post(create_vehicle).get(list_vehicles))
}

/// POST /vehicle - registrar un vehículo propio
async fn create_vehicle(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> AppResult<Json<ApiResponse<VehicleResponse>>> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(session.user_id, request).await?;
    Ok(Json(response))
}

/// GET /vehicle - listar los vehículos del usuario
async fn list_vehicles(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> AppResult<Json<Vec<VehicleResponse>>> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_owner(session.user_id).await?;
    Ok(Json(response))
}
