use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::ride_controller::RideController;
use crate::middleware::auth::SessionUser;
use crate::models::response::ApiResponse;
use crate::models::ride::{
    ConfirmRideRequest, EditRideFormContext, JoinRideRequest, RideDetailResponse, RideFormContext,
    RideRequest, RideResponse, SearchFormContext, SearchResultsResponse, SearchRideRequest,
    StartedRidesResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_ride_router() -> Router<AppState> {
    Router::new()
        .route("/require", get(require_form).post(require_ride))
        .route("/started", get(started_rides))
        .route("/search", get(search_form).post(search_rides))
        .route("/:id", get(ride_detail))
        .route("/:id/edit", get(edit_form).post(edit_ride))
        .route("/:id/cancel", post(cancel_ride))
        .route("/:id/join", post(join_ride))
        .route("/:id/confirm", post(confirm_ride))
        .route("/:id/complete", post(complete_ride))
}

/// GET /ride/require - contexto del formulario de solicitud
async fn require_form() -> Json<RideFormContext> {
    Json(RideFormContext::default())
}

/// POST /ride/require - crear la solicitud y redirigir al inicio
async fn require_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Json(request): Json<RideRequest>,
) -> AppResult<Redirect> {
    let controller = RideController::new(state.pool.clone());
    controller.require_ride(session.user_id, request).await?;
    Ok(Redirect::to("/"))
}

/// GET /ride/started - rides del usuario por estado
async fn started_rides(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> AppResult<Json<StartedRidesResponse>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.started_rides(session.user_id).await?;
    Ok(Json(response))
}

/// GET /ride/search - contexto del formulario de búsqueda
async fn search_form() -> Json<SearchFormContext> {
    Json(SearchFormContext::default())
}

/// POST /ride/search - buscar rides compartidos
async fn search_rides(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Json(request): Json<SearchRideRequest>,
) -> AppResult<Json<SearchResultsResponse>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.search_rides(session.user_id, request).await?;
    Ok(Json(response))
}

/// GET /ride/:id - detalle de un ride propio
async fn ride_detail(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RideDetailResponse>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.ride_detail(session.user_id, id).await?;
    Ok(Json(response))
}

/// GET /ride/:id/edit - formulario de edición con los valores actuales
async fn edit_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EditRideFormContext>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.edit_form(session.user_id, id).await?;
    Ok(Json(response))
}

/// POST /ride/:id/edit - guardar cambios y redirigir al inicio
async fn edit_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RideRequest>,
) -> AppResult<Redirect> {
    let controller = RideController::new(state.pool.clone());
    controller.edit_ride(session.user_id, id, request).await?;
    Ok(Redirect::to("/"))
}

/// POST /ride/:id/cancel - borrar un ride propio y redirigir al inicio
async fn cancel_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    let controller = RideController::new(state.pool.clone());
    controller.cancel_ride(session.user_id, id).await?;
    Ok(Redirect::to("/"))
}

/// POST /ride/:id/join - unirse a un ride compartido
async fn join_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<JoinRideRequest>,
) -> AppResult<Json<ApiResponse<RideResponse>>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.join_ride(session.user_id, id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Unido al ride exitosamente".to_string(),
    )))
}

/// POST /ride/:id/confirm - asignar un vehículo propio al ride
async fn confirm_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConfirmRideRequest>,
) -> AppResult<Json<ApiResponse<RideResponse>>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.confirm_ride(session.user_id, id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Ride confirmado exitosamente".to_string(),
    )))
}

/// POST /ride/:id/complete - marcar un ride confirmado como completado
async fn complete_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RideResponse>>> {
    let controller = RideController::new(state.pool.clone());
    let response = controller.complete_ride(session.user_id, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Ride completado exitosamente".to_string(),
    )))
}
