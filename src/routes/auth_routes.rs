use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::models::user::{LoginRequest, LoginResponse, RegisterFormContext, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", post(login))
}

/// GET /register - contexto del formulario de registro
async fn register_form() -> Json<RegisterFormContext> {
    Json(RegisterFormContext::default())
}

/// POST /register - crear cuenta y redirigir al login
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Redirect> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    controller.register(request).await?;
    Ok(Redirect::to("/login"))
}

/// POST /login - validar credenciales y devolver el token de sesión
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login(request).await?;
    Ok(Json(response))
}
