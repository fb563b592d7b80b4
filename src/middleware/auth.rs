//! Middleware de sesión
//!
//! Este módulo protege las páginas que requieren sesión iniciada.
//! Una request sin sesión válida se redirige a /login, igual que
//! haría el frontend con un usuario anónimo.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Usuario con sesión activa que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
}

/// Middleware de sesión. Sin token válido no hay error: la respuesta
/// es siempre una redirección a /login.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = match request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
    {
        Some(auth_header) => auth_header,
        None => return Ok(Redirect::to("/login").into_response()),
    };

    let token = match extract_token_from_header(auth_header) {
        Ok(token) => token,
        Err(_) => return Ok(Redirect::to("/login").into_response()),
    };

    // Decodificar y validar el token de sesión
    let jwt_config = JwtConfig::from(&state.config);
    let claims = match verify_token(token, &jwt_config) {
        Ok(claims) => claims,
        Err(_) => return Ok(Redirect::to("/login").into_response()),
    };

    let user_id = match Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => return Ok(Redirect::to("/login").into_response()),
    };

    // La sesión solo vale si la cuenta sigue existiendo
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(&state.pool)
        .await?;

    if !exists.0 {
        return Ok(Redirect::to("/login").into_response());
    }

    // Inyectar el usuario de sesión en las extensions
    request.extensions_mut().insert(SessionUser { user_id });

    Ok(next.run(request).await)
}
