use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    /// Registrar una cuenta con su perfil
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        // Validar campos
        request.validate()?;

        // Verificar que el email no esté en uso
        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?;

        let (user, profile) = self
            .repository
            .create(
                &request.full_name,
                &request.email,
                &password_hash,
                &request.mobile,
                request.gender,
            )
            .await?;

        log::info!("✅ Cuenta registrada: {}", user.email);

        Ok(UserResponse::from_parts(user, profile))
    }

    /// Validar credenciales y emitir el token de sesión
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar password
        let password_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;

        if !password_valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, &self.jwt_config)?;

        log::info!("🔑 Sesión iniciada: {}", user.email);

        Ok(LoginResponse::success(
            token,
            user.id.to_string(),
            user.full_name,
        ))
    }
}
