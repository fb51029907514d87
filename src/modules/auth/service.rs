use gradebook_auth::issue_token;
use gradebook_config::{JwtConfig, PasswordConfig};
use gradebook_core::{AppError, dummy_hash, verify_password};
use gradebook_db::Store;
use gradebook_models::{Email, LoginRequest, LoginResponse, RegisterRequestDto, Role, User};
use tracing::{info, instrument, warn};

use crate::metrics::{track_token_issued, track_user_login};
use crate::modules::users::service::UserService;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Public sign-up. The account is always a student.
    #[instrument(skip(store, password_config, dto), fields(email = %dto.email))]
    pub async fn register_student(
        store: &dyn Store,
        password_config: &PasswordConfig,
        dto: RegisterRequestDto,
    ) -> Result<User, AppError> {
        UserService::insert_user(
            store,
            password_config,
            &dto.name,
            dto.email,
            &dto.password,
            Role::Student,
        )
        .await
    }

    /// Unknown email, malformed email and wrong password all fail the same way,
    /// and each runs one bcrypt verification at the configured cost.
    #[instrument(skip(store, jwt_config, password_config, dto))]
    pub async fn login(
        store: &dyn Store,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let credentials = match Email::new(&dto.email) {
            Ok(email) => store.find_credentials_by_email(&email).await?,
            Err(_) => None,
        };

        let verified = match credentials {
            Some(credentials) => {
                verify_password(&dto.password, &credentials.password_hash).then_some(credentials)
            }
            None => {
                verify_password(&dto.password, dummy_hash(password_config.bcrypt_cost)?);
                None
            }
        };

        let Some(credentials) = verified else {
            warn!("Failed login attempt");
            track_user_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let user = credentials.user;
        let token = issue_token(user.id, user.role, jwt_config)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        track_user_login(true);
        track_token_issued();

        Ok(LoginResponse { token, user })
    }
}
