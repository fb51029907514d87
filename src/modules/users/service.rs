use gradebook_config::PasswordConfig;
use gradebook_core::{AppError, PaginationParams, hash_password_with_cost};
use gradebook_db::Store;
use gradebook_models::{CreateUserDto, Email, NewUser, PaginatedUsersResponse, Role, User};
use tracing::{info, instrument};

use crate::metrics::track_user_created;

pub const EMAIL_IN_USE_MESSAGE: &str = "Email already in use";

pub struct UserService;

impl UserService {
    /// Admin-initiated account creation. Only teacher and student accounts
    /// can be made this way.
    #[instrument(skip(store, password_config, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(
        store: &dyn Store,
        password_config: &PasswordConfig,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        if !dto.role.is_assignable() {
            return Err(AppError::bad_request(
                "Role must be either teacher or student",
            ));
        }

        Self::insert_user(
            store,
            password_config,
            &dto.name,
            dto.email,
            &dto.password,
            dto.role,
        )
        .await
    }

    /// Shared by admin creation and self-registration.
    ///
    /// The email is checked up front for a friendly answer, and the unique
    /// index catches the race where two requests pass that check together.
    pub(crate) async fn insert_user(
        store: &dyn Store,
        password_config: &PasswordConfig,
        name: &str,
        email: Email,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("Name is required"));
        }

        if store.email_exists(&email).await? {
            return Err(AppError::conflict(EMAIL_IN_USE_MESSAGE));
        }

        let password_hash = hash_password_with_cost(password, password_config.bcrypt_cost)?;

        let user = store
            .create_user(NewUser {
                name: name.to_string(),
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::conflict(EMAIL_IN_USE_MESSAGE)
                } else {
                    AppError::from(e)
                }
            })?;

        info!(user_id = %user.id, role = %user.role, "User created");
        track_user_created(user.role);

        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn list_students(
        store: &dyn Store,
        params: &PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let (items, total) = store
            .list_users_by_role(Role::Student, params.limit(), params.offset())
            .await?;

        Ok(PaginatedUsersResponse {
            items,
            meta: params.meta(total),
        })
    }
}
