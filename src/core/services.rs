use crate::auth::AuthContext;
use crate::auth::jwt::JwtService;
use crate::core::errors::{AdminError, FieldErrors};
use crate::core::models::{
    requests::{CreateUserRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, UpdateUserRequest},
    stats::DashboardStats,
    token::AccessToken,
    user::{NewUser, Role, User, UserChanges},
};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const EMAIL_TAKEN: &str = "The email has already been taken.";

/// A freshly issued bearer token together with the user it belongs to.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user: User,
    pub access_token: String,
}

pub struct UserAdminService<S: Storage> {
    storage: S,
    jwt_service: JwtService,
    bcrypt_cost: u32,
}

fn parse_user_id(user_id: &str) -> Result<u64, AdminError> {
    user_id
        .parse()
        .map_err(|_| AdminError::UserNotFound(user_id.to_string()))
}

fn email_taken(email: String) -> AdminError {
    debug!(%email, "email already registered");
    AdminError::Validation(FieldErrors::single("email", EMAIL_TAKEN))
}

impl<S: Storage> UserAdminService<S> {
    pub fn new(storage: S, jwt_secret: String, token_ttl_secs: u64, bcrypt_cost: u32) -> Self {
        UserAdminService {
            storage,
            jwt_service: JwtService::new(jwt_secret, token_ttl_secs),
            bcrypt_cost,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, AdminError> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| AdminError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    async fn issue_token(&self, user: &User) -> Result<String, AdminError> {
        let token_id = Uuid::new_v4().to_string();
        let (token, expires_at) = self.jwt_service.generate_token(user, &token_id)?;
        self.storage
            .save_token(AccessToken {
                id: token_id,
                user_id: user.id,
                created_at: Utc::now(),
                expires_at,
            })
            .await?;
        Ok(token)
    }

    /// Resolves a bearer token to its caller. The signature and expiry must
    /// verify, the token row must still exist and the user must still exist.
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthContext, AdminError> {
        let claims = self.jwt_service.validate_token(token)?;
        let user_id = claims.user_id()?;

        let record = self
            .storage
            .get_token(&claims.jti)
            .await?
            .ok_or_else(|| AdminError::Unauthenticated("Token has been revoked".to_string()))?;
        if record.user_id != user_id {
            return Err(AdminError::Unauthenticated("Token subject mismatch".to_string()));
        }
        if record.is_expired(Utc::now()) {
            return Err(AdminError::Unauthenticated("Token has expired".to_string()));
        }

        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| AdminError::Unauthenticated(format!("User {} no longer exists", user_id)))?;
        Ok(AuthContext {
            user,
            token_id: claims.jti,
        })
    }

    /// Role gate: only callers whose stored role is `admin` pass.
    pub fn require_admin(&self, caller: &AuthContext) -> Result<(), AdminError> {
        if caller.is_admin() {
            Ok(())
        } else {
            Err(AdminError::AdminRequired(caller.user_id()))
        }
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<IssuedToken, AdminError> {
        let user = self
            .storage
            .get_user_by_email(&req.email)
            .await?
            .ok_or(AdminError::InvalidCredentials)?;

        if !bcrypt::verify(&req.password, &user.password)
            .map_err(|e| AdminError::InternalServerError(format!("Password verification error: {}", e)))?
        {
            return Err(AdminError::InvalidCredentials);
        }

        let access_token = self.issue_token(&user).await?;
        info!(user_id = user.id, "user logged in");
        Ok(IssuedToken { user, access_token })
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<IssuedToken, AdminError> {
        req.check()?;
        let (Some(name), Some(email), Some(password)) = (req.name, req.email, req.password) else {
            return Err(AdminError::InternalServerError("validated fields missing".to_string()));
        };
        if self.storage.get_user_by_email(&email).await?.is_some() {
            return Err(email_taken(email));
        }

        let user = self
            .storage
            .insert_user(NewUser {
                name,
                email,
                password_hash: self.hash_password(&password)?,
                role: Role::User,
            })
            .await
            .map_err(|e| match e {
                AdminError::EmailAlreadyRegistered(email) => email_taken(email),
                e => e,
            })?;
        let access_token = self.issue_token(&user).await?;
        info!(user_id = user.id, "user registered");
        Ok(IssuedToken { user, access_token })
    }

    /// Revokes only the token presented with this request.
    pub async fn logout(&self, caller: &AuthContext) -> Result<(), AdminError> {
        self.storage.revoke_token(&caller.token_id).await?;
        info!(user_id = caller.user_id(), "user logged out");
        Ok(())
    }

    pub async fn profile(&self, caller: &AuthContext) -> Result<User, AdminError> {
        self.find_user(caller.user_id()).await
    }

    pub async fn update_profile(&self, caller: &AuthContext, req: UpdateProfileRequest) -> Result<User, AdminError> {
        req.check()?;
        self.apply_update(caller.user_id(), req.into()).await
    }

    /// Self-service account removal; all of the caller's tokens go with it.
    pub async fn delete_account(&self, caller: &AuthContext) -> Result<(), AdminError> {
        let user_id = caller.user_id();
        if !self.storage.delete_user_with_tokens(user_id).await? {
            return Err(AdminError::UserNotFound(user_id.to_string()));
        }
        info!(user_id, "user deleted own account");
        Ok(())
    }

    async fn find_user(&self, user_id: u64) -> Result<User, AdminError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| AdminError::UserNotFound(user_id.to_string()))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AdminError> {
        self.storage.list_users().await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, AdminError> {
        self.find_user(parse_user_id(user_id)?).await
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, AdminError> {
        req.check()?;
        let role = req.role();
        let (Some(name), Some(email), Some(password)) = (req.name, req.email, req.password) else {
            return Err(AdminError::InternalServerError("validated fields missing".to_string()));
        };

        if self.storage.get_user_by_email(&email).await?.is_some() {
            warn!(%email, "refusing to create user with existing email");
            return Err(AdminError::EmailAlreadyRegistered(email));
        }

        let user = self
            .storage
            .insert_user(NewUser {
                name,
                email,
                password_hash: self.hash_password(&password)?,
                role,
            })
            .await?;
        info!(user_id = user.id, role = %user.role, "user created");
        Ok(user)
    }

    /// The target must exist before the payload is validated.
    pub async fn update_user(&self, user_id: &str, req: UpdateUserRequest) -> Result<User, AdminError> {
        let user = self.get_user(user_id).await?;
        req.check()?;
        self.apply_update(user.id, req).await
    }

    async fn apply_update(&self, user_id: u64, req: UpdateUserRequest) -> Result<User, AdminError> {
        if let Some(email) = req.email.as_deref() {
            if let Some(owner) = self.storage.get_user_by_email(email).await? {
                if owner.id != user_id {
                    return Err(email_taken(email.to_string()));
                }
            }
        }

        let role = req.role();
        let changes = UserChanges {
            name: req.name,
            email: req.email,
            password_hash: req.password.as_deref().map(|p| self.hash_password(p)).transpose()?,
            role,
        };
        if !changes.is_empty() {
            self.storage
                .update_user(user_id, changes)
                .await
                .map_err(|e| match e {
                    AdminError::EmailAlreadyRegistered(email) => email_taken(email),
                    e => e,
                })?
                .ok_or_else(|| AdminError::UserNotFound(user_id.to_string()))?;
            info!(user_id, "user updated");
        }

        // Re-read so the response reflects what the store now holds.
        self.find_user(user_id).await
    }

    /// Admin removal of another account. Self-deletion is refused even for
    /// admins.
    pub async fn delete_user(&self, caller: &AuthContext, user_id: &str) -> Result<(), AdminError> {
        let user = self.get_user(user_id).await?;
        if user.id == caller.user_id() {
            warn!(user_id = user.id, "admin attempted self-deletion");
            return Err(AdminError::SelfDeletion(user.id));
        }

        if !self.storage.delete_user_with_tokens(user.id).await? {
            return Err(AdminError::UserNotFound(user.id.to_string()));
        }
        info!(user_id = user.id, deleted_by = caller.user_id(), "user deleted");
        Ok(())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AdminError> {
        self.storage.user_stats().await
    }

    /// Makes sure an admin account with the given email exists, creating it
    /// when absent. An existing account is left as it is; one without the
    /// admin role is an error.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> Result<User, AdminError> {
        if let Some(existing) = self.storage.get_user_by_email(email).await? {
            if !existing.is_admin() {
                warn!(user_id = existing.id, "seed admin email belongs to a non-admin user");
                return Err(AdminError::AdminRequired(existing.id));
            }
            return Ok(existing);
        }

        let req = CreateUserRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            password_confirmation: Some(password.to_string()),
            role: Some(Role::Admin.to_string()),
            ..Default::default()
        };
        self.create_user(req).await
    }
}
