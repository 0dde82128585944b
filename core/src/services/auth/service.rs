//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::{AuthServiceConfig, MAX_PASSWORD_LENGTH};
use super::password::PasswordHasher;

/// Authentication service orchestrating accounts and token issuance
pub struct AuthService<U: UserRepository> {
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<U>>,
    passwords: PasswordHasher,
    config: AuthServiceConfig,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<U>>,
        config: AuthServiceConfig,
    ) -> DomainResult<Self> {
        Ok(Self {
            passwords: PasswordHasher::new(config.bcrypt_cost)?,
            user_repository,
            token_service,
            config,
        })
    }

    /// Look up an account and check its password
    ///
    /// Unknown email and wrong password produce the same
    /// [`AuthError::InvalidCredentials`] after comparable work.
    pub async fn validate_credentials(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = User::normalize_email(email);

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            self.passwords.verify_dummy(password).await?;
            tracing::debug!("Login attempt for unknown account");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.passwords.verify(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Create a `User` account and start a session for it
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        if !self.config.allow_registration {
            return Err(DomainError::Unauthorized);
        }

        let user = self.create_user(email, password, Role::User).await?;
        tracing::info!(email = %user.email, "Registered new account");

        let pair = self.token_service.issue_tokens(&user).await?;
        Ok(AuthResponse::from_token_pair(pair))
    }

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        require("email", email)?;
        validate_password(password)?;

        let user = self.validate_credentials(email, password).await?;
        let pair = self.token_service.issue_tokens(&user).await?;

        tracing::info!(email = %user.email, "User logged in");
        Ok(AuthResponse::from_token_pair(pair))
    }

    /// Exchange an access token and its refresh token for a new pair
    pub async fn refresh(&self, token: &str, refresh_token: &str) -> DomainResult<AuthResponse> {
        require("token", token)?;
        require("refresh_token", refresh_token)?;

        let pair = self
            .token_service
            .refresh_tokens(token, refresh_token)
            .await?;
        Ok(AuthResponse::from_token_pair(pair))
    }

    /// Profile of the account named by a verified identity claim
    pub async fn current_user(&self, email: &str) -> DomainResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_email(&User::normalize_email(email))
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(UserProfile::from(&user))
    }

    /// Create the configured administrator unless the email is taken
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Account created
    /// * `Ok(false)` - Account already present
    pub async fn ensure_default_user(&self, email: &str, password: &str) -> DomainResult<bool> {
        let normalized = User::normalize_email(email);
        if self.user_repository.find_by_email(&normalized).await?.is_some() {
            tracing::debug!(email = %normalized, "Default administrator already present");
            return Ok(false);
        }

        match self.create_user(email, password, Role::Admin).await {
            Ok(user) => {
                tracing::info!(email = %user.email, "Created default administrator");
                Ok(true)
            }
            // Lost a race with another instance seeding the same account
            Err(DomainError::Auth(AuthError::UserAlreadyExists)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_user(&self, email: &str, password: &str, role: Role) -> DomainResult<User> {
        let email = validate_email(email)?;
        validate_password(password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.passwords.hash(password).await?;
        self.user_repository
            .create(User::new(&email, password_hash, role))
            .await
    }
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Normalized email when it has the shape `local@domain.tld`
fn validate_email(email: &str) -> Result<String, ValidationError> {
    require("email", email)?;
    let email = User::normalize_email(email);

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Shared by registration and login so an accepted password can always log in
fn validate_password(password: &str) -> Result<(), ValidationError> {
    require("password", password)?;
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
