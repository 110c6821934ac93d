//! Login Use Case
//!
//! Checks credentials and issues a bearer token.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user_id: UserId,
    pub access_token: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Every failure path returns the same `InvalidCredentials`
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user_name =
            UserName::new(input.user_name).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_by_user_name(&user_name).await?;

        // Unknown users still pay for one hash verification
        let (user_id, password_valid) = match &user {
            Some(user) => (
                Some(user.user_id),
                user.password_hash.verify(&raw_password, self.config.pepper()),
            ),
            None => {
                let _ = UserPassword::dummy().verify(&raw_password, self.config.pepper());
                (None, false)
            }
        };

        let user_id = match (user_id, password_valid) {
            (Some(user_id), true) => user_id,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let issued = self.config.signer.issue(&user_id.to_string())?;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(LoginOutput {
            user_id,
            access_token: issued.token,
            expires_in: issued.expires_in,
            expires_at: issued.expires_at,
        })
    }
}
