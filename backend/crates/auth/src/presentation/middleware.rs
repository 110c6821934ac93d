//! Auth Middleware
//!
//! Bearer-token gate for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use kernel::principal::Principal;
use std::sync::Arc;

use crate::application::VerifyTokenUseCase;
use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState {
    pub config: Arc<AuthConfig>,
}

impl AuthGateState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }
}

/// Middleware that requires a valid bearer token
///
/// On success the verified [`Principal`] is inserted into the request
/// extensions. Missing, malformed, invalid and expired tokens all end in the
/// same 401 before the inner handler runs.
pub async fn require_bearer(
    State(state): State<AuthGateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::Unauthenticated)?;

    let user_id = VerifyTokenUseCase::new(state.config.clone()).execute(bearer.token())?;

    req.extensions_mut().insert(Principal::new(user_id));

    Ok(next.run(req).await)
}
