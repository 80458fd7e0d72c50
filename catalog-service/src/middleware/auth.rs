use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::services::{IdentityVerifier, VerifiedIdentity};

/// Gate for routes that require a verified caller identity.
///
/// A missing or non-bearer Authorization header is rejected before the
/// identity provider is contacted. On success the decoded identity is stored
/// in request extensions for handlers to pick up via [`AuthUser`].
pub async fn auth_middleware(
    State(identity): State<IdentityVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            return Err(AppError::AuthError(anyhow::anyhow!(
                "Missing or invalid Authorization header"
            )));
        }
    };

    let verified = identity.verify(token).await?;
    tracing::debug!(user = %verified.sub, "Verified caller identity");

    req.extensions_mut().insert(verified);

    Ok(next.run(req).await)
}

/// Extractor to easily get the verified identity in handlers.
pub struct AuthUser(pub VerifiedIdentity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Verified identity missing from request extensions"
                ))
            })?;

        Ok(AuthUser(identity))
    }
}
