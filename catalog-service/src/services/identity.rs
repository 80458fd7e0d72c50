//! Client for the external identity provider.
//!
//! The catalog never validates tokens itself: it forwards the caller's bearer
//! token to the provider's introspection endpoint and trusts the answer. The
//! service authenticates to the provider with its own credential.

use crate::config::IdentityConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::error::AppError;

/// Claims attached to a request once its token has been verified.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub sub: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IntrospectResponse {
    active: bool,
    sub: Option<String>,
    email: Option<String>,
}

#[derive(Clone)]
pub struct IdentityVerifier {
    client: Client,
    verify_url: String,
    service_key: Secret<String>,
}

impl IdentityVerifier {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            client: Client::new(),
            verify_url: format!("{}/introspect", config.url.trim_end_matches('/')),
            service_key: config.service_key.clone(),
        }
    }

    /// Verify a caller token with the identity provider.
    ///
    /// Rejected or inactive tokens are authentication errors; an unreachable
    /// provider is a gateway fault, not the caller's.
    pub async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AppError> {
        let response = self
            .client
            .post(&self.verify_url)
            .bearer_auth(self.service_key.expose_secret())
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider request to {} failed: {}", self.verify_url, e);
                AppError::BadGateway(format!("identity provider unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::AuthError(anyhow::anyhow!(
                "token verification rejected with status {}",
                response.status()
            )));
        }

        let introspection: IntrospectResponse = response.json().await.map_err(|e| {
            tracing::error!("Malformed identity provider response: {}", e);
            AppError::BadGateway(format!("malformed identity provider response: {}", e))
        })?;

        if !introspection.active {
            return Err(AppError::AuthError(anyhow::anyhow!("token is not active")));
        }

        let sub = introspection.sub.ok_or_else(|| {
            AppError::AuthError(anyhow::anyhow!("verified token carries no subject"))
        })?;

        Ok(VerifiedIdentity {
            sub,
            email: introspection.email,
        })
    }
}
