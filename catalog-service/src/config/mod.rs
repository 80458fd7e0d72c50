use secrecy::Secret;
use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// Where to send tokens for verification, and the service credential that
/// authenticates this service to the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub url: String,
    pub service_key: Secret<String>,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env and the APP__ prefix
        let common = core_config::Config::load()?;
        let is_prod = core_config::is_prod();

        Ok(CatalogConfig {
            common,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("movie_master"), is_prod)?,
            },
            identity: IdentityConfig {
                url: get_env("IDENTITY_URL", Some("http://localhost:9005"), is_prod)?,
                service_key: Secret::new(get_env(
                    "IDENTITY_SERVICE_KEY",
                    Some("dev-service-key"),
                    is_prod,
                )?),
            },
        })
    }
}
