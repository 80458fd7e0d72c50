//! service-core: shared infrastructure for the movie catalog services.
pub mod config;
pub mod error;
pub mod observability;
