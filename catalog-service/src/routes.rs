//! The canonical route table.
//!
//! Every endpoint is declared here as `{path, policy, methods}` and nowhere
//! else, so routing and auth gating cannot drift apart. Handlers never decide
//! their own gating.

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put, MethodRouter};
use axum::Router;
use service_core::observability::metrics_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::auth_middleware;
use crate::startup::AppState;

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    Public,
    Authenticated,
}

pub struct RouteSpec {
    pub path: &'static str,
    pub policy: AuthPolicy,
    handler: MethodRouter<AppState>,
}

impl RouteSpec {
    fn new(path: &'static str, policy: AuthPolicy, handler: MethodRouter<AppState>) -> Self {
        Self {
            path,
            policy,
            handler,
        }
    }
}

/// Reads by id and all writes to the catalog require a verified identity;
/// the bulk list queries and the watch list are public. The gating history
/// behind this split is recorded in DESIGN.md.
pub fn route_table() -> Vec<RouteSpec> {
    use AuthPolicy::{Authenticated, Public};

    vec![
        RouteSpec::new("/", Public, get(handlers::liveness)),
        RouteSpec::new("/health", Public, get(handlers::health_check)),
        RouteSpec::new("/metrics", Public, get(handlers::metrics)),
        RouteSpec::new("/movies", Public, get(handlers::list_movies)),
        RouteSpec::new(
            "/movies/:id",
            Authenticated,
            get(handlers::get_movie).delete(handlers::delete_movie),
        ),
        RouteSpec::new("/movies/add", Authenticated, post(handlers::create_movie)),
        RouteSpec::new(
            "/movies/update/:id",
            Authenticated,
            put(handlers::update_movie),
        ),
        RouteSpec::new("/latest-movie", Public, get(handlers::latest_movies)),
        RouteSpec::new("/topMovies", Public, get(handlers::top_movies)),
        RouteSpec::new(
            "/movie/my-collection",
            Authenticated,
            get(handlers::my_collection),
        ),
        RouteSpec::new("/genreMovies", Public, get(handlers::movies_by_genre)),
        RouteSpec::new(
            "/myWatchList",
            Public,
            get(handlers::list_watch_list).post(handlers::add_watch_list_entry),
        ),
    ]
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();

    for route in route_table() {
        let handler = match route.policy {
            AuthPolicy::Authenticated => route.handler.layer(from_fn_with_state(
                state.identity.clone(),
                auth_middleware,
            )),
            AuthPolicy::Public => route.handler,
        };
        router = router.route(route.path, handler);
    }

    router
        .layer(CorsLayer::permissive())
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
