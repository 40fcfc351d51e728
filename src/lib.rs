/*
Staff availability scoring and job auto-assignment.

The engine in `logic` is pure: callers hand it the users and jobs
already fetched from the job backend and get back a ranked snapshot
or a single suggested staff member. The `routes_*` modules expose it
over HTTP with a JSON roster snapshot from `store`.
*/

pub mod config;
pub mod error;
pub mod location;
pub mod logic;
pub mod models;
pub mod rng;
pub mod routes_assign;
pub mod routes_roster;
pub mod state;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // roster snapshot
        .route(
            "/roster",
            get(routes_roster::get_roster).put(routes_roster::put_roster),
        )
        .route("/availability", get(routes_roster::get_availability))
        // assignment suggestions
        .route("/assign/next", post(routes_assign::assign_next))
        .route("/assign/auto", post(routes_assign::assign_auto))
        .route("/assign/first", post(routes_assign::assign_first));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
