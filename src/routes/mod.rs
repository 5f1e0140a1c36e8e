use axum::{Router, response::Redirect, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod params;
pub mod properties;

// Build the portal router without binding state; it is provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(auth::router())
        .merge(properties::router())
        .merge(favorites::router())
}

// The landing page is the login entry point.
async fn root() -> Redirect {
    Redirect::to("/login")
}
