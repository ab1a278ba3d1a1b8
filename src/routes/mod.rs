use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod doc;
pub mod donations;
pub mod health;
pub mod orders;
pub mod params;
pub mod pets;
pub mod tickets;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/orders", orders::router())
        .nest("/pets", pets::router())
        .nest("/donations", donations::router())
        .nest("/tickets", tickets::router())
        .nest("/admin", admin::router())
}
