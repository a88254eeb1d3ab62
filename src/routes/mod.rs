use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod doc;
pub mod food;
pub mod health;
pub mod orders;
pub mod user;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/food", food::router())
        .nest("/cart", cart::router())
        .nest("/order", orders::router())
}
