pub mod dto;
mod handlers;
mod repo;

use axum::Router;

use crate::state::AppState;

pub use repo::Asset;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
