use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/", post(handlers::register))
        .route("/auth/token", post(handlers::login_for_token))
        .route("/", get(handlers::current_user))
}
