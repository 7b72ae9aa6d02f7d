//! Home handler.

use axum::{extract::State, routing::get, Router};

use crate::state::AppState;

/// Create home routes
pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(environment))
}

/// Name of the environment this instance runs in, as plain text
#[utoipa::path(
    get,
    path = "/auth-api/home",
    tag = "Home",
    responses(
        (status = 200, description = "Environment name", body = String, content_type = "text/plain", example = json!("Development"))
    )
)]
pub async fn environment(State(state): State<AppState>) -> String {
    state.config.environment.clone()
}
