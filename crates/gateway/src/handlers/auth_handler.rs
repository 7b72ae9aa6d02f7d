//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::FailureKind;
use domain::{SignUpRequest, UserView};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Sign-up request body.
///
/// Only length ceilings are checked here; the identity rules proper run in
/// the sign-up service.
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    /// Given name
    #[validate(length(max = 100, message = "First name is too long"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    /// Family name
    #[validate(length(max = 100, message = "Last name is too long"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Email address
    #[validate(length(max = 254, message = "Email is too long"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    /// Password: 8+ characters with upper, lower, digit and one of @$!%*?&
    #[validate(length(max = 128, message = "Password is too long"))]
    #[schema(example = "Str0ng!Pass", min_length = 8)]
    pub password: String,
}

impl From<SignUpPayload> for SignUpRequest {
    fn from(payload: SignUpPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
        }
    }
}

/// Body returned when sign-up is refused
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUpFailure {
    /// Summary of the failure
    #[schema(example = "Email already exists")]
    pub message: String,
    /// Individual error messages
    pub errors: Vec<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/signup", post(sign_up))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth-api/auth/signup",
    tag = "Authentication",
    request_body = SignUpPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserView),
        (status = 400, description = "Validation error", body = SignUpFailure),
        (status = 409, description = "Email already exists", body = SignUpFailure),
        (status = 500, description = "Internal error", body = SignUpFailure)
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpPayload>,
) -> Response {
    let result = state.auth_service.sign_up(payload.into()).await;

    let status = match result.failure_kind() {
        None => StatusCode::CREATED,
        Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Conflict) => StatusCode::CONFLICT,
        Some(FailureKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    match result.value {
        Some(view) if result.succeeded => (status, Json(view)).into_response(),
        _ => (
            status,
            Json(SignUpFailure {
                message: result.message,
                errors: result.errors,
            }),
        )
            .into_response(),
    }
}
