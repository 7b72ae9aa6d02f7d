//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{SignUpFailure, SignUpPayload};
use crate::handlers::health_handler::HealthResponse;
use domain::UserView;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::sign_up,
        crate::handlers::home_handler::environment,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            SignUpPayload,
            SignUpFailure,
            UserView,
            HealthResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "User sign-up"),
        (name = "Home", description = "Deployment information"),
        (name = "Health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
