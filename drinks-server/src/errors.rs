use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde_json::json;

/// Boundary error type mapped to the JSON error body every failing
/// response carries: `{success: false, error_code, description}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub error_code: &'static str,
    pub description: String,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new ApiError with an error code slug, description and status code
    pub fn new<S: ToString>(
        error_code: &'static str,
        description: S,
        status_code: StatusCode,
    ) -> Self {
        Self {
            error_code,
            description: description.to_string(),
            status_code,
        }
    }

    /// Create new Bad Request Error (400)
    pub fn bad_request() -> Self {
        Self::new(
            "bad_request",
            "The request was malformed in some way",
            StatusCode::BAD_REQUEST,
        )
    }

    /// Create new Not Found Error (404)
    pub fn not_found() -> Self {
        Self::new(
            "not_found",
            "The resource could not be found on the server",
            StatusCode::NOT_FOUND,
        )
    }

    /// Create new Method Not Allowed Error (405)
    pub fn method_not_allowed() -> Self {
        Self::new(
            "method_not_allowed",
            "Incorrect request method was specified",
            StatusCode::METHOD_NOT_ALLOWED,
        )
    }

    /// Create new Unprocessable Entity Error (422)
    pub fn unprocessable_entity() -> Self {
        Self::new(
            "unprocessable_entity",
            "The request was unable to be fulfilled",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
    }

    /// Create new Internal Server Error (500)
    #[allow(dead_code)]
    pub fn internal() -> Self {
        Self::new(
            "internal_server_error",
            "Something went wrong on the server",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code;
        let body = json!({
            "success": false,
            "error_code": self.error_code,
            "description": self.description,
        });
        (status_code, Json(body)).into_response()
    }
}
