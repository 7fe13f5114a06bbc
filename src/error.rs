use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error returned by route handlers, rendered as `{ "error", "message" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] mealmate_shared::Error),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Domain(mealmate_shared::Error::Unknown(value))
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str) {
        use mealmate_shared::Error;

        match self {
            AppError::Domain(Error::Validate(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation")
            }
            AppError::Domain(Error::User(_)) => (StatusCode::BAD_REQUEST, "user"),
            AppError::Domain(Error::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Domain(Error::Forbidden(_)) => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::Domain(Error::Otp(_)) => (StatusCode::BAD_REQUEST, "otp"),
            AppError::Domain(Error::Email(_)) => (StatusCode::BAD_GATEWAY, "email"),
            AppError::Domain(Error::Unknown(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.parts();

        let message = match &self {
            AppError::Domain(mealmate_shared::Error::Unknown(err)) => {
                tracing::error!(error = ?err, "Unhandled error");
                "Something went wrong, please retry later".to_owned()
            }
            err => err.to_string(),
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}
