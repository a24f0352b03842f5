use axum::Json;
use axum::body::Body;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use itertools::Itertools;
use serde_json::json;

use crate::validate::FieldError;

pub type AppResult<T = ()> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    SqlError(sqlx::Error),
    NotLoggedIn,
    NotAuthorized,
    RecordDoesNotExist,
    BossDoesNotExist,
    UserDoesNotExist,
    Validation(Vec<FieldError>),

    Other(String),
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            Self::SqlError(err) => format!("Internal SQL error: {}", err),
            Self::NotLoggedIn => "Not logged in".to_string(),
            Self::NotAuthorized => "Unauthorized".to_string(),
            Self::RecordDoesNotExist => "Record not found".to_string(),
            Self::BossDoesNotExist => "Boss not found".to_string(),
            Self::UserDoesNotExist => "User not found".to_string(),
            Self::Validation(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .join("; "),

            Self::Other(msg) => msg.to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotLoggedIn => StatusCode::UNAUTHORIZED,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::RecordDoesNotExist => StatusCode::NOT_FOUND,
            Self::BossDoesNotExist => StatusCode::NOT_FOUND,
            Self::UserDoesNotExist => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        let body = Json(json!({ "success": false, "error": self.message() }));
        (self.status_code(), body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> AppError {
        AppError::SqlError(err)
    }
}
