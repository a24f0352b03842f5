use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::db::User;
use crate::{AppError, AppResult, AppState, RequestBody};

/// Deletes the caller's session before it is ever resolved to a user, so
/// the operation itself runs anonymously.
#[derive(Deserialize, Debug)]
pub struct SignOutRequest {}

impl RequestBody for SignOutRequest {
    type Response = SignOutResponse;

    async fn preprocess_jar(state: &AppState, jar: &CookieJar) -> AppResult {
        crate::cookies::invalidate_current_session(state, jar).await
    }

    async fn request(
        self,
        _state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        Ok(SignOutResponse {})
    }
}

#[derive(Serialize, Debug)]
pub struct SignOutResponse {}

impl IntoResponse for SignOutResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}
