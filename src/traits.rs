use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use axum_typed_multipart::{TryFromMultipartWithState, TypedMultipart};

use crate::db::User;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Object that can be received as a request.
///
/// The caller's identity is resolved from the session cookie and passed in
/// explicitly; operations never look it up themselves.
pub trait RequestBody {
    type Response;

    /// Runs before the session cookie is resolved. Sign-out hooks in here.
    async fn preprocess_jar(_state: &AppState, _jar: &CookieJar) -> AppResult {
        Ok(())
    }

    async fn request(self, state: AppState, user: Option<User>)
        -> Result<Self::Response, AppError>;

    async fn as_handler_query(
        State(state): State<AppState>,
        jar: CookieJar,
        Query(item): Query<Self>,
    ) -> Result<impl IntoResponse, AppError>
    where
        Self: Sized,
        Self::Response: IntoResponse,
    {
        Self::preprocess_jar(&state, &jar).await?;
        let user = crate::cookies::process_cookies(&state, &jar).await?;
        let response = item.request(state, user).await?;
        Ok(response)
    }

    async fn as_json_handler(
        State(state): State<AppState>,
        jar: CookieJar,
        Json(item): Json<Self>,
    ) -> Result<impl IntoResponse, AppError>
    where
        Self: Sized,
        Self::Response: IntoResponse,
    {
        Self::preprocess_jar(&state, &jar).await?;
        let user = crate::cookies::process_cookies(&state, &jar).await?;
        let response = item.request(state, user).await?;
        Ok(response)
    }

    async fn as_multipart_form_handler(
        State(state): State<AppState>,
        jar: CookieJar,
        TypedMultipart(item): TypedMultipart<Self>,
    ) -> Result<impl IntoResponse, AppError>
    where
        Self: TryFromMultipartWithState<AppState>,
        Self::Response: IntoResponse,
    {
        Self::preprocess_jar(&state, &jar).await?;
        let user = crate::cookies::process_cookies(&state, &jar).await?;
        let response = item.request(state, user).await?;
        Ok(response)
    }
}
