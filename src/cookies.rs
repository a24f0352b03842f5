use axum_extra::extract::CookieJar;

use crate::db::User;
use crate::{AppError, AppResult, AppState};

/// Resolves the session cookie to a user. Absent, unknown, or expired
/// sessions resolve to `None`; authorization then fails closed downstream.
pub async fn process_cookies(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<User>, AppError> {
    let Some(cookie) = jar.get("session") else {
        return Ok(None);
    };
    Ok(state.session_bearer(cookie.value()).await?)
}

/// Deletes the session named by the cookie, if there is one. The cookie
/// itself is the auth provider's to clear.
pub async fn invalidate_current_session(state: &AppState, jar: &CookieJar) -> AppResult {
    if let Some(cookie) = jar.get("session") {
        state.remove_session(cookie.value()).await?;
    }
    Ok(())
}
