use std::str::FromStr;

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::db::{Role, User, UserId, UserRsn, VerificationStatus};
use crate::validate::FieldError;
use crate::{AppError, AppState, RequestBody};

/// Marks a member's account as verified or rejected after an admin has
/// checked their RSN.
#[derive(Deserialize, Debug)]
pub struct SetVerificationStatusRequest {
    pub user_id: UserId,
    pub status: String,
}

impl RequestBody for SetVerificationStatusRequest {
    type Response = UserResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let editor = user.ok_or(AppError::NotLoggedIn)?;
        if !editor.is_admin() {
            return Err(AppError::NotAuthorized);
        }

        let status = VerificationStatus::from_str(&self.status).map_err(|()| {
            AppError::Validation(vec![FieldError {
                field: "status",
                message: "must be 'pending', 'verified' or 'rejected'".to_string(),
            }])
        })?;

        let user = state
            .set_verification_status(&self.user_id, status)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;
        Ok(UserResponse { user })
    }
}

/// Promotes or demotes an account by email address.
#[derive(Deserialize, Debug)]
pub struct SetRoleRequest {
    pub email: String,
    pub role: String,
}

impl RequestBody for SetRoleRequest {
    type Response = UserResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let editor = user.ok_or(AppError::NotLoggedIn)?;
        if !editor.is_admin() {
            return Err(AppError::NotAuthorized);
        }

        let mut errors = vec![];
        if self.email.is_empty() {
            errors.push(FieldError {
                field: "email",
                message: "must not be empty".to_string(),
            });
        }
        let role = Role::from_str(&self.role);
        if role.is_err() {
            errors.push(FieldError {
                field: "role",
                message: "must be either 'admin' or 'user'".to_string(),
            });
        }
        let (Ok(role), true) = (role, errors.is_empty()) else {
            return Err(AppError::Validation(errors));
        };

        let user = state
            .set_role_by_email(&self.email, role)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;
        Ok(UserResponse { user })
    }
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub user: User,
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

/// Members with an RSN set, for team-member pickers.
#[derive(Deserialize, Debug)]
pub struct UsersWithRsnRequest {}

impl RequestBody for UsersWithRsnRequest {
    type Response = UsersWithRsnResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let users = state.get_users_with_rsn().await?;
        Ok(UsersWithRsnResponse { users })
    }
}

#[derive(Serialize, Debug)]
pub struct UsersWithRsnResponse {
    pub users: Vec<UserRsn>,
}

impl IntoResponse for UsersWithRsnResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

/// Every account, newest first. Admin-only.
#[derive(Deserialize, Debug)]
pub struct UsersRequest {}

impl RequestBody for UsersRequest {
    type Response = UsersResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let viewer = user.ok_or(AppError::NotLoggedIn)?;
        if !viewer.is_admin() {
            return Err(AppError::NotAuthorized);
        }

        let users = state.get_all_users().await?;
        Ok(UsersResponse { users })
    }
}

#[derive(Serialize, Debug)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

impl IntoResponse for UsersResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}
