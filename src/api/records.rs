use axum::body::Body;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::db::{BossId, FullRecord, Record, RecordWithBoss, User, UserId};
use crate::{AppError, AppState, RequestBody};

/// Records still awaiting review, newest first. Admin-only.
#[derive(Deserialize, Debug)]
pub struct PendingRecordsRequest {}

impl RequestBody for PendingRecordsRequest {
    type Response = RecordListResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let viewer = user.ok_or(AppError::NotLoggedIn)?;
        if !viewer.is_admin() {
            return Err(AppError::NotAuthorized);
        }

        let records = state.get_pending_records().await?;
        Ok(RecordListResponse { records })
    }
}

/// All records a user has submitted, newest first. Public read.
#[derive(Deserialize, Debug)]
pub struct UserRecordsRequest {
    pub user_id: UserId,
}

impl RequestBody for UserRecordsRequest {
    type Response = UserRecordsResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let records = state.get_user_records(&self.user_id).await?;
        Ok(UserRecordsResponse { records })
    }
}

/// Approved records for one boss, optionally narrowed to one team size.
///
/// Returned in recency order; the leaderboard display re-sorts by completion
/// time.
#[derive(Deserialize, Debug)]
pub struct BossRecordsRequest {
    pub boss_id: BossId,
    pub team_size: Option<String>,
}

impl RequestBody for BossRecordsRequest {
    type Response = BossRecordsResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let records = state
            .get_boss_records(self.boss_id, self.team_size.as_deref())
            .await?;
        Ok(BossRecordsResponse { records })
    }
}

/// The most recently approved records, for the front-page feed.
#[derive(Deserialize, Debug)]
pub struct RecentRecordsRequest {
    pub limit: Option<i64>,
}

impl RequestBody for RecentRecordsRequest {
    type Response = RecordListResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        // A negative limit reads as zero rather than an SQL error.
        let records = state
            .get_recent_records(self.limit.unwrap_or(6).max(0))
            .await?;
        Ok(RecordListResponse { records })
    }
}

#[derive(Serialize, Debug)]
pub struct RecordListResponse {
    pub records: Vec<FullRecord>,
}

impl IntoResponse for RecordListResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Serialize, Debug)]
pub struct UserRecordsResponse {
    pub records: Vec<RecordWithBoss>,
}

impl IntoResponse for UserRecordsResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Serialize, Debug)]
pub struct BossRecordsResponse {
    pub records: Vec<Record>,
}

impl IntoResponse for BossRecordsResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}
