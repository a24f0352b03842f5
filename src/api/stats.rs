use axum::body::Body;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::db::{
    ActiveMember, BossCompletions, RecordHolder, SubmissionStats, User, UserId, UserStats,
};
use crate::{AppError, AppState, RequestBody};

#[derive(Deserialize, Debug)]
pub struct TopRecordHoldersRequest {
    pub limit: Option<i64>,
}

impl RequestBody for TopRecordHoldersRequest {
    type Response = TopRecordHoldersResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let holders = state
            .get_top_record_holders(self.limit.unwrap_or(3).max(0))
            .await?;
        Ok(TopRecordHoldersResponse { holders })
    }
}

#[derive(Serialize, Debug)]
pub struct TopRecordHoldersResponse {
    pub holders: Vec<RecordHolder>,
}

impl IntoResponse for TopRecordHoldersResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct MostActiveMembersRequest {
    pub limit: Option<i64>,
}

impl RequestBody for MostActiveMembersRequest {
    type Response = MostActiveMembersResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let members = state
            .get_most_active_members(self.limit.unwrap_or(3).max(0))
            .await?;
        Ok(MostActiveMembersResponse { members })
    }
}

#[derive(Serialize, Debug)]
pub struct MostActiveMembersResponse {
    pub members: Vec<ActiveMember>,
}

impl IntoResponse for MostActiveMembersResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct SubmissionStatsRequest {}

impl RequestBody for SubmissionStatsRequest {
    type Response = SubmissionStatsResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let stats = state.get_submission_stats().await?;
        Ok(SubmissionStatsResponse { stats })
    }
}

#[derive(Serialize, Debug)]
pub struct SubmissionStatsResponse {
    pub stats: SubmissionStats,
}

impl IntoResponse for SubmissionStatsResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct TopBossCompletionsRequest {
    pub limit: Option<i64>,
}

impl RequestBody for TopBossCompletionsRequest {
    type Response = TopBossCompletionsResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let bosses = state
            .get_top_boss_completions(self.limit.unwrap_or(4).max(0))
            .await?;
        Ok(TopBossCompletionsResponse { bosses })
    }
}

#[derive(Serialize, Debug)]
pub struct TopBossCompletionsResponse {
    pub bosses: Vec<BossCompletions>,
}

impl IntoResponse for TopBossCompletionsResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct UserStatsRequest {
    pub user_id: UserId,
}

impl RequestBody for UserStatsRequest {
    type Response = UserStatsResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let stats = state.get_user_stats(&self.user_id).await?;
        Ok(UserStatsResponse { stats })
    }
}

#[derive(Serialize, Debug)]
pub struct UserStatsResponse {
    pub stats: UserStats,
}

impl IntoResponse for UserStatsResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}
