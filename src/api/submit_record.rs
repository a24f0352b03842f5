use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum_typed_multipart::TryFromMultipart;
use serde::Serialize;

use crate::api::ApiResponse;
use crate::db::{Record, User, UserId};
use crate::validate::RecordSubmission;
use crate::{AppError, AppState, RequestBody};

#[derive(TryFromMultipart, Debug)]
pub struct SubmitRecordRequest {
    pub boss_id: String,
    pub completion_time: String,
    pub team_size: String,
    pub team_members: Vec<String>,
    pub screenshot_url: String,
}

// TODO: implement actual rate limiting; always permits for now.
async fn check_rate_limit(_user_id: &UserId) -> bool {
    true
}

impl RequestBody for SubmitRecordRequest {
    type Response = SubmitRecordResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let submitter = user.ok_or(AppError::NotLoggedIn)?;

        if !check_rate_limit(&submitter.id).await {
            return Err(AppError::Other(
                "Please wait before submitting another record".to_string(),
            ));
        }

        let submission = RecordSubmission::parse(
            &self.boss_id,
            &self.completion_time,
            &self.team_size,
            self.team_members,
            &self.screenshot_url,
        )?;

        // The submitter is always the session user, never caller-supplied.
        let record = state.insert_record(&submitter.id, &submission).await?;

        Ok(SubmitRecordResponse { record })
    }
}

#[derive(Serialize, Debug)]
pub struct SubmitRecordResponse {
    pub record: Record,
}

impl IntoResponse for SubmitRecordResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::db::RecordStatus;
    use crate::validate::NewBoss;

    fn request_for(boss_id: &str) -> SubmitRecordRequest {
        SubmitRecordRequest {
            boss_id: boss_id.to_string(),
            completion_time: "02:45.300".to_string(),
            team_size: "solo".to_string(),
            team_members: vec![],
            screenshot_url: "https://example.com/proof.png".to_string(),
        }
    }

    async fn record_count(state: &AppState) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&state.pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn submit_creates_a_pending_record(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let user = state
            .create_user("user 1", "user@example.com", Some("Player One"))
            .await?;
        let boss = state
            .create_boss(&NewBoss::parse(
                "Zulrah",
                "https://example.com/z.png",
                vec!["solo".to_string()],
            )?)
            .await?;

        let response = request_for(&boss.id.0.to_string())
            .request(state.clone(), Some(user.clone()))
            .await?;

        assert_eq!(response.record.status, RecordStatus::Pending);
        assert_eq!(response.record.submitter_id, Some(user.id));
        assert_eq!(response.record.boss_id, Some(boss.id));
        Ok(())
    }

    #[sqlx::test]
    async fn submit_requires_a_session(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let boss = state
            .create_boss(&NewBoss::parse(
                "Zulrah",
                "https://example.com/z.png",
                vec!["solo".to_string()],
            )?)
            .await?;

        let result = request_for(&boss.id.0.to_string())
            .request(state.clone(), None)
            .await;

        assert!(matches!(result, Err(AppError::NotLoggedIn)));
        assert_eq!(record_count(&state).await, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn invalid_submission_writes_nothing(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let user = state
            .create_user("user 1", "user@example.com", None)
            .await?;

        let mut request = request_for("not-a-uuid");
        request.completion_time = "2:45.3".to_string();
        let result = request.request(state.clone(), Some(user)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(record_count(&state).await, 0);
        Ok(())
    }
}
