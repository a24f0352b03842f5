use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum_typed_multipart::{TryFromField, TryFromMultipart};
use serde::Serialize;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::db::{Record, RecordId, RecordStatus, User};
use crate::notify::RecordReviewed;
use crate::validate::FieldError;
use crate::{AppError, AppState, RequestBody};

#[derive(TryFromMultipart, Debug)]
pub struct ReviewRecordRequest {
    pub record_id: String,
    pub action: ReviewAction,
}

#[derive(TryFromField, Debug, Copy, Clone, PartialEq, Eq)]
#[try_from_field(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl From<ReviewAction> for RecordStatus {
    fn from(action: ReviewAction) -> Self {
        match action {
            ReviewAction::Approve => RecordStatus::Approved,
            ReviewAction::Reject => RecordStatus::Rejected,
        }
    }
}

impl RequestBody for ReviewRecordRequest {
    type Response = ReviewRecordResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let editor = user.ok_or(AppError::NotLoggedIn)?;
        if !editor.is_admin() {
            return Err(AppError::NotAuthorized);
        }

        let record_id = Uuid::parse_str(&self.record_id)
            .map(RecordId)
            .map_err(|_| {
                AppError::Validation(vec![FieldError {
                    field: "record_id",
                    message: "must be a valid record ID".to_string(),
                }])
            })?;

        let record = state
            .set_record_status(record_id, self.action.into())
            .await?
            .ok_or(AppError::RecordDoesNotExist)?;

        // The status write has committed; notification is best-effort.
        state
            .notify_record_reviewed(RecordReviewed {
                record_id: record.id,
                submitter_id: record.submitter_id.clone(),
                outcome: record.status,
            })
            .await;

        Ok(ReviewRecordResponse { record })
    }
}

#[derive(Serialize, Debug)]
pub struct ReviewRecordResponse {
    pub record: Record,
}

impl IntoResponse for ReviewRecordResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::db::Role;
    use crate::validate::{NewBoss, RecordSubmission};

    async fn state_with_pending_record(pool: PgPool) -> Result<(AppState, User, Record), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let submitter = state
            .create_user("user 1", "user@example.com", Some("Player One"))
            .await?;
        let admin = state
            .create_user("admin", "admin@example.com", None)
            .await?;
        let admin = state
            .set_role_by_email(&admin.email, Role::Admin)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;

        let boss = state
            .create_boss(&NewBoss::parse(
                "Zulrah",
                "https://example.com/z.png",
                vec!["solo".to_string()],
            )?)
            .await?;
        let record = state
            .insert_record(
                &submitter.id,
                &RecordSubmission::parse(
                    &boss.id.0.to_string(),
                    "02:45.300",
                    "solo",
                    vec![],
                    "https://example.com/proof.png",
                )?,
            )
            .await?;

        Ok((state, admin, record))
    }

    fn review(record: &Record, action: ReviewAction) -> ReviewRecordRequest {
        ReviewRecordRequest {
            record_id: record.id.0.to_string(),
            action,
        }
    }

    #[sqlx::test]
    async fn admin_can_approve(pool: PgPool) -> Result<(), AppError> {
        let (state, admin, record) = state_with_pending_record(pool).await?;

        let response = review(&record, ReviewAction::Approve)
            .request(state.clone(), Some(admin))
            .await?;

        assert_eq!(response.record.status, RecordStatus::Approved);
        assert!(response.record.updated_at >= record.updated_at);
        Ok(())
    }

    #[sqlx::test]
    async fn non_admin_cannot_review(pool: PgPool) -> Result<(), AppError> {
        let (state, _admin, record) = state_with_pending_record(pool).await?;
        let outsider = state
            .create_user("user 2", "other@example.com", None)
            .await?;

        let result = review(&record, ReviewAction::Approve)
            .request(state.clone(), Some(outsider))
            .await;
        assert!(matches!(result, Err(AppError::NotAuthorized)));

        let status = sqlx::query_scalar::<_, RecordStatus>(
            "SELECT status FROM records WHERE id = $1",
        )
        .bind(record.id.0)
        .fetch_one(&state.pool)
        .await?;
        assert_eq!(status, RecordStatus::Pending);
        Ok(())
    }

    #[sqlx::test]
    async fn last_review_wins(pool: PgPool) -> Result<(), AppError> {
        let (state, admin, record) = state_with_pending_record(pool).await?;

        review(&record, ReviewAction::Approve)
            .request(state.clone(), Some(admin.clone()))
            .await?;
        let response = review(&record, ReviewAction::Reject)
            .request(state.clone(), Some(admin))
            .await?;

        assert_eq!(response.record.status, RecordStatus::Rejected);
        Ok(())
    }

    #[sqlx::test]
    async fn unknown_record_is_not_found(pool: PgPool) -> Result<(), AppError> {
        let (state, admin, _record) = state_with_pending_record(pool).await?;

        let result = ReviewRecordRequest {
            record_id: Uuid::new_v4().to_string(),
            action: ReviewAction::Approve,
        }
        .request(state, Some(admin))
        .await;

        assert!(matches!(result, Err(AppError::RecordDoesNotExist)));
        Ok(())
    }
}
