use chrono::{DateTime, Utc};
use derive_more::{From, Into};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder};

use super::{Boss, BossId, PublicUser, UserId};
use crate::AppState;
use crate::validate::RecordSubmission;

id_struct!(RecordId, Record);

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Record {
    pub id: RecordId,

    /// `None` once the referenced boss has been deleted.
    pub boss_id: Option<BossId>,
    /// Soft reference into `users`; no FK so provider-issued identifiers of
    /// any shape are tolerated.
    pub submitter_id: Option<UserId>,

    /// `MM:SS.mmm`. Fixed-width, so string order equals time order.
    pub completion_time: String,
    pub team_size: String,
    #[sqlx(json)]
    pub team_members: Vec<String>,
    pub screenshot_url: String,

    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record with its boss joined, for per-user listings.
#[derive(Serialize, Debug, Clone)]
pub struct RecordWithBoss {
    #[serde(flatten)]
    pub record: Record,
    pub boss: Option<Boss>,
}

/// A record with boss and submitter joined, for review queues and feeds.
#[derive(Serialize, Debug, Clone)]
pub struct FullRecord {
    #[serde(flatten)]
    pub record: Record,
    pub boss: Option<Boss>,
    pub submitter: PublicUser,
}

impl AppState {
    pub async fn insert_record(
        &self,
        submitter_id: &UserId,
        submission: &RecordSubmission,
    ) -> sqlx::Result<Record> {
        sqlx::query_as::<_, Record>(
            "INSERT INTO records
                (boss_id, submitter_id, completion_time, team_size, team_members, screenshot_url)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            ",
        )
        .bind(submission.boss_id.0)
        .bind(&submitter_id.0)
        .bind(&submission.completion_time)
        .bind(&submission.team_size)
        .bind(Json(&submission.team_members))
        .bind(&submission.screenshot_url)
        .fetch_one(&self.pool)
        .await
    }

    /// Last write wins: concurrent reviews of the same record are not
    /// mutually excluded.
    pub async fn set_record_status(
        &self,
        id: RecordId,
        status: RecordStatus,
    ) -> sqlx::Result<Option<Record>> {
        sqlx::query_as::<_, Record>(
            "UPDATE records SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_pending_records(&self) -> sqlx::Result<Vec<FullRecord>> {
        let records = sqlx::query_as::<_, Record>(
            "SELECT * FROM records WHERE status = 'pending' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(self.with_relations(records).await)
    }

    pub async fn get_user_records(&self, user_id: &UserId) -> sqlx::Result<Vec<RecordWithBoss>> {
        let records = sqlx::query_as::<_, Record>(
            "SELECT * FROM records WHERE submitter_id = $1 ORDER BY created_at DESC",
        )
        .bind(&user_id.0)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let boss = self.boss_of(&record).await;
            out.push(RecordWithBoss { record, boss });
        }
        Ok(out)
    }

    /// Approved records for a boss, newest first. Leaderboard ranking is the
    /// display layer's job; this only filters.
    pub async fn get_boss_records(
        &self,
        boss_id: BossId,
        team_size: Option<&str>,
    ) -> sqlx::Result<Vec<Record>> {
        let mut q: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM records WHERE status = 'approved' AND boss_id = ");
        q.push_bind(boss_id.0);
        if let Some(team_size) = team_size {
            q.push(" AND team_size = ").push_bind(team_size);
        }
        q.push(" ORDER BY created_at DESC");
        q.build_query_as::<Record>().fetch_all(&self.pool).await
    }

    /// The `limit` most recently approved records, with boss and submitter
    /// joined.
    pub async fn get_recent_records(&self, limit: i64) -> sqlx::Result<Vec<FullRecord>> {
        let records = sqlx::query_as::<_, Record>(
            "SELECT * FROM records WHERE status = 'approved' ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(self.with_relations(records).await)
    }

    /// Joins each record with its boss and submitter. Lookup failures
    /// degrade to `None` / placeholder values instead of failing the list.
    async fn with_relations(&self, records: Vec<Record>) -> Vec<FullRecord> {
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let boss = self.boss_of(&record).await;
            let submitter = match &record.submitter_id {
                Some(id) => match self.get_user(id).await {
                    Ok(Some(user)) => PublicUser::from_user(&user),
                    Ok(None) => PublicUser::unknown(),
                    Err(err) => {
                        tracing::warn!(%err, "Error resolving record submitter");
                        PublicUser::unknown()
                    }
                },
                None => PublicUser::unknown(),
            };
            out.push(FullRecord {
                record,
                boss,
                submitter,
            });
        }
        out
    }

    async fn boss_of(&self, record: &Record) -> Option<Boss> {
        let id = record.boss_id?;
        self.get_boss(id).await.unwrap_or(None)
    }
}
