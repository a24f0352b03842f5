//! Aggregate read-only views. Each query is computed from scratch on every
//! call; there is no cache or materialized view to maintain.

use chrono::{DateTime, Datelike, Days, Utc};
use serde::Serialize;

use super::{BossId, UserId};
use crate::AppState;

/// A user by count of approved records.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct RecordHolder {
    pub id: UserId,
    /// RSN, falling back to `Unknown` when unset or empty.
    pub name: String,
    pub record_count: i64,
}

/// A user by count of submissions of any status.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct ActiveMember {
    pub id: UserId,
    pub name: String,
    pub submission_count: i64,
}

/// A boss by count of approved records.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct BossCompletions {
    pub id: BossId,
    pub name: String,
    pub record_count: i64,
}

#[derive(Serialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SubmissionStats {
    pub total: i64,
    pub this_month: i64,
    pub this_week: i64,
    pub pending: i64,
}

#[derive(Serialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total_submissions: i64,
    pub verified_records: i64,
    pub pending_records: i64,
    /// Approved records that rank first by completion time within their
    /// `(boss, team size)` category. Ties at the top all count.
    pub top_positions: i64,
}

/// Start of the current calendar month, UTC.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .expect("the 1st exists in every month")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

/// Most recent Sunday 00:00:00, UTC. The calendar week starts on Sunday.
fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    (now.date_naive() - Days::new(u64::from(now.weekday().num_days_from_sunday())))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

impl AppState {
    /// Users with the most approved records. Ties are broken by user id
    /// ascending so the order is stable.
    pub async fn get_top_record_holders(&self, limit: i64) -> sqlx::Result<Vec<RecordHolder>> {
        sqlx::query_as::<_, RecordHolder>(
            "SELECT u.id, COALESCE(NULLIF(u.rsn, ''), 'Unknown') AS name, COUNT(r.id) AS record_count
                FROM records r
                INNER JOIN users u ON r.submitter_id = u.id
                WHERE r.status = 'approved'
                GROUP BY u.id, u.rsn
                ORDER BY record_count DESC, u.id ASC
                LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Users with the most submissions of any status.
    pub async fn get_most_active_members(&self, limit: i64) -> sqlx::Result<Vec<ActiveMember>> {
        sqlx::query_as::<_, ActiveMember>(
            "SELECT u.id, COALESCE(NULLIF(u.rsn, ''), 'Unknown') AS name, COUNT(r.id) AS submission_count
                FROM records r
                INNER JOIN users u ON r.submitter_id = u.id
                GROUP BY u.id, u.rsn
                ORDER BY submission_count DESC, u.id ASC
                LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Bosses with the most approved records.
    pub async fn get_top_boss_completions(&self, limit: i64) -> sqlx::Result<Vec<BossCompletions>> {
        sqlx::query_as::<_, BossCompletions>(
            "SELECT b.id, b.name, COUNT(r.id) AS record_count
                FROM records r
                INNER JOIN bosses b ON r.boss_id = b.id
                WHERE r.status = 'approved'
                GROUP BY b.id, b.name
                ORDER BY record_count DESC
                LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_submission_stats(&self) -> sqlx::Result<SubmissionStats> {
        let now = Utc::now();

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await?;
        let this_month =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records WHERE created_at >= $1")
                .bind(month_start(now))
                .fetch_one(&self.pool)
                .await?;
        let this_week =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records WHERE created_at >= $1")
                .bind(week_start(now))
                .fetch_one(&self.pool)
                .await?;
        let pending =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        Ok(SubmissionStats {
            total,
            this_month,
            this_week,
            pending,
        })
    }

    pub async fn get_user_stats(&self, user_id: &UserId) -> sqlx::Result<UserStats> {
        let total_submissions =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records WHERE submitter_id = $1")
                .bind(&user_id.0)
                .fetch_one(&self.pool)
                .await?;
        let verified_records = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM records WHERE submitter_id = $1 AND status = 'approved'",
        )
        .bind(&user_id.0)
        .fetch_one(&self.pool)
        .await?;
        let pending_records = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM records WHERE submitter_id = $1 AND status = 'pending'",
        )
        .bind(&user_id.0)
        .fetch_one(&self.pool)
        .await?;

        // RANK() assigns equal rank to equal times, so everyone tied for the
        // fastest time in a category counts as a top position.
        let top_positions = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM (
                    SELECT submitter_id,
                           RANK() OVER (
                               PARTITION BY boss_id, team_size
                               ORDER BY completion_time ASC
                           ) AS position
                    FROM records
                    WHERE status = 'approved'
                ) ranked
                WHERE submitter_id = $1 AND position = 1
            ",
        )
        .bind(&user_id.0)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStats {
            total_submissions,
            verified_records,
            pending_records,
            top_positions,
        })
    }
}
