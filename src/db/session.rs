use chrono::{DateTime, TimeDelta, Utc};
use rand::distr::{Alphanumeric, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::AppState;
use crate::db::user::{User, UserId};

/// How long a session is valid for.
const SESSION_DURATION: TimeDelta = TimeDelta::days(30);
/// Number of characters in a session token.
const TOKEN_LENGTH: usize = 48;

/// A session issued by the auth provider. This service only ever reads
/// sessions; issuing them on sign-in is the provider's job.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns whether the session is still valid based on the current time.
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

impl AppState {
    /// Creates a session for a user, the way the auth provider would.
    pub async fn create_session(&self, user_id: &UserId) -> sqlx::Result<Session> {
        let mut rng = StdRng::from_os_rng();
        let token =
            String::from_iter((0..TOKEN_LENGTH).map(|_| Alphanumeric.sample(&mut rng) as char));
        let expires_at = Utc::now() + SESSION_DURATION;

        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(token)
        .bind(&user_id.0)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Returns the user that the session belongs to, or `None` if it is
    /// unknown or expired.
    pub async fn session_bearer(&self, token: &str) -> sqlx::Result<Option<User>> {
        let session =
            sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        if session.is_valid() {
            self.get_user(&session.user_id).await
        } else {
            Ok(None)
        }
    }

    pub async fn remove_session(&self, token: &str) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
