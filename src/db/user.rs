use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::{From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;

/// Database ID for a [`User`].
///
/// Opaque text, owned by the auth provider. Kept as text rather than UUID so
/// provider-issued identifiers of any shape fit.
#[derive(
    sqlx::Type, Serialize, Deserialize, From, Into, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[sqlx(transparent)]
pub struct UserId(pub String);

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(()),
        }
    }
}

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl FromStr for VerificationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(()),
        }
    }
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// In-game display name. Unique when present.
    pub rsn: Option<String>,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Minimal projection of a user attached to record listings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Option<UserId>,
    pub username: String,
    pub rsn: String,
}

impl PublicUser {
    /// Placeholder used when the submitter lookup fails or the record has no
    /// submitter.
    pub fn unknown() -> Self {
        Self {
            id: None,
            username: "unknown".to_string(),
            rsn: "unknown".to_string(),
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            username: user.name.clone(),
            rsn: user
                .rsn
                .clone()
                .filter(|rsn| !rsn.is_empty())
                .unwrap_or_else(|| {
                    if user.name.is_empty() {
                        "unknown player".to_string()
                    } else {
                        user.name.clone()
                    }
                }),
        }
    }
}

/// A user's id and RSN, for member pickers.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct UserRsn {
    pub id: UserId,
    pub rsn: String,
}

impl AppState {
    pub async fn get_user(&self, id: &UserId) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_user_by_email(&self, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Provisions a user row the way the auth provider would on first
    /// sign-in.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        rsn: Option<&str>,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, rsn) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(email)
        .bind(rsn)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn set_verification_status(
        &self,
        id: &UserId,
        status: VerificationStatus,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET verification_status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn set_role_by_email(&self, email: &str, role: Role) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("UPDATE users SET role = $1 WHERE email = $2 RETURNING *")
            .bind(role)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_all_users(&self) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    /// Users that have a non-empty RSN set.
    pub async fn get_users_with_rsn(&self) -> sqlx::Result<Vec<UserRsn>> {
        sqlx::query_as::<_, UserRsn>(
            "SELECT id, rsn FROM users WHERE rsn IS NOT NULL AND rsn <> ''",
        )
        .fetch_all(&self.pool)
        .await
    }
}
