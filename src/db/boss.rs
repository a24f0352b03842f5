use chrono::{DateTime, Utc};
use derive_more::{From, Into};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use crate::AppState;
use crate::util;
use crate::validate::NewBoss;

id_struct!(BossId, Boss);

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Boss {
    pub id: BossId,
    pub name: String,
    pub image_url: String,
    #[sqlx(json)]
    pub allowed_team_sizes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Boss {
    pub fn allows_team_size(&self, label: &str) -> bool {
        self.allowed_team_sizes.iter().any(|size| size == label)
    }

    fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl AppState {
    pub async fn create_boss(&self, new: &NewBoss) -> sqlx::Result<Boss> {
        sqlx::query_as::<_, Boss>(
            "INSERT INTO bosses (name, image_url, allowed_team_sizes)
                VALUES ($1, $2, $3)
                RETURNING *
            ",
        )
        .bind(&new.name)
        .bind(&new.image_url)
        .bind(Json(&new.allowed_team_sizes))
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_boss(&self, id: BossId) -> sqlx::Result<Option<Boss>> {
        sqlx::query_as::<_, Boss>("SELECT * FROM bosses WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_all_bosses(&self) -> sqlx::Result<Vec<Boss>> {
        sqlx::query_as::<_, Boss>("SELECT * FROM bosses ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
    }

    /// All bosses, optionally narrowed by a case-insensitive name substring
    /// and a required team-size label. The boss table is small, so filtering
    /// happens over the full result set.
    pub async fn search_bosses(
        &self,
        query: Option<&str>,
        team_size: Option<&str>,
    ) -> sqlx::Result<Vec<Boss>> {
        let bosses = self.get_all_bosses().await?;
        Ok(bosses
            .into_iter()
            .filter(|boss| query.is_none_or(|q| boss.name_matches(q)))
            .filter(|boss| team_size.is_none_or(|size| boss.allows_team_size(size)))
            .collect())
    }

    /// The union of every boss's allowed team sizes, deduplicated and sorted
    /// with `solo`, `duo`, `trio` first.
    pub async fn get_all_team_sizes(&self) -> sqlx::Result<Vec<String>> {
        let bosses = self.get_all_bosses().await?;
        Ok(util::sort_team_sizes(
            bosses
                .into_iter()
                .flat_map(|boss| boss.allowed_team_sizes)
                .collect_vec(),
        ))
    }
}
