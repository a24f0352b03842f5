use axum::body::Body;
use axum::response::{IntoResponse, Response};
use axum_typed_multipart::TryFromMultipart;
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::db::{Boss, BossId, User};
use crate::validate::NewBoss;
use crate::{AppError, AppState, RequestBody};

#[derive(TryFromMultipart, Debug)]
pub struct CreateBossRequest {
    pub name: String,
    pub image_url: String,
    pub allowed_team_sizes: Vec<String>,
}

impl RequestBody for CreateBossRequest {
    type Response = CreateBossResponse;

    async fn request(
        self,
        state: AppState,
        user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let editor = user.ok_or(AppError::NotLoggedIn)?;
        if !editor.is_admin() {
            return Err(AppError::NotAuthorized);
        }

        let new = NewBoss::parse(&self.name, &self.image_url, self.allowed_team_sizes)?;
        let boss = state.create_boss(&new).await?;

        Ok(CreateBossResponse { boss })
    }
}

#[derive(Serialize, Debug)]
pub struct CreateBossResponse {
    pub boss: Boss,
}

impl IntoResponse for CreateBossResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

/// The boss directory, optionally filtered by name substring
/// (case-insensitive) and team-size label.
#[derive(Deserialize, Debug)]
pub struct BossesRequest {
    pub query: Option<String>,
    pub team_size: Option<String>,
}

impl RequestBody for BossesRequest {
    type Response = BossesResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let bosses = state
            .search_bosses(self.query.as_deref(), self.team_size.as_deref())
            .await?;
        Ok(BossesResponse { bosses })
    }
}

#[derive(Serialize, Debug)]
pub struct BossesResponse {
    pub bosses: Vec<Boss>,
}

impl IntoResponse for BossesResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[derive(Deserialize, Debug)]
pub struct BossRequest {
    pub id: BossId,
}

impl RequestBody for BossRequest {
    type Response = BossResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let boss = state
            .get_boss(self.id)
            .await?
            .ok_or(AppError::BossDoesNotExist)?;
        Ok(BossResponse { boss })
    }
}

#[derive(Serialize, Debug)]
pub struct BossResponse {
    pub boss: Boss,
}

impl IntoResponse for BossResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

/// Every team size any boss allows, for filter dropdowns.
#[derive(Deserialize, Debug)]
pub struct TeamSizesRequest {}

impl RequestBody for TeamSizesRequest {
    type Response = TeamSizesResponse;

    async fn request(
        self,
        state: AppState,
        _user: Option<User>,
    ) -> Result<Self::Response, AppError> {
        let team_sizes = state.get_all_team_sizes().await?;
        Ok(TeamSizesResponse { team_sizes })
    }
}

#[derive(Serialize, Debug)]
pub struct TeamSizesResponse {
    pub team_sizes: Vec<String>,
}

impl IntoResponse for TeamSizesResponse {
    fn into_response(self) -> Response<Body> {
        ApiResponse(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::db::Role;

    async fn admin(state: &AppState) -> Result<User, AppError> {
        let user = state.create_user("admin", "a@example.com", None).await?;
        state
            .set_role_by_email(&user.email, Role::Admin)
            .await?
            .ok_or(AppError::UserDoesNotExist)
    }

    async fn add_boss(
        state: &AppState,
        admin: &User,
        name: &str,
        team_sizes: &[&str],
    ) -> Result<Boss, AppError> {
        let response = CreateBossRequest {
            name: name.to_string(),
            image_url: format!("https://example.com/{name}.png"),
            allowed_team_sizes: team_sizes.iter().map(|s| s.to_string()).collect(),
        }
        .request(state.clone(), Some(admin.clone()))
        .await?;
        Ok(response.boss)
    }

    #[sqlx::test]
    async fn create_is_admin_only(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let user = state
            .create_user("user 1", "user@example.com", None)
            .await?;

        let result = CreateBossRequest {
            name: "Zulrah".to_string(),
            image_url: "https://example.com/z.png".to_string(),
            allowed_team_sizes: vec!["solo".to_string()],
        }
        .request(state.clone(), Some(user))
        .await;

        assert!(matches!(result, Err(AppError::NotAuthorized)));
        assert!(state.get_all_bosses().await?.is_empty());
        Ok(())
    }

    #[sqlx::test]
    async fn create_rejects_empty_team_sizes(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let admin = admin(&state).await?;

        let result = CreateBossRequest {
            name: "Zulrah".to_string(),
            image_url: "https://example.com/z.png".to_string(),
            allowed_team_sizes: vec![],
        }
        .request(state.clone(), Some(admin))
        .await;

        match result {
            Err(err @ AppError::Validation(_)) => {
                assert!(err.message().contains("team size"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(state.get_all_bosses().await?.is_empty());
        Ok(())
    }

    #[sqlx::test]
    async fn search_filters_by_name_and_team_size(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let admin = admin(&state).await?;
        add_boss(&state, &admin, "Zulrah", &["solo"]).await?;
        add_boss(&state, &admin, "Vorkath", &["solo", "duo"]).await?;
        add_boss(&state, &admin, "Chambers of Xeric", &["trio", "5-man"]).await?;

        let all = BossesRequest {
            query: None,
            team_size: None,
        }
        .request(state.clone(), None)
        .await?;
        // Name ascending.
        let names: Vec<_> = all.bosses.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Chambers of Xeric", "Vorkath", "Zulrah"]);

        let by_name = BossesRequest {
            query: Some("VORK".to_string()),
            team_size: None,
        }
        .request(state.clone(), None)
        .await?;
        assert_eq!(by_name.bosses.len(), 1);
        assert_eq!(by_name.bosses[0].name, "Vorkath");

        let by_size = BossesRequest {
            query: None,
            team_size: Some("duo".to_string()),
        }
        .request(state.clone(), None)
        .await?;
        assert_eq!(by_size.bosses.len(), 1);
        assert_eq!(by_size.bosses[0].name, "Vorkath");
        Ok(())
    }

    #[sqlx::test]
    async fn team_sizes_are_ordered_across_bosses(pool: PgPool) -> Result<(), AppError> {
        let state = AppState {
            pool,
            webhook: None,
        };
        let admin = admin(&state).await?;
        // Insertion order deliberately scrambled.
        add_boss(&state, &admin, "Chambers of Xeric", &["5-man", "trio"]).await?;
        add_boss(&state, &admin, "Zulrah", &["solo"]).await?;
        add_boss(&state, &admin, "Vorkath", &["duo", "solo"]).await?;

        let response = TeamSizesRequest {}.request(state, None).await?;
        assert_eq!(response.team_sizes, ["solo", "duo", "trio", "5-man"]);
        Ok(())
    }
}
