#[macro_use]
mod macros;

mod api;
mod cli;
mod cookies;
mod db;
mod env;
mod error;
mod notify;
mod routes;
mod traits;
mod util;
mod validate;

use clap::Parser;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub use crate::error::{AppError, AppResult};
pub use crate::traits::RequestBody;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Review notifications go here; `None` disables them.
    pub webhook: Option<notify::DiscordWebhook>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env::RUST_LOG.clone()))
        .init();

    let args = cli::Args::parse();

    // set up connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(3))
        .connect(&env::DATABASE_URL)
        .await?;

    let state = AppState {
        pool,
        webhook: notify::DiscordWebhook::from_env(),
    };

    match args.command.unwrap_or_default() {
        cli::Command::Run => {
            state.migrate().await?;

            let app = routes::router().with_state(state);
            let listener = tokio::net::TcpListener::bind(env::BIND_ADDR.as_str()).await?;
            tracing::info!(addr = %*env::BIND_ADDR, "Serving leaderboards");
            axum::serve(listener, app).await?;
        }
        cli::Command::Reset => state.reset().await?,
        cli::Command::Migrate => state.migrate().await?,
        cli::Command::Session { email } => {
            let user = state
                .get_user_by_email(&email)
                .await?
                .ok_or_else(|| eyre::eyre!("no user with email {email:?}"))?;
            let session = state.create_session(&user.id).await?;
            println!("{}", session.token);
        }
    }

    Ok(())
}
