use lazy_static::lazy_static;

lazy_static! {
    /// Logging configuration.
    pub static ref RUST_LOG: String =
        dotenvy::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    /// Postgres connection string.
    pub static ref DATABASE_URL: String =
        dotenvy::var("DATABASE_URL").expect("missing DATABASE_URL environment variable");

    /// Socket address to serve on. Example: `0.0.0.0:3000`
    pub static ref BIND_ADDR: String =
        dotenvy::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    /// Discord webhook for record review notifications. Notifications are
    /// disabled when unset.
    pub static ref DISCORD_WEBHOOK_URL: Option<String> =
        dotenvy::var("DISCORD_WEBHOOK_URL").ok();
}
