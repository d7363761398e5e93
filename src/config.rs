use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the progress store. Required: startup fails
    /// fast when it is absent.
    pub database_url: String,
    /// Database to select within the store.
    pub database_name: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;
        let database_name =
            std::env::var("DATABASE_NAME").unwrap_or_else(|_| "fitracker".into());
        Ok(Self {
            database_url,
            database_name,
        })
    }
}
