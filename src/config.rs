use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Shared secret checked on every mutating request.
    pub api_key: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let api_key = std::env::var("API_KEY")?;
        Ok(Self {
            database_url,
            api_key,
        })
    }
}
