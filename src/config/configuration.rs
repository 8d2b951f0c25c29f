use config::{Config, ConfigError};
use dotenv::dotenv;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub port: u16,
}

impl DatabaseSettings {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.dbname
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
}

impl Settings {
    // File values first, then environment overrides such as DATABASE__HOST
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();
        let mut s = Config::default();
        s.merge(config::File::with_name("config").required(false))?;
        s.merge(config::Environment::new().separator("__"))?;
        s.try_into()
    }
}
