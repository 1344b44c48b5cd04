use chrono_tz::Tz;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub timezone: String,
    pub seed_days: u32,
    pub studio_name: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_SEED_DAYS -> seed_days; nested keys would use a double underscore
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8000)?
            .set_default("timezone", "Asia/Kolkata")?
            .set_default("seed_days", 7)?
            .set_default("studio_name", "Fitness Studio")?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.studio_tz()?;
        Ok(settings)
    }

    pub fn studio_tz(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|err| {
            ConfigError::Message(format!("invalid timezone {:?}: {err}", self.timezone))
        })
    }
}
