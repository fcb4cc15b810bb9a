use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Directory holding `task{id}_{split}.csv` data files.
    pub data_dir: String,
    /// Directory where uploaded artifacts are stored.
    pub submissions_dir: String,
    pub python_interpreter: String,
    /// Wall-clock budget per evaluation, in seconds.
    pub evaluation_timeout_seconds: u64,
    pub memory_limit_mb: u64,
    /// Per-team-per-task submission quota.
    pub submission_limit: i64,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Config::default();
        let config = ConfigLoader::builder()
            .set_default("port", defaults.port as i64)?
            .set_default("database_url", defaults.database_url)?
            .set_default("data_dir", defaults.data_dir)?
            .set_default("submissions_dir", defaults.submissions_dir)?
            .set_default("python_interpreter", defaults.python_interpreter)?
            .set_default(
                "evaluation_timeout_seconds",
                defaults.evaluation_timeout_seconds as i64,
            )?
            .set_default("memory_limit_mb", defaults.memory_limit_mb as i64)?
            .set_default("submission_limit", defaults.submission_limit)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("GRANDPRIX"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            database_url: "sqlite://grandprix.db?mode=rwc".to_string(),
            data_dir: "data".to_string(),
            submissions_dir: "submissions".to_string(),
            python_interpreter: "python3".to_string(),
            evaluation_timeout_seconds: 120,
            memory_limit_mb: 512,
            submission_limit: 3,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_field_including_the_filter_seed() {
        let config = Config::load().unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.submission_limit, 3);
        // log_level seeds the tracing filter when RUST_LOG is unset.
        assert_eq!(config.log_level, "info");
    }
}
