use anyhow::Context;
use dotenv::dotenv;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_port: String,
    pub database_url: String,
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if one exists.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv().ok();

        let server_port = load_env("SERVER_PORT")?;
        let database_url = load_env("DATABASE_URL")?;

        Ok(Config {
            server_port,
            database_url,
        })
    }
}

fn load_env(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("failed to load environment variable {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_is_named() {
        let error = load_env("SERVICEMANUAL_SURELY_UNSET_VARIABLE").unwrap_err();

        assert_eq!(
            error.to_string(),
            "failed to load environment variable SERVICEMANUAL_SURELY_UNSET_VARIABLE"
        );
    }
}
