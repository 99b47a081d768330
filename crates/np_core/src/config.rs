use crate::{Error, Result};

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub database: String,
    pub news_api_key: String,
    pub google_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            mongodb_uri: require("MONGODB_URI")?,
            database: std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "newspulse".to_string()),
            news_api_key: require("NEWS_API_KEY")?,
            google_api_key: require("GOOGLE_API_KEY")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("missing required environment variable {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_a_config_error() {
        let err = require("NP_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
