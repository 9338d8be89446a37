use std::env;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "BACKOFFICE_API_URL";

/// Base URL used when no configuration is provided.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Creates a config for the given base URL. Trailing slashes are trimmed
    /// so endpoint paths can always be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Reads `BACKOFFICE_API_URL`, falling back to the default base URL.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8080");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ApiConfig::new("http://api.example.test/");
        assert_eq!(config.base_url, "http://api.example.test");

        let config = ApiConfig::new("http://api.example.test///");
        assert_eq!(config.base_url, "http://api.example.test");
    }
}
