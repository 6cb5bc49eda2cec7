//! Build-Time Configuration
//!
//! Values are baked in at compile time from `CRM_API_URL`, `CRM_API_KEY`
//! and `CRM_LOG_LEVEL`. Without an API URL the app runs in demo mode on
//! seeded in-memory data.

/// Runtime settings for the dashboard
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Base URL of the hosted REST backend, without trailing slash
    pub api_url: Option<String>,
    /// Public API key sent as `apikey`
    pub api_key: String,
    pub log_level: log::Level,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("CRM_API_URL"), option_env!("CRM_API_KEY"), option_env!("CRM_LOG_LEVEL"))
    }

    fn from_values(api_url: Option<&str>, api_key: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        Self {
            api_url,
            api_key: api_key.unwrap_or_default().trim().to_string(),
            log_level: log_level.and_then(|lvl| lvl.parse().ok()).unwrap_or(log::Level::Info),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.api_url.is_none()
    }
}
