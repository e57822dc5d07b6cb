//! # App configuration: `courier.toml`
//!
//! Defines the TOML configuration file shipped with the app (filename:
//! [`CourierConfig::filename`] = `"courier.toml"`). It tells the client where
//! the API lives and which build/platform it is, which the version gate needs.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! timeout_secs = 30
//!
//! [app]
//! platform = "android"        # or "ios"
//! build_number = 12
//! android_store_url = "https://play.google.com/store/apps/details?id=com.courier.app"
//! ios_store_url = "https://apps.apple.com/app/id0000000000"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`CourierConfig`] | Top-level config. TOML (de)serialisation, env overrides, the canonical filename. |
//! | [`ApiConfig`] | API section: base URL and request timeout (default **30 seconds**). |
//! | [`AppConfig`] | App section: platform, local build number, store listing URLs. |
//!
//! All structs derive or implement `Default`, so a missing or empty config file
//! is equivalent to the default configuration.
//!
//! ## Environment overrides
//!
//! [`CourierConfig::with_env_overrides`] applies `COURIER_API_BASE_URL`,
//! `COURIER_PLATFORM` and `COURIER_BUILD_NUMBER` on top of the file values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mobile platform the app is running on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    /// The platform this binary was compiled for. Everything that is not iOS
    /// reports as Android.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Android
        }
    }

    /// Id used in `/api/checkUpdate/{platform-id}`.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Top-level configuration stored in `courier.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourierConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// Remote API configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Build and distribution details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "Platform::current")]
    pub platform: Platform,
    #[serde(default)]
    pub build_number: u64,
    #[serde(default = "default_android_store_url")]
    pub android_store_url: String,
    #[serde(default = "default_ios_store_url")]
    pub ios_store_url: String,
}

fn default_android_store_url() -> String {
    "https://play.google.com/store/apps/details?id=com.courier.app".to_string()
}

fn default_ios_store_url() -> String {
    "https://apps.apple.com/app/id0000000000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            build_number: 0,
            android_store_url: default_android_store_url(),
            ios_store_url: default_ios_store_url(),
        }
    }
}

impl AppConfig {
    /// Store listing for the configured platform.
    pub fn store_url(&self) -> &str {
        match self.platform {
            Platform::Android => &self.android_store_url,
            Platform::Ios => &self.ios_store_url,
        }
    }
}

impl CourierConfig {
    /// Create a config pointing at `base_url` for the given build.
    pub fn new(base_url: String, platform: Platform, build_number: u64) -> Self {
        Self {
            api: ApiConfig {
                base_url,
                ..ApiConfig::default()
            },
            app: AppConfig {
                platform,
                build_number,
                ..AppConfig::default()
            },
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "courier.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply `COURIER_*` environment variables. Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("COURIER_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(platform) = std::env::var("COURIER_PLATFORM")
            .ok()
            .and_then(|p| Platform::parse(&p))
        {
            self.app.platform = platform;
        }
        if let Some(build) = std::env::var("COURIER_BUILD_NUMBER")
            .ok()
            .and_then(|b| b.trim().parse().ok())
        {
            self.app.build_number = build;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = CourierConfig::from_toml("").unwrap();
        assert_eq!(config, CourierConfig::default());
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file() {
        let config = CourierConfig::from_toml(
            r#"
            [api]
            base_url = "https://courier.test"

            [app]
            platform = "ios"
            build_number = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://courier.test");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.app.platform, Platform::Ios);
        assert_eq!(config.app.build_number, 14);
        assert_eq!(config.app.store_url(), default_ios_store_url());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CourierConfig::new("https://courier.test".into(), Platform::Android, 7);
        let text = config.to_toml().unwrap();
        assert_eq!(CourierConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("Android"), Some(Platform::Android));
        assert_eq!(Platform::parse(" ios "), Some(Platform::Ios));
        assert_eq!(Platform::parse("web"), None);
        assert_eq!(Platform::Ios.id(), "ios");
    }
}
