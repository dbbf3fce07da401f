use crate::logging::LogLevel;
use url::Url;

pub const DEFAULT_CONTACT_RELAY_URL: &str = "https://formspree.io/f/mnqkqgqv";
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
pub const PARTICLE_COUNT_BOUNDS: (usize, usize) = (10, 200);
pub const DEFAULT_CONTACT_DELIVERY: ContactDelivery = ContactDelivery::Native;

#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_PORT: u16 = 8080;
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_DIST_DIR: &str = "dist";

/// How the contact form reaches the relay.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContactDelivery {
    /// Plain form post; the browser and the relay's page handle every outcome.
    Native,
    /// Opt-in background post with an in-page status line.
    Fetch,
}

impl ContactDelivery {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Fetch => "fetch",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" => Some(Self::Native),
            "fetch" => Some(Self::Fetch),
            _ => None,
        }
    }
}

/// Settings baked into the browser bundle at build time.
#[derive(Clone, PartialEq, Debug)]
pub struct SiteConfig {
    pub contact_relay_url: String,
    pub contact_delivery: ContactDelivery,
    pub log_level: LogLevel,
    pub particle_count: Option<usize>,
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SOUKI_CONTACT_RELAY_URL"),
            option_env!("SOUKI_CONTACT_DELIVERY"),
            option_env!("SOUKI_LOG_LEVEL"),
            option_env!("SOUKI_PARTICLE_COUNT"),
        )
    }

    fn from_values(
        relay_url: Option<&str>,
        delivery: Option<&str>,
        log_level: Option<&str>,
        particle_count: Option<&str>,
    ) -> Self {
        let contact_relay_url = parse_http_url(relay_url)
            .map(|url| url.to_string())
            .unwrap_or_else(|| DEFAULT_CONTACT_RELAY_URL.to_string());

        Self {
            contact_relay_url,
            contact_delivery: delivery
                .and_then(ContactDelivery::from_str)
                .unwrap_or(DEFAULT_CONTACT_DELIVERY),
            log_level: parse_log_level(log_level, DEFAULT_LOG_LEVEL),
            particle_count: parse_usize_with_bounds(particle_count, PARTICLE_COUNT_BOUNDS),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, PartialEq, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub dist_dir: std::path::PathBuf,
    pub log_level: LogLevel,
}

#[cfg(not(target_arch = "wasm32"))]
impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT").ok();
        let dist_dir = std::env::var("DIST_DIR").ok();
        let log_level = std::env::var("LOG_LEVEL").ok();

        Self {
            port: port
                .as_deref()
                .and_then(|value| value.trim().parse::<u16>().ok())
                .filter(|value| *value != 0)
                .unwrap_or(DEFAULT_PORT),
            dist_dir: parse_non_empty_string(dist_dir.as_deref())
                .unwrap_or_else(|| DEFAULT_DIST_DIR.to_string())
                .into(),
            log_level: parse_log_level(log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

pub fn parse_usize_with_bounds(value: Option<&str>, bounds: (usize, usize)) -> Option<usize> {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
}

pub fn parse_non_empty_string(value: Option<&str>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_http_url(value: Option<&str>) -> Option<Url> {
    let value = parse_non_empty_string(value)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

pub fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    value.and_then(LogLevel::from_str).unwrap_or(default)
}
