//! Runtime configuration read from the environment.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use recitation_core::Threshold;

use crate::error::ApiError;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Base URLs of the third-party content APIs.
#[derive(Debug, Clone)]
pub struct UpstreamUrls {
    /// alquran.cloud REST API (surahs, editions, juz, ayahs).
    pub quran: String,
    /// Static hadith editions CDN.
    pub hadith: String,
    /// Adhkar dataset (a single JSON document).
    pub adhkar: String,
    /// Aladhan prayer timings API.
    pub prayer: String,
    /// Reverse geocoding API used to label the prayer-times location.
    pub geocode: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            quran: "https://api.alquran.cloud/v1".to_string(),
            hadith: "https://cdn.jsdelivr.net/gh/fawazahmed0/hadith-api@1".to_string(),
            adhkar: "https://raw.githubusercontent.com/nawafalqari/azkar-api/56df51279ab6eb86dc2f6202c7de26c8948331c1/azkar.json".to_string(),
            prayer: "https://api.aladhan.com/v1".to_string(),
            geocode: "https://api.bigdatacloud.net/data/reverse-geocode-client".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Directory recordings are written to.
    pub recitations_dir: PathBuf,
    /// Prefix for recording URLs handed back to clients.
    pub public_base_url: String,
    pub pronunciation_threshold: Threshold,
    pub max_upload_bytes: usize,
    pub upstream: UpstreamUrls,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars (defaults in parentheses):
    /// - HOST (0.0.0.0), PORT (5000)
    /// - DATABASE_URL (sqlite://quran-companion.db?mode=rwc)
    /// - RECITATIONS_DIR (recitations)
    /// - PUBLIC_BASE_URL (http://localhost:{PORT})
    /// - PRONUNCIATION_THRESHOLD (0.95)
    /// - MAX_UPLOAD_BYTES (25 MiB)
    /// - QURAN_API_URL, HADITH_API_URL, ADHKAR_URL, PRAYER_API_URL, GEOCODE_API_URL
    pub fn from_env() -> Result<Self, ApiError> {
        let port: u16 = parse_var("PORT", 5000)?;
        let threshold: f64 = parse_var("PRONUNCIATION_THRESHOLD", Threshold::default().value())?;
        let pronunciation_threshold = Threshold::new(threshold)
            .map_err(|e| ApiError::Config(format!("PRONUNCIATION_THRESHOLD: {}", e)))?;

        let defaults = UpstreamUrls::default();

        Ok(Self {
            host: string_var("HOST", "0.0.0.0"),
            port,
            database_url: string_var("DATABASE_URL", "sqlite://quran-companion.db?mode=rwc"),
            recitations_dir: PathBuf::from(string_var("RECITATIONS_DIR", "recitations")),
            public_base_url: string_var("PUBLIC_BASE_URL", &format!("http://localhost:{}", port))
                .trim_end_matches('/')
                .to_string(),
            pronunciation_threshold,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            upstream: UpstreamUrls {
                quran: string_var("QURAN_API_URL", &defaults.quran),
                hadith: string_var("HADITH_API_URL", &defaults.hadith),
                adhkar: string_var("ADHKAR_URL", &defaults.adhkar),
                prayer: string_var("PRAYER_API_URL", &defaults.prayer),
                geocode: string_var("GEOCODE_API_URL", &defaults.geocode),
            },
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn string_var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::debug!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_var<T>(key: &str, default: T) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ApiError::Config(format!("invalid {key} value {raw:?}: {e}"))),
        Err(_) => Ok(default),
    }
}
