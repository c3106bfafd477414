//! Configuration module
//!
//! Environment-driven configuration for the platform core: canonical site
//! URL, the admin signup code, local store/blob paths, and share-image
//! rendering settings. `.env` files are honored in development.

use std::env;
use std::path::PathBuf;

const DEFAULT_SITE_URL: &str = "https://catalyseed.com";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BLOB_BASE_URL: &str = "http://localhost:3000/blobs";
const DEFAULT_ASSET_FETCH_TIMEOUT_SECS: u64 = 10;
// Matches the signup code the platform launched with; override in production.
const DEFAULT_ADMIN_CODE: &str = "150405";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Canonical site origin used to build share URLs.
    pub site_base_url: String,
    /// Secret code required to sign up with the admin role.
    pub admin_signup_code: String,
    /// Root directory for the JSON-file document store.
    pub data_dir: PathBuf,
    /// Root directory for uploaded blobs (photos).
    pub blob_dir: PathBuf,
    /// Public base URL under which blobs are served.
    pub blob_base_url: String,
    /// TrueType/OpenType font used for share-image text, if configured.
    pub share_font_path: Option<PathBuf>,
    /// Timeout for fetching remote thumbnails during share-image rendering.
    pub asset_fetch_timeout_secs: u64,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; real env vars win.
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let site_base_url = env::var("CATALYSEED_SITE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let admin_signup_code =
            env::var("CATALYSEED_ADMIN_CODE").unwrap_or_else(|_| DEFAULT_ADMIN_CODE.to_string());

        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && admin_signup_code == DEFAULT_ADMIN_CODE {
            return Err(anyhow::anyhow!(
                "CATALYSEED_ADMIN_CODE must be set to a non-default value in production"
            ));
        }

        let data_dir: PathBuf = env::var("CATALYSEED_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
            .into();

        let blob_dir: PathBuf = env::var("CATALYSEED_BLOB_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("blobs"));

        let blob_base_url = env::var("CATALYSEED_BLOB_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BLOB_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let share_font_path = env::var("CATALYSEED_SHARE_FONT").ok().map(PathBuf::from);

        let asset_fetch_timeout_secs = env::var("CATALYSEED_ASSET_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ASSET_FETCH_TIMEOUT_SECS);

        Ok(Config {
            site_base_url,
            admin_signup_code,
            data_dir,
            blob_dir,
            blob_base_url,
            share_font_path,
            asset_fetch_timeout_secs,
            environment,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
