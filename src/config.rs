//! Runtime configuration.
//!
//! Everything lives under one data directory: `storage.json` for the
//! snapshot and `screenshots/` for the archived images.

use std::{env, fs, path::PathBuf};

use tracing::debug;

pub const STORAGE_FILENAME: &str = "storage.json";
pub const SCREENSHOTS_DIRNAME: &str = "screenshots";
pub const TRACKER_APP_FILENAME: &str = "tracker_app.zip";

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_SENDER_EMAIL: &str = "noreply@yourcompany.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of all persisted state
    pub data_dir: PathBuf,
    /// Scheme and host used to build links sent to employees
    pub public_base_url: String,
    /// From address for outgoing email
    pub sender_email: String,
    /// Client bundle linked from activation email and pages
    pub tracker_app_filename: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            sender_email: DEFAULT_SENDER_EMAIL.to_string(),
            tracker_app_filename: TRACKER_APP_FILENAME.to_string(),
        }
    }

    /// Reads `PUBLIC_BASE_URL` and `SENDER_EMAIL`, falling back to defaults.
    /// Without an explicit data directory, uses the platform's local data dir.
    pub fn from_env(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let mut config = Self::new(data_dir);

        if let Ok(url) = env::var("PUBLIC_BASE_URL") {
            config = config.with_public_base_url(&url);
        }
        if let Ok(sender) = env::var("SENDER_EMAIL") {
            config.sender_email = sender;
        }

        debug!(?config, "resolved configuration");
        config
    }

    pub fn with_public_base_url(mut self, url: &str) -> Self {
        self.public_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILENAME)
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.data_dir.join(SCREENSHOTS_DIRNAME)
    }

    pub fn activation_link(&self, employee_id: &str) -> String {
        format!("{}/activate/{}", self.public_base_url, employee_id)
    }

    /// Site-relative path of the tracker download.
    pub fn download_path(&self) -> String {
        format!("/static/{}", self.tracker_app_filename)
    }

    pub fn download_link(&self) -> String {
        format!("{}{}", self.public_base_url, self.download_path())
    }

    /// Creates the data and screenshot directories if they are missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(self.screenshots_dir())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timetrack")
}
