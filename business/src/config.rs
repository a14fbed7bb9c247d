//! Generator configuration.
//!
//! The remote endpoint, the optional request timeout and the download directory
//! are registered once as a [`State`] and read by every command from its snapshot.
//! Binaries build it from the environment with [`GeneratorConfig::from_env`]; tests
//! build it directly against a mock server.

use std::any::Any;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use log::info;
use quickqr_states::State;
use serde::Deserialize;
use ustr::Ustr;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://3grrhgboa8.execute-api.us-east-1.amazonaws.com/prod/generate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    endpoint_url: Ustr,
    timeout: Option<Duration>,
    download_dir: PathBuf,
}

const ENV_PREFIX: &str = "QUICKQR_";

/// `QUICKQR_*` environment variables with the prefix stripped, all optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    endpoint_url: Option<String>,
    timeout_ms: Option<u64>,
    download_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn new(endpoint_url: impl AsRef<str>) -> Self {
        Self {
            endpoint_url: Ustr::from(endpoint_url.as_ref()),
            timeout: None,
            download_dir: default_download_dir(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn endpoint_url(&self) -> Ustr {
        self.endpoint_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn download_dir(&self) -> &PathBuf {
        &self.download_dir
    }

    /// Reads `QUICKQR_ENDPOINT_URL`, `QUICKQR_TIMEOUT_MS` and `QUICKQR_DOWNLOAD_DIR`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(k, v)| {
                k.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_owned(), v.as_ref().to_owned()))
            })
            .collect();
        let raw: RawConfig = serde_env::from_iter(vars)
            .context("Failed to read QUICKQR_* environment variables")?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let RawConfig {
            endpoint_url,
            timeout_ms,
            download_dir,
        } = raw;

        let mut config = match endpoint_url {
            Some(url) if !url.trim().is_empty() => {
                info!("Using QR endpoint from environment: {url}");
                Self::new(url.trim())
            }
            _ => Self::default(),
        };
        if let Some(ms) = timeout_ms.filter(|ms| *ms > 0) {
            config.timeout = Some(Duration::from_millis(ms));
        }
        if let Some(dir) = download_dir {
            config.download_dir = dir;
        }
        config
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL)
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl State for GeneratorConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
