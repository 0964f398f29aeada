//! Configuration module
//!
//! Settings come from the environment (with `.env` support). Everything except the
//! listen port falls back to a default; the archive token may be empty, which the
//! server reports as a warning at startup.

use std::env;
use std::time::Duration;

const SCANNER_IP: &str = "printer.local";
const PAPERLESS_URL: &str = "http://localhost:8000";
const API_HOST: &str = "0.0.0.0";
const API_PORT: &str = "5050";
const SCAN_MAX_RETRIES: u32 = 30;
const SCAN_RETRY_DELAY_SECS: u64 = 2;
const SCANNER_REQUEST_TIMEOUT_SECS: u64 = 10;
const DOCUMENT_TIMEOUT_SECS: u64 = 60;
const AUTOSCAN_POLL_INTERVAL_SECS: u64 = 2;
const AUTOSCAN_DEBOUNCE_SECS: u64 = 3;

/// Bounded retry for `NextDocument` polling. Only "not ready" answers are retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: SCAN_MAX_RETRIES,
            interval: Duration::from_secs(SCAN_RETRY_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    /// Total waiting budget reported when the scanner never becomes ready.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoScanConfig {
    pub poll_interval: Duration,
    pub debounce: Duration,
}

impl Default for AutoScanConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(AUTOSCAN_POLL_INTERVAL_SECS),
            debounce: Duration::from_secs(AUTOSCAN_DEBOUNCE_SECS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub scanner_ip: String,
    pub paperless_url: String,
    pub paperless_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub environment: String,
    /// Timeout for status, capabilities, job creation and job deletion.
    pub scanner_request_timeout: Duration,
    /// Timeout for each `NextDocument` request and for the archive upload.
    pub document_timeout: Duration,
    pub retry: RetryPolicy,
    pub autoscan: AutoScanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner_ip: SCANNER_IP.to_string(),
            paperless_url: PAPERLESS_URL.to_string(),
            paperless_token: String::new(),
            api_host: API_HOST.to_string(),
            api_port: 5050,
            environment: "development".to_string(),
            scanner_request_timeout: Duration::from_secs(SCANNER_REQUEST_TIMEOUT_SECS),
            document_timeout: Duration::from_secs(DOCUMENT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            autoscan: AutoScanConfig::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| API_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("API_PORT must be a valid port number"))?;

        let config = Self {
            scanner_ip: env::var("SCANNER_IP").unwrap_or_else(|_| SCANNER_IP.to_string()),
            paperless_url: env::var("PAPERLESS_URL")
                .unwrap_or_else(|_| PAPERLESS_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            paperless_token: env::var("PAPERLESS_TOKEN").unwrap_or_default(),
            api_host: env::var("API_HOST").unwrap_or_else(|_| API_HOST.to_string()),
            api_port,
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
            scanner_request_timeout: Duration::from_secs(env_or(
                "SCANNER_REQUEST_TIMEOUT_SECS",
                SCANNER_REQUEST_TIMEOUT_SECS,
            )),
            document_timeout: Duration::from_secs(env_or(
                "DOCUMENT_TIMEOUT_SECS",
                DOCUMENT_TIMEOUT_SECS,
            )),
            retry: RetryPolicy {
                max_attempts: env_or("SCAN_MAX_RETRIES", SCAN_MAX_RETRIES),
                interval: Duration::from_secs(env_or(
                    "SCAN_RETRY_DELAY_SECS",
                    SCAN_RETRY_DELAY_SECS,
                )),
            },
            autoscan: AutoScanConfig {
                poll_interval: Duration::from_secs(env_or(
                    "AUTOSCAN_POLL_INTERVAL_SECS",
                    AUTOSCAN_POLL_INTERVAL_SECS,
                )),
                debounce: Duration::from_secs(env_or(
                    "AUTOSCAN_DEBOUNCE_SECS",
                    AUTOSCAN_DEBOUNCE_SECS,
                )),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.scanner_ip.trim().is_empty() {
            return Err(anyhow::anyhow!("SCANNER_IP must not be empty"));
        }

        if !self.paperless_url.starts_with("http://") && !self.paperless_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PAPERLESS_URL must start with http:// or https://"
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(anyhow::anyhow!("SCAN_MAX_RETRIES must be at least 1"));
        }

        if self.autoscan.poll_interval.is_zero() {
            return Err(anyhow::anyhow!(
                "AUTOSCAN_POLL_INTERVAL_SECS must be greater than 0"
            ));
        }

        if self.scanner_request_timeout.is_zero() || self.document_timeout.is_zero() {
            return Err(anyhow::anyhow!("Request timeouts must be greater than 0"));
        }

        Ok(())
    }

    /// Root of the scanner's eSCL resources, e.g. `http://printer.local/eSCL`.
    pub fn scanner_base_url(&self) -> String {
        format!("http://{}/eSCL", self.scanner_ip)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
