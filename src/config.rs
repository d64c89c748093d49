use clap::Args;
use reqwest::Url;
use std::time::Duration;

use crate::api::{ApiConfig, ReadRetryPolicy, TRANSACTION_CLOSED_MESSAGE};
use crate::utils::RetryConfig;

// ============================================================================
// Client Configuration
// ============================================================================
//
// Flags with environment fallbacks. A `.env` file in the working directory
// is loaded before parsing; real environment variables win over it.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Retry attempts must be at least 1")]
    ZeroAttempts,

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Backend base URL, e.g. https://api.example.com/v1
    #[arg(long, env = "MARKETPLACE_API_URL")]
    pub api_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "MARKETPLACE_API_TOKEN", hide = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "MARKETPLACE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Total attempts for order reads, the first one included
    #[arg(long, env = "MARKETPLACE_RETRY_ATTEMPTS", default_value_t = 3)]
    pub retry_attempts: u32,

    /// Fixed delay between read attempts in milliseconds
    #[arg(long, env = "MARKETPLACE_RETRY_DELAY_MS", default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Server message that makes a failed read worth retrying (repeatable)
    #[arg(
        long,
        env = "MARKETPLACE_RETRY_ON",
        value_delimiter = ',',
        default_value = TRANSACTION_CLOSED_MESSAGE
    )]
    pub retry_on: Vec<String>,

    /// Also retry reads on timeouts, connect failures and gateway errors
    #[arg(long, env = "MARKETPLACE_RETRY_NETWORK_ERRORS")]
    pub retry_network_errors: bool,

    /// Tracing filter directives
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// Print Prometheus metrics to stderr on exit
    #[arg(long)]
    pub print_metrics: bool,
}

impl ClientConfig {
    pub fn read_retry_policy(&self) -> Result<ReadRetryPolicy, ConfigError> {
        if self.retry_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        Ok(ReadRetryPolicy {
            config: RetryConfig::fixed(self.retry_attempts, Duration::from_millis(self.retry_delay_ms)),
            retryable_messages: self
                .retry_on
                .iter()
                .map(|message| message.trim().to_string())
                .filter(|message| !message.is_empty())
                .collect(),
            retry_network_errors: self.retry_network_errors,
        })
    }

    pub fn to_api_config(&self) -> Result<ApiConfig, ConfigError> {
        let base_url = Url::parse(self.api_url.trim()).map_err(|error| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            reason: error.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: self.api_url.clone(),
                reason: "not a base URL".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let mut config = ApiConfig::new(base_url).with_read_retry(self.read_retry_policy()?);
        config.timeout = Duration::from_secs(self.timeout_secs);
        if let Some(token) = self.api_token.as_deref().map(str::trim).filter(|token| !token.is_empty()) {
            config = config.with_token(token);
        }

        Ok(config)
    }
}

/// Load `.env` if present; a missing file is not an error
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ClientConfig,
    }

    fn parse(args: &[&str]) -> ClientConfig {
        let mut argv = vec!["marketplace"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().config
    }

    #[test]
    fn test_defaults_match_read_retry_policy() {
        let config = parse(&["--api-url", "https://api.example.com/v1"]);
        let api = config.to_api_config().unwrap();

        assert_eq!(api.base_url.as_str(), "https://api.example.com/v1");
        assert_eq!(api.timeout, Duration::from_secs(30));
        assert_eq!(api.token, None);
        assert_eq!(api.read_retry, ReadRetryPolicy::default());
    }

    #[test]
    fn test_retry_overrides() {
        let config = parse(&[
            "--api-url",
            "http://localhost:3000",
            "--retry-attempts",
            "5",
            "--retry-delay-ms",
            "250",
            "--retry-on",
            "deadlock detected",
            "--retry-on",
            "Transaction already closed",
            "--retry-network-errors",
        ]);
        let policy = config.read_retry_policy().unwrap();

        assert_eq!(policy.config, RetryConfig::fixed(5, Duration::from_millis(250)));
        assert_eq!(
            policy.retryable_messages,
            vec!["deadlock detected".to_string(), "Transaction already closed".to_string()]
        );
        assert!(policy.retry_network_errors);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = parse(&["--api-url", "http://localhost:3000", "--retry-attempts", "0"]);
        assert!(matches!(config.to_api_config(), Err(ConfigError::ZeroAttempts)));
    }

    #[test]
    fn test_bad_url_rejected() {
        let config = parse(&["--api-url", "not a url"]);
        assert!(matches!(config.to_api_config(), Err(ConfigError::InvalidUrl { .. })));

        let config = parse(&["--api-url", "mailto:ops@example.com"]);
        assert!(matches!(config.to_api_config(), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = parse(&["--api-url", "http://localhost:3000", "--api-token", "  "]);
        assert_eq!(config.to_api_config().unwrap().token, None);

        let config = parse(&["--api-url", "http://localhost:3000", "--api-token", "tok"]);
        assert_eq!(config.to_api_config().unwrap().token.as_deref(), Some("tok"));
    }
}
