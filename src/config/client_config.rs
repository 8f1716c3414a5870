// src/config/client_config.rs

use serde::{Deserialize, Serialize};
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://www.random.org";
pub const DEFAULT_USER_AGENT: &str = concat!("randomorg-rs/", env!("CARGO_PKG_VERSION"));

/// random.org refuses integer requests for more than 10,000 values.
pub const MAX_REQUEST_SIZE: usize = 10_000;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the random.org service
    pub base_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Query the quota before every buffer refill
    pub check_quota: bool,

    /// Raw integer buffering
    pub buffer: BufferConfig,
}

/// Refill sizing for the raw integer buffer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Integers requested by the first refill (default: 10)
    pub initial_batch_size: usize,

    /// Multiplier applied to the batch size after each refill (default: 2)
    pub growth_factor: usize,

    /// Upper bound on a single refill (default: 10,000)
    pub max_batch_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            log_level: "info".to_string(),
            check_quota: false,
            buffer: BufferConfig::default(),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            initial_batch_size: 10,
            growth_factor: 2,
            max_batch_size: MAX_REQUEST_SIZE,
        }
    }
}

impl ClientConfig {
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", 30)?
            .set_default("log_level", "info")?
            .set_default("check_quota", false)?
            .set_default("buffer.initial_batch_size", 10)?
            .set_default("buffer.growth_factor", 2)?
            .set_default("buffer.max_batch_size", MAX_REQUEST_SIZE as i64)
    }

    // RANDOMORG_TIMEOUT_SECS, RANDOMORG_BUFFER__GROWTH_FACTOR, ...
    fn environment() -> Environment {
        Environment::with_prefix("RANDOMORG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Load configuration with precedence: env vars → config file → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if Path::new("randomorg.toml").exists() {
            builder = builder.add_source(File::with_name("randomorg.toml"));
        } else if Path::new("randomorg.yaml").exists() {
            builder = builder.add_source(File::with_name("randomorg.yaml"));
        }

        let config: ClientConfig = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        let config: ClientConfig = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let buffer = &self.buffer;
        if buffer.initial_batch_size == 0 || buffer.growth_factor == 0 {
            return Err(ConfigError::Message(
                "buffer.initial_batch_size and buffer.growth_factor must be positive".to_string(),
            ));
        }
        if buffer.max_batch_size == 0 || buffer.max_batch_size > MAX_REQUEST_SIZE {
            return Err(ConfigError::Message(format!(
                "buffer.max_batch_size must be between 1 and {}",
                MAX_REQUEST_SIZE
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;

    fn temp_toml(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("randomorg-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.random.org");
        assert!(config.user_agent.starts_with("randomorg-rs/"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert!(!config.check_quota);
        assert_eq!(config.buffer.initial_batch_size, 10);
        assert_eq!(config.buffer.growth_factor, 2);
        assert_eq!(config.buffer.max_batch_size, 10_000);
    }

    #[test]
    #[serial]
    fn test_load_from_missing_file_uses_defaults() {
        let config = ClientConfig::load_from_file("does-not-exist-randomorg.toml").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.buffer.initial_batch_size, 10);
        assert_eq!(config.buffer.max_batch_size, MAX_REQUEST_SIZE);
    }

    #[test]
    #[serial]
    fn test_load_from_toml_file() {
        let path = temp_toml(
            "file",
            "timeout_secs = 5\ncheck_quota = true\n\n[buffer]\ninitial_batch_size = 50\ngrowth_factor = 3\nmax_batch_size = 500\n",
        );

        let config = ClientConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.timeout_secs, 5);
        assert!(config.check_quota);
        assert_eq!(config.buffer.initial_batch_size, 50);
        assert_eq!(config.buffer.growth_factor, 3);
        assert_eq!(config.buffer.max_batch_size, 500);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let path = temp_toml("env", "timeout_secs = 5\n\n[buffer]\ngrowth_factor = 3\ninitial_batch_size = 40\n");
        std::env::set_var("RANDOMORG_BUFFER__GROWTH_FACTOR", "7");
        std::env::set_var("RANDOMORG_TIMEOUT_SECS", "9");

        let result = ClientConfig::load_from_file(&path);

        std::env::remove_var("RANDOMORG_BUFFER__GROWTH_FACTOR");
        std::env::remove_var("RANDOMORG_TIMEOUT_SECS");
        fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.buffer.growth_factor, 7);
        assert_eq!(config.buffer.initial_batch_size, 40);
    }

    #[test]
    #[serial]
    fn test_oversized_batch_in_file_is_rejected() {
        let path = temp_toml("oversized", "[buffer]\nmax_batch_size = 20000\n");

        let result = ClientConfig::load_from_file(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_batch_is_rejected() {
        let config = ClientConfig {
            buffer: BufferConfig { max_batch_size: 20_000, ..BufferConfig::default() },
            ..ClientConfig::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_zero_growth_factor_is_rejected() {
        let config = ClientConfig {
            buffer: BufferConfig { growth_factor: 0, ..BufferConfig::default() },
            ..ClientConfig::default()
        };
        assert!(config.validated().is_err());
    }
}
