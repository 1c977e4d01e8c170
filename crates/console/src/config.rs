use anyhow::Context;
use protocol::MAX_IMAGES;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:19320";
const DEFAULT_LATENCY_MS: u64 = 1500;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const BODY_HEADROOM_BYTES: usize = 256 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConsoleConfig {
    #[serde(default = "default_listen_addr")]
    pub(crate) listen_addr: String,
    #[serde(default)]
    pub(crate) analysis: AnalysisConfig,
    #[serde(default)]
    pub(crate) intake: IntakeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct AnalysisConfig {
    pub(crate) latency_ms: u64,
    pub(crate) timeout_ms: u64,
    pub(crate) max_retries: u32,
    pub(crate) retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct IntakeConfig {
    pub(crate) max_images: usize,
    pub(crate) max_image_bytes: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            analysis: AnalysisConfig::default(),
            intake: IntakeConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: 0,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_images: MAX_IMAGES,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl AnalysisConfig {
    pub(crate) fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl IntakeConfig {
    /// Largest request body that can still carry `max_images` full-size
    /// images once base64-encoded, plus room for the text and JSON framing.
    pub(crate) fn request_body_limit(&self) -> usize {
        let encoded_image = self.max_image_bytes.div_ceil(3).saturating_mul(4);
        encoded_image
            .saturating_mul(self.max_images)
            .saturating_add(BODY_HEADROOM_BYTES)
    }
}

impl ConsoleConfig {
    pub(crate) fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: ConsoleConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.trim().is_empty() {
            anyhow::bail!("listen_addr cannot be empty");
        }
        if self.intake.max_images == 0 || self.intake.max_images > MAX_IMAGES {
            anyhow::bail!(
                "intake.max_images must be between 1 and {MAX_IMAGES}, got {}",
                self.intake.max_images
            );
        }
        if self.intake.max_image_bytes == 0 {
            anyhow::bail!("intake.max_image_bytes must be positive");
        }
        if self.analysis.timeout_ms == 0 {
            anyhow::bail!("analysis.timeout_ms must be positive");
        }
        if self.analysis.timeout_ms <= self.analysis.latency_ms {
            tracing::warn!(
                timeout_ms = self.analysis.timeout_ms,
                latency_ms = self.analysis.latency_ms,
                "analysis timeout does not exceed simulated latency; every analysis will time out"
            );
        }
        Ok(())
    }
}

pub(crate) fn load_console_config(path: Option<&Path>) -> anyhow::Result<ConsoleConfig> {
    let Some(path) = path else {
        return Ok(ConsoleConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ConsoleConfig::parse(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_dir;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ConsoleConfig::parse("").expect("config");
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.analysis.latency(), Duration::from_millis(1500));
        assert_eq!(config.analysis.max_retries, 0);
        assert_eq!(config.intake.max_images, 3);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = ConsoleConfig::parse(
            r#"
listen_addr = "0.0.0.0:8080"

[analysis]
latency_ms = 0
max_retries = 2
"#,
        )
        .expect("config");
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.analysis.latency_ms, 0);
        assert_eq!(config.analysis.max_retries, 2);
        assert_eq!(config.analysis.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.intake.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
    }

    #[test]
    fn rejects_image_cap_above_three() {
        let err = ConsoleConfig::parse("[intake]\nmax_images = 4\n")
            .err()
            .expect("expected error")
            .to_string();
        assert!(err.contains("max_images"));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(ConsoleConfig::parse("[analysis]\ntimeout_ms = 0\n").is_err());
    }

    #[test]
    fn body_limit_fits_every_image_at_full_size() {
        let intake = IntakeConfig::default();
        let limit = intake.request_body_limit();
        assert!(limit > 3 * 4 * (10 * 1024 * 1024) / 3);
        assert!(limit < 41 * 1024 * 1024);

        let small = IntakeConfig {
            max_images: 1,
            max_image_bytes: 3,
        };
        assert_eq!(small.request_body_limit(), 4 + BODY_HEADROOM_BYTES);
    }

    #[test]
    fn missing_path_means_defaults() {
        let config = load_console_config(None).expect("config");
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
    }

    #[test]
    fn loads_config_from_file() {
        let dir = temp_dir("scamguard-config");
        let path = dir.join("console.toml");
        std::fs::write(&path, "[intake]\nmax_images = 1\n").expect("write config");
        let config = load_console_config(Some(&path)).expect("config");
        assert_eq!(config.intake.max_images, 1);

        let missing = dir.join("missing.toml");
        let err = load_console_config(Some(&missing))
            .err()
            .expect("expected error")
            .to_string();
        assert!(err.contains("failed to read config"));
    }
}
