// src/logging.rs

//! Subscriber setup for the `gruntcfg` binary.
//!
//! `--log-level` wins. Otherwise `GRUNTCFG_LOG` is read as an `EnvFilter`
//! directive list, so both `debug` and `gruntcfg::diagnostics=warn,info`
//! work. Without either, everything at `info` and above is shown.
//!
//! Output goes to stderr; stdout only carries resolved values.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "GRUNTCFG_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    env.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s.to_lowercase()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_environment() {
        let filter = build_filter(Some(LogLevel::Debug), Some("error"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn environment_is_used_without_flag() {
        assert_eq!(build_filter(None, Some(" WARN ")).to_string(), "warn");
        assert_eq!(build_filter(None, Some("")).to_string(), "info");
        assert_eq!(build_filter(None, None).to_string(), "info");
    }
}
