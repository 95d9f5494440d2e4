//! Logging configuration from environment variables

use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "swap_terminal=info,lib_swap=info,lib_core=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Directory for the daily-rotated log file
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "swap_terminal=debug,info")
    pub log_level: String,
    /// Mirror log output to stderr
    pub log_to_stderr: bool,
    /// Write JSON lines instead of plain text
    pub json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
            json: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim(), "1" | "true"))
        .unwrap_or(false)
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_dir: std::env::var("SWAP_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            log_to_stderr: env_flag("SWAP_LOG_STDERR"),
            json: env_flag("SWAP_LOG_JSON"),
        }
    }

    /// Path of today's log file prefix
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("swap-terminal.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_under_log_dir() {
        let config = DebugConfig {
            log_dir: PathBuf::from("/var/log/swap"),
            ..DebugConfig::default()
        };
        assert_eq!(config.log_file(), PathBuf::from("/var/log/swap/swap-terminal.log"));
        assert!(!config.json);
    }
}
