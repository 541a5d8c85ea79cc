//! Configuration for the browserslist updater module
//!
//! Loaded once at module init from an optional TOML file plus env
//! overrides. Missing or unparsable values fall back to the disabled
//! defaults rather than erroring: an unset `run_on_build` means no build
//! hook, an unset interval means no timer.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UpdaterError};

/// External command invoked to refresh the browserslist database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdateCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for UpdateCommand {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["update-browserslist-db@latest".to_string()],
        }
    }
}

impl UpdateCommand {
    /// Parse a whitespace-separated command line, e.g. from an env
    /// override. Returns None for an empty string.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Run an update before every framework build.
    pub run_on_build: bool,
    /// Delay between periodic updates, in milliseconds. 0 disables the
    /// timer.
    pub update_interval_ms: u64,
    /// Command used for the update. Hosts can pin the direct CLI here
    /// instead of going through npx.
    pub update_command: UpdateCommand,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_on_build: false,
            update_interval_ms: 0,
            update_command: UpdateCommand::default(),
        }
    }
}

impl Config {
    /// Load configuration from the TOML file and environment variables.
    /// Uses ADAPT_BROWSERSLIST_CONFIG or defaults to "browserslist.toml";
    /// a missing file means defaults, a malformed file is an error.
    pub fn load() -> Result<Self> {
        crate::load_env();

        let config_path = std::env::var("ADAPT_BROWSERSLIST_CONFIG")
            .unwrap_or_else(|_| "browserslist.toml".to_string());

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content).map_err(|e| UpdaterError::Config {
                message: format!("{config_path}: {e}"),
            })?,
            Err(_) => {
                tracing::debug!("config file {} not found, using defaults", config_path);
                Self::default()
            }
        };

        // Env-first overrides
        if let Ok(raw) = std::env::var("ADAPT_BROWSERSLIST_RUN_ON_BUILD") {
            config.run_on_build = raw == "1" || raw.eq_ignore_ascii_case("true");
        }
        if let Ok(raw) = std::env::var("ADAPT_BROWSERSLIST_UPDATE_INTERVAL_MS") {
            config.update_interval_ms = raw.parse().unwrap_or(0);
        }
        if let Ok(raw) = std::env::var("ADAPT_BROWSERSLIST_COMMAND")
            && let Some(command) = UpdateCommand::parse(&raw)
        {
            config.update_command = command;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_both_triggers() {
        let config = Config::default();
        assert!(!config.run_on_build);
        assert_eq!(config.update_interval_ms, 0);
        assert_eq!(config.update_command.program, "npx");
    }

    #[test]
    fn toml_round_trip() {
        let config: Config = toml::from_str(
            r#"
            run_on_build = true
            update_interval_ms = 86400000

            [update_command]
            program = "update-browserslist-db"
            "#,
        )
        .unwrap();
        assert!(config.run_on_build);
        assert_eq!(config.update_interval_ms, 86_400_000);
        assert_eq!(config.update_command.program, "update-browserslist-db");
        assert!(config.update_command.args.is_empty());
    }

    #[test]
    fn parse_command_splits_on_whitespace() {
        let command = UpdateCommand::parse("npx update-browserslist-db@latest").unwrap();
        assert_eq!(command.program, "npx");
        assert_eq!(command.args, vec!["update-browserslist-db@latest"]);
        assert!(UpdateCommand::parse("   ").is_none());
    }

    // Env-mutating tests share the process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn env_overrides_apply() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("ADAPT_BROWSERSLIST_RUN_ON_BUILD", "true");
            std::env::set_var("ADAPT_BROWSERSLIST_UPDATE_INTERVAL_MS", "5000");
            std::env::set_var("ADAPT_BROWSERSLIST_COMMAND", "echo updated");
        }

        let config = Config::load().unwrap();

        unsafe {
            std::env::remove_var("ADAPT_BROWSERSLIST_RUN_ON_BUILD");
            std::env::remove_var("ADAPT_BROWSERSLIST_UPDATE_INTERVAL_MS");
            std::env::remove_var("ADAPT_BROWSERSLIST_COMMAND");
        }

        assert!(config.run_on_build);
        assert_eq!(config.update_interval_ms, 5000);
        assert_eq!(config.update_command.program, "echo");
        assert_eq!(config.update_command.args, vec!["updated"]);
    }

    #[test]
    fn unparsable_interval_disables_timer() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("ADAPT_BROWSERSLIST_UPDATE_INTERVAL_MS", "daily");
        }
        let config = Config::load().unwrap();
        unsafe {
            std::env::remove_var("ADAPT_BROWSERSLIST_UPDATE_INTERVAL_MS");
        }
        assert_eq!(config.update_interval_ms, 0);
    }
}
