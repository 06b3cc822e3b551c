//! Optional config from .getterrc or ~/.getterrc (JSON). Merged with env and CLI.
//!
//! Precedence, lowest to highest: built-in defaults < config file < CLI flags
//! (the CLI binary is responsible for applying its own flags on top of the
//! `Config` this module returns). A missing or invalid file is never an
//! error here: it silently yields defaults, and the caller may still
//! choose to log that fact.

use std::path::Path;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Effective settings for one run. CLI flags override these after loading.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub request_timeout_ms: u64,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            quiet: false,
        }
    }
}

/// Load config from `.getterrc` in `dir`, then `~/.getterrc`. Missing or
/// invalid file falls back to [`Config::default`].
pub fn load_config(dir: &Path) -> Config {
    let mut cfg = Config::default();
    let home = dirs_home();
    let candidates = [
        dir.join(".getterrc"),
        home.map(|h| h.join(".getterrc")).unwrap_or_else(|| dir.join(".none")),
    ];
    for path in &candidates {
        if path.is_file() {
            if let Ok(s) = std::fs::read_to_string(path) {
                if let Ok(v) = serde_json::from_str::<serde_json::Value>(&s) {
                    if let Some(p) = v.get("port").and_then(|x| x.as_u64()) {
                        cfg.port = p as u16;
                    }
                    if let Some(t) = v.get("request_timeout_ms").and_then(|x| x.as_u64()) {
                        cfg.request_timeout_ms = t;
                    }
                    if let Some(q) = v.get("quiet").and_then(|x| x.as_bool()) {
                        cfg.quiet = q;
                    }
                }
            }
            break;
        }
    }

    apply_env_overrides(&mut cfg);
    cfg
}

fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("GETTER_QUIET") {
        cfg.quiet = v == "1" || v.eq_ignore_ascii_case("true");
    }
    if let Ok(v) = std::env::var("GETTER_LOG") {
        if v.eq_ignore_ascii_case("quiet") || v.eq_ignore_ascii_case("error") {
            cfg.quiet = true;
        }
    }
}

fn dirs_home() -> Option<std::path::PathBuf> {
    #[cfg(unix)]
    {
        std::env::var("HOME").ok().map(std::path::PathBuf::from)
    }
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(std::path::PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(dir.path());
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert!(!cfg.quiet);
    }

    #[test]
    fn quiet_flag_is_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".getterrc"), r#"{"quiet": true}"#).unwrap();
        let cfg = load_config(dir.path());
        assert!(cfg.quiet);
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".getterrc"), "not json").unwrap();
        let cfg = load_config(dir.path());
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
