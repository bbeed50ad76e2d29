//! Path utilities for codemine.
//!
//! Per-user data lives under `~/.codemine/`:
//! - `~/.codemine/config.toml` - configuration used when no local file exists

use std::path::PathBuf;

/// Config file looked up in the working directory first.
pub const LOCAL_CONFIG: &str = "codemine.toml";

/// Returns the codemine home directory (`~/.codemine/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".codemine")
}

/// Returns the default config file path (`~/.codemine/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the config file to use when none was named explicitly.
///
/// `./codemine.toml` wins over `~/.codemine/config.toml`; `None` when
/// neither exists.
pub fn discover_config() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    let global = default_config();
    global.is_file().then_some(global)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_codemine_home() {
        let home = home_dir();
        let config = default_config();

        assert!(home.to_string_lossy().contains(".codemine"));
        assert!(config.to_string_lossy().contains(".codemine"));
        assert!(config.ends_with("config.toml"));
    }
}
