//! Config path resolution

use std::path::PathBuf;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "KITSY_CONFIG";

/// Default config file name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "kitsy.toml";

/// Returns the config file path.
///
/// Uses `$KITSY_CONFIG` when set and non-empty, otherwise `./kitsy.toml`.
pub fn config_path() -> PathBuf {
    resolve(std::env::var(CONFIG_ENV).ok())
}

fn resolve(env_value: Option<String>) -> PathBuf {
    match env_value {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_env() {
        assert_eq!(
            resolve(Some("/etc/kitsy/custom.toml".into())),
            PathBuf::from("/etc/kitsy/custom.toml")
        );
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(resolve(None), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(resolve(Some("  ".into())), PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
