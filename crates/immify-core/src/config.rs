//! Backend connection configuration.
//!
//! The hosted backend is addressed by two values consumed at client
//! construction time: the service base URL and the anon credential.
//!
//! Configuration priority: `~/.config/immify/config.toml` > environment
//! variables (`SUPABASE_URL`, `SUPABASE_ANON_KEY`), resolved per field.

use crate::error::{ImmifyError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable holding the service base URL.
pub const URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the anon credential.
pub const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

const CONFIG_DIR: &str = "immify";
const CONFIG_FILE: &str = "config.toml";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Service base URL, without a trailing slash.
    pub url: String,
    /// Static anon credential sent as `apikey` / bearer token.
    pub anon_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigRoot {
    supabase: Option<SupabaseSection>,
}

#[derive(Debug, Default, Deserialize)]
struct SupabaseSection {
    url: Option<String>,
    anon_key: Option<String>,
}

impl BackendConfig {
    /// Creates a config from explicit values, normalizing the URL.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Loads the config from the config file and the environment.
    ///
    /// `base_path` overrides the config directory (used by tests); when
    /// `None`, the platform config directory is used.
    pub fn load(base_path: Option<&Path>) -> Result<Self> {
        Self::resolve(base_path, None, None)
    }

    /// Loads the config with per-field overrides (e.g. command-line
    /// flags). Each field resolves independently: override > config
    /// file > environment. A field covered by an override never fails
    /// resolution, whatever the file and environment hold.
    pub fn resolve(
        base_path: Option<&Path>,
        url_override: Option<&str>,
        anon_key_override: Option<&str>,
    ) -> Result<Self> {
        let file = Self::from_file(Self::config_file_path(base_path))?;

        let url = url_override
            .map(str::to_string)
            .or_else(|| file.as_ref().and_then(|s| s.url.clone()))
            .or_else(|| env::var(URL_ENV).ok())
            .ok_or_else(|| {
                ImmifyError::config(format!(
                    "service URL not set: add [supabase] url to {CONFIG_DIR}/{CONFIG_FILE} or set {URL_ENV}"
                ))
            })?;

        let anon_key = anon_key_override
            .map(str::to_string)
            .or_else(|| file.as_ref().and_then(|s| s.anon_key.clone()))
            .or_else(|| env::var(ANON_KEY_ENV).ok())
            .ok_or_else(|| {
                ImmifyError::config(format!(
                    "anon key not set: add [supabase] anon_key to {CONFIG_DIR}/{CONFIG_FILE} or set {ANON_KEY_ENV}"
                ))
            })?;

        Ok(Self::new(url, anon_key))
    }

    fn config_file_path(base_path: Option<&Path>) -> Option<PathBuf> {
        match base_path {
            Some(base) => Some(base.join(CONFIG_FILE)),
            None => dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE)),
        }
    }

    fn from_file(path: Option<PathBuf>) -> Result<Option<SupabaseSection>> {
        let Some(path) = path else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, falling back to environment");
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        let root: ConfigRoot = toml::from_str(&raw)?;
        Ok(root.supabase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that touch SUPABASE_* run serialized; each sets the exact
    // environment it needs while holding the lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_env(key: &str, value: Option<&str>) {
        // SAFETY: callers hold ENV_LOCK, so no concurrent env access
        // from these tests.
        unsafe {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) {
        std::fs::write(dir.path().join("config.toml"), contents).unwrap();
    }

    #[test]
    fn explicit_values_are_normalized() {
        let config = BackendConfig::new("https://proj.supabase.co/", "anon");
        assert_eq!(config.url, "https://proj.supabase.co");
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn file_values_win_over_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_env(URL_ENV, Some("https://env.supabase.co"));
        set_env(ANON_KEY_ENV, Some("env-key"));

        let dir = tempfile::tempdir().unwrap();
        write_config(
            &dir,
            "[supabase]\nurl = \"https://file.supabase.co\"\nanon_key = \"file-key\"\n",
        );

        let config = BackendConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.url, "https://file.supabase.co");
        assert_eq!(config.anon_key, "file-key");

        set_env(URL_ENV, None);
        set_env(ANON_KEY_ENV, None);
    }

    #[test]
    fn environment_fills_fields_the_file_omits() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_env(URL_ENV, None);
        set_env(ANON_KEY_ENV, Some("env-key"));

        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, "[supabase]\nurl = \"https://file.supabase.co\"\n");

        let config = BackendConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.url, "https://file.supabase.co");
        assert_eq!(config.anon_key, "env-key");

        set_env(ANON_KEY_ENV, None);
    }

    #[test]
    fn missing_everything_is_a_config_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_env(URL_ENV, None);
        set_env(ANON_KEY_ENV, None);

        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, "[supabase]\n");

        let err = BackendConfig::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ImmifyError::Config(_)));
    }

    #[test]
    fn override_beats_file_and_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_env(URL_ENV, Some("https://env.supabase.co"));
        set_env(ANON_KEY_ENV, None);

        let dir = tempfile::tempdir().unwrap();
        write_config(
            &dir,
            "[supabase]\nurl = \"https://file.supabase.co\"\nanon_key = \"file-key\"\n",
        );

        let config =
            BackendConfig::resolve(Some(dir.path()), Some("https://flag.supabase.co"), None)
                .unwrap();
        assert_eq!(config.url, "https://flag.supabase.co");
        assert_eq!(config.anon_key, "file-key");

        set_env(URL_ENV, None);
    }

    #[test]
    fn single_override_supplies_the_field_nothing_else_has() {
        let _guard = ENV_LOCK.lock().unwrap();
        set_env(URL_ENV, None);
        set_env(ANON_KEY_ENV, None);

        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, "[supabase]\nanon_key = \"file-key\"\n");

        // Only the flag provides a URL; resolution must not fail.
        let config =
            BackendConfig::resolve(Some(dir.path()), Some("https://flag.supabase.co"), None)
                .unwrap();
        assert_eq!(config.url, "https://flag.supabase.co");
        assert_eq!(config.anon_key, "file-key");
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, "not toml [");

        let err = BackendConfig::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ImmifyError::Serialization { .. }));
    }
}
