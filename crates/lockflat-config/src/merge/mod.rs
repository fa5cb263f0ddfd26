//! Configuration layering, fallback logic, and environment overrides

use camino::Utf8PathBuf;
use std::collections::HashMap;
use tracing::debug;

use crate::toml::{parse_bool, LockflatToml, Settings};
use crate::ConfigResult;
use lockflat_core::error::LockflatError;

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "lockflat.toml";

/// Prefix of recognized environment overrides
pub const ENV_PREFIX: &str = "LOCKFLAT_";

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project lockflat.toml file
    Project(Utf8PathBuf),
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the nearest project lockflat.toml, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<(LockflatToml, ConfigSource)>> {
        match self.find_config_path(CONFIG_FILE_NAME) {
            Some(path) => {
                debug!("Loading project configuration from {}", path);
                let config = crate::toml::load_from_file(&path).await?;
                Ok(Some((config, ConfigSource::Project(path))))
            }
            None => Ok(None),
        }
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn find_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(filename);
            if config_path.exists() {
                return Some(config_path);
            }
            current = dir.parent();
        }

        None
    }

    /// Load global configuration from ~/.lockflat/config.toml
    pub async fn load_global_config(&self) -> ConfigResult<Option<(LockflatToml, ConfigSource)>> {
        let Some(home_dir) = dirs::home_dir() else {
            debug!("No home directory, skipping global configuration");
            return Ok(None);
        };

        let global_config_path = Utf8PathBuf::try_from(home_dir)
            .map_err(|e| LockflatError::config("home_dir", format!("Invalid home directory path: {}", e)))?
            .join(".lockflat")
            .join("config.toml");

        if global_config_path.exists() {
            let config = crate::toml::load_from_file(&global_config_path).await?;
            Ok(Some((config, ConfigSource::Global(global_config_path))))
        } else {
            Ok(None)
        }
    }

    /// Load every layer and merge them into the effective settings
    pub async fn load_settings(&self, cli_overrides: HashMap<String, String>) -> ConfigResult<Settings> {
        let global = self.load_global_config().await?.map(|(config, _)| config);
        let project = self.load_project_config().await?.map(|(config, _)| config);

        ConfigLayering::merge_configs(
            global,
            project,
            ConfigLayering::collect_env_overrides(),
            cli_overrides,
        )
    }
}

impl ConfigLayering {
    /// Merge multiple configuration layers
    ///
    /// Priority, lowest first: defaults, global file, project file,
    /// environment, command line.
    pub fn merge_configs(
        global_config: Option<LockflatToml>,
        project_config: Option<LockflatToml>,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<Settings> {
        let mut merged = Settings::default();

        if let Some(global) = &global_config {
            merged.apply(global);
        }
        if let Some(project) = &project_config {
            merged.apply(project);
        }

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut merged, &env_overrides)?;

        // Apply CLI flag overrides (highest priority)
        Self::apply_cli_overrides(&mut merged, &cli_overrides)?;

        Ok(merged)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "LOCKFLAT_INCLUDE_DEV" => {
                    settings.include_dev = parse_bool(key, value)?;
                }
                "LOCKFLAT_OUTPUT_FORMAT" => {
                    settings.format = value.parse()?;
                }
                "LOCKFLAT_OUTPUT_PRETTY" => {
                    settings.pretty = parse_bool(key, value)?;
                }
                _ => {
                    // Unknown environment variable, ignore
                }
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "include-dev" => {
                    settings.include_dev = parse_bool("--include-dev", value)?;
                }
                "format" => {
                    settings.format = value.parse()?;
                }
                "pretty" => {
                    settings.pretty = parse_bool("--compact", value)?;
                }
                _ => {
                    // Unknown CLI override, ignore
                }
            }
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml::{OutputFormat, OutputSection, ResolveSection};
    use tempfile::TempDir;

    fn config(include_dev: Option<bool>, format: Option<OutputFormat>) -> LockflatToml {
        LockflatToml {
            resolve: ResolveSection { include_dev },
            output: OutputSection {
                format,
                pretty: None,
            },
        }
    }

    fn temp_utf8(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap()
    }

    #[tokio::test]
    async fn test_config_loader_creation() {
        let cwd = Utf8PathBuf::from("/test");
        let loader = ConfigLoader::new(cwd.clone());
        assert_eq!(loader.cwd, cwd);
    }

    #[tokio::test]
    async fn test_find_config_path_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_utf8(&temp_dir);

        let config_path = temp_path.join(CONFIG_FILE_NAME);
        tokio::fs::write(&config_path, "[resolve]\ninclude-dev = true\n")
            .await
            .unwrap();
        let nested = temp_path.join("packages").join("web");
        tokio::fs::create_dir_all(&nested).await.unwrap();

        let loader = ConfigLoader::new(nested);
        assert_eq!(loader.find_config_path(CONFIG_FILE_NAME), Some(config_path.clone()));

        let (config, source) = loader.load_project_config().await.unwrap().unwrap();
        assert_eq!(config.resolve.include_dev, Some(true));
        assert_eq!(source, ConfigSource::Project(config_path));
    }

    #[tokio::test]
    async fn test_missing_project_config_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_utf8(&temp_dir));
        assert!(loader
            .find_config_path("definitely-not-a-lockflat-config.toml")
            .is_none());
    }

    #[tokio::test]
    async fn test_broken_project_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_utf8(&temp_dir);
        tokio::fs::write(temp_path.join(CONFIG_FILE_NAME), "[resolve\n")
            .await
            .unwrap();

        let loader = ConfigLoader::new(temp_path);
        match loader.load_project_config().await {
            Err(LockflatError::TomlParse { message }) => assert!(message.contains("In file")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_merge_defaults() {
        let merged =
            ConfigLayering::merge_configs(None, None, HashMap::new(), HashMap::new()).unwrap();
        assert_eq!(merged, Settings::default());
    }

    #[test]
    fn test_merge_configs_priority() {
        let global_config = config(Some(true), Some(OutputFormat::Text));
        let project_config = config(None, Some(OutputFormat::Json));

        let env_overrides = HashMap::from([(
            "LOCKFLAT_OUTPUT_PRETTY".to_string(),
            "false".to_string(),
        )]);
        let cli_overrides = HashMap::from([("format".to_string(), "text".to_string())]);

        let merged = ConfigLayering::merge_configs(
            Some(global_config),
            Some(project_config),
            env_overrides,
            cli_overrides,
        )
        .unwrap();

        // Global value survives where the project is silent
        assert!(merged.include_dev);
        // CLI beats project
        assert_eq!(merged.format, OutputFormat::Text);
        // Environment beats defaults
        assert!(!merged.pretty);
    }

    #[test]
    fn test_cli_beats_environment() {
        let env_overrides = HashMap::from([(
            "LOCKFLAT_INCLUDE_DEV".to_string(),
            "true".to_string(),
        )]);
        let cli_overrides = HashMap::from([("include-dev".to_string(), "false".to_string())]);

        let merged =
            ConfigLayering::merge_configs(None, None, env_overrides, cli_overrides).unwrap();
        assert!(!merged.include_dev);
    }

    #[test]
    fn test_invalid_override_is_error() {
        let env_overrides = HashMap::from([(
            "LOCKFLAT_OUTPUT_FORMAT".to_string(),
            "yaml".to_string(),
        )]);

        let result = ConfigLayering::merge_configs(None, None, env_overrides, HashMap::new());
        assert!(matches!(result, Err(LockflatError::ConfigValidation { .. })));
    }

    #[test]
    fn test_collect_env_overrides() {
        std::env::set_var("LOCKFLAT_TEST_COLLECT", "1");
        std::env::set_var("NOT_LOCKFLAT_TEST_COLLECT", "ignored");

        let overrides = ConfigLayering::collect_env_overrides();

        assert!(overrides.contains_key("LOCKFLAT_TEST_COLLECT"));
        assert!(!overrides.contains_key("NOT_LOCKFLAT_TEST_COLLECT"));

        std::env::remove_var("LOCKFLAT_TEST_COLLECT");
        std::env::remove_var("NOT_LOCKFLAT_TEST_COLLECT");
    }
}
