use std::{env, fs, path::PathBuf};

use crate::prelude::*;
use nestify::nest;
use serde::{Deserialize, Serialize};

nest! {
    #[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]*
    #[serde(rename_all = "kebab-case", default)]*
    /// Persistent defaults for lifewatch, typically stored at `~/.config/lifewatch/config.yaml`.
    ///
    /// Every value is optional, anything given on the command line takes precedence:
    ///
    /// ```yaml
    /// watch:
    ///   interval: 1.0
    ///   highlight: 5.0
    ///   cmd-exclude: [tail, less]
    /// ```
    pub struct LifewatchConfig {
        pub watch: pub struct WatchConfig {
            /// Seconds between two scans
            pub interval: Option<f64>,
            /// Seconds a change stays highlighted
            pub highlight: Option<f64>,
            pub cmd_exclude: Vec<String>,
        }
    }
}

/// Get the path to the configuration file, following the XDG Base Directory Specification
///
/// If config_name is None, returns ~/.config/lifewatch/config.yaml (default)
/// If config_name is Some, returns ~/.config/lifewatch/{config_name}.yaml
fn get_configuration_file_path(config_name: Option<&str>) -> Result<PathBuf> {
    let config_dir = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = env::var_os("HOME").ok_or_else(|| anyhow!("HOME env variable not set"))?;
            PathBuf::from(home).join(".config")
        }
    };
    let config_dir = config_dir.join("lifewatch");

    Ok(match config_name {
        Some(name) => config_dir.join(format!("{name}.yaml")),
        None => config_dir.join("config.yaml"),
    })
}

impl LifewatchConfig {
    /// Load the configuration. If it does not exist, return a default configuration.
    pub fn load(config_name: Option<&str>) -> Result<Self> {
        let config_path = get_configuration_file_path(config_name)?;

        match fs::read(&config_path) {
            Ok(config_str) => {
                let config: LifewatchConfig =
                    serde_yaml::from_slice(&config_str).context(format!(
                        "Failed to parse lifewatch config at {}",
                        config_path.display()
                    ))?;
                debug!("Config loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file not found at {}", config_path.display());
                Ok(LifewatchConfig::default())
            }
            Err(e) => bail!("Failed to load config: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, file_name: &str, content: &str) {
        let config_dir = dir.path().join("lifewatch");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(file_name), content).unwrap();
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = temp_env::with_var("XDG_CONFIG_HOME", Some(dir.path()), || {
            LifewatchConfig::load(None)
        })
        .unwrap();
        assert_eq!(config, LifewatchConfig::default());
    }

    #[test]
    fn test_load_watch_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "config.yaml",
            "watch:\n  interval: 1.5\n  cmd-exclude:\n    - tail\n    - less\n",
        );
        let config = temp_env::with_var("XDG_CONFIG_HOME", Some(dir.path()), || {
            LifewatchConfig::load(None)
        })
        .unwrap();

        assert_eq!(config.watch.interval, Some(1.5));
        assert_eq!(config.watch.highlight, None);
        assert_eq!(config.watch.cmd_exclude, vec!["tail", "less"]);
    }

    #[test]
    fn test_named_config() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "config.yaml", "watch:\n  highlight: 1.0\n");
        write_config(&dir, "slow.yaml", "watch:\n  highlight: 10.0\n");
        let config = temp_env::with_var("XDG_CONFIG_HOME", Some(dir.path()), || {
            LifewatchConfig::load(Some("slow"))
        })
        .unwrap();
        assert_eq!(config.watch.highlight, Some(10.0));
    }

    #[test]
    fn test_falls_back_to_home() {
        let dir = TempDir::new().unwrap();
        let path = temp_env::with_vars(
            [
                ("XDG_CONFIG_HOME", None),
                ("HOME", Some(dir.path().as_os_str())),
            ],
            || get_configuration_file_path(None),
        )
        .unwrap();
        assert_eq!(path, dir.path().join(".config/lifewatch/config.yaml"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "config.yaml", "watch:\n  interval: fast\n");
        let err = temp_env::with_var("XDG_CONFIG_HOME", Some(dir.path()), || {
            LifewatchConfig::load(None)
        })
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse lifewatch config"));
    }
}
