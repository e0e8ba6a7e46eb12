use std::path::Path;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::drag::DragSplit;

#[derive(Debug)]
/// An error that can occur when loading or saving a config file.
pub enum ConfigError {
    /// The file could not be read or written.
    Io(std::io::Error),
    /// The file is not valid TOML for the config.
    Parse(toml::de::Error),
    /// The config could not be serialized.
    Serialize(toml::ser::Error),
}
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "Parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "Serialization error: {e}"),
        }
    }
}
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Load a TOML config file, returning `T::default()` if the file doesn't exist.
pub fn load_config<T: Default + DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, ConfigError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("no config file found at {}, using defaults", path.display());
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub song_list: SongListConfig,
}
impl Config {
    pub const FILENAME: &str = "waxwing.toml";

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, toml::to_string(self)?)?;
        tracing::info!("saved config to {}", path.display());
        Ok(())
    }
}

/// Behaviour of the song lists (queue and search results).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SongListConfig {
    /// Whether search results can be dragged. The queue always can.
    pub search_results_draggable: bool,
    /// How a row is split into its insert-before and insert-after halves.
    pub drag_split: DragSplit,
}
impl Default for SongListConfig {
    fn default() -> Self {
        Self {
            search_results_draggable: false,
            drag_split: DragSplit::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.song_list.drag_split, DragSplit::Offset(10.0));
        assert!(!config.song_list.search_results_draggable);
    }

    #[test]
    fn test_parse_song_list_section() {
        let config: Config = toml::from_str(
            r#"
            [song_list]
            drag_split = { kind = "fraction", value = 0.5 }
            search_results_draggable = true
            "#,
        )
        .unwrap();
        assert_eq!(config.song_list.drag_split, DragSplit::Fraction(0.5));
        assert!(config.song_list.search_results_draggable);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let path = std::env::temp_dir().join("waxwing-config-that-does-not-exist.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let path =
            std::env::temp_dir().join(format!("waxwing-config-{}.toml", std::process::id()));
        let config = Config {
            song_list: SongListConfig {
                drag_split: DragSplit::Offset(6.0),
                search_results_draggable: true,
            },
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("waxwing-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "song_list = 3").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
