//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the gateway location, the stored bearer token, the operator's
//! session roles and display preferences.

mod error;

pub use error::ConfigError;

use crate::error::AppResult;
use crate::gateway::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/hrms-console";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub gateway_url: String,
    pub access_token: Option<String>,
    pub session_roles: Vec<String>,
    pub items_per_page: usize,
    pub theme_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct FileSpec {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default = "default_session_roles")]
    pub session_roles: Vec<String>,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

fn default_gateway_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_session_roles() -> Vec<String> {
    vec!["admin".to_string()]
}

fn default_items_per_page() -> usize {
    10
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default settings and no token.
    ///
    pub fn new() -> Config {
        Config {
            gateway_url: default_gateway_url(),
            access_token: None,
            session_roles: default_session_roles(),
            items_per_page: default_items_per_page(),
            theme_name: default_theme_name(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place;
    /// the token is then collected on the login screen.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> AppResult<()> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(FILE_NAME);
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            self.apply(Config::parse(&contents)?);
            log::debug!("Loaded configuration from {}", file_path.display());
        }
        Ok(())
    }

    fn parse(contents: &str) -> Result<FileSpec, ConfigError> {
        if contents.trim().is_empty() {
            return serde_yaml::from_str("{}")
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()));
        }
        serde_yaml::from_str(contents).map_err(|e| ConfigError::DeserializationFailed(e.to_string()))
    }

    fn apply(&mut self, data: FileSpec) {
        self.gateway_url = data.gateway_url;
        self.access_token = data.access_token.filter(|token| !token.is_empty());
        self.session_roles = data.session_roles;
        self.items_per_page = data.items_per_page.max(1);
        self.theme_name = data.theme_name;
    }

    fn file_spec(&self) -> FileSpec {
        FileSpec {
            gateway_url: self.gateway_url.clone(),
            access_token: self.access_token.clone(),
            session_roles: self.session_roles.clone(),
            items_per_page: self.items_per_page,
            theme_name: self.theme_name.clone(),
        }
    }

    /// Attempt to serialize the configuration data and write it to the disk,
    /// returning any unrecoverable errors.
    ///
    pub fn save(&self) -> AppResult<()> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(&self.file_spec())
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Override the gateway location for this run.
    ///
    pub fn set_gateway_url(&mut self, url: &str) -> Result<(), ConfigError> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidGatewayUrl(url.to_owned()));
        }
        self.gateway_url = url.to_owned();
        Ok(())
    }

    /// Store the access token in client storage.
    ///
    pub fn save_token(&mut self, token: String) -> AppResult<()> {
        if token.trim().is_empty() {
            return Err(ConfigError::AccessTokenNotSet.into());
        }
        self.access_token = Some(token.trim().to_owned());
        self.ensure_file_path()?;
        self.save()
    }

    /// Remove the access token from client storage.
    ///
    pub fn clear_token(&mut self) -> AppResult<()> {
        self.access_token = None;
        self.ensure_file_path()?;
        self.save()
    }

    fn ensure_file_path(&mut self) -> AppResult<()> {
        if self.file_path.is_none() {
            self.file_path = Some(Config::default_path()?.join(Path::new(FILE_NAME)));
        }
        Ok(())
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> AppResult<PathBuf> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;

    fn temp_dir() -> PathBuf {
        let id: uuid::Uuid = UUIDv4.fake();
        let dir = std::env::temp_dir().join(format!("hrms-console-test-{}", id));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.gateway_url, "https://localhost:7777/gateway");
        assert_eq!(config.session_roles, vec!["admin"]);
        assert_eq!(config.items_per_page, 10);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let data = Config::parse("access_token: abc\nitems_per_page: 0\n").unwrap();
        let mut config = Config::new();
        config.apply(data);
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.items_per_page, 1);
        assert_eq!(config.theme_name, "tokyo-night");
    }

    #[test]
    fn test_parse_empty_file() {
        let data = Config::parse("").unwrap();
        assert_eq!(data.gateway_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_invalid_file() {
        assert!(matches!(
            Config::parse("items_per_page: [1"),
            Err(ConfigError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn test_token_save_and_clear_round_trip() {
        let dir = temp_dir();
        let dir_str = dir.to_string_lossy().to_string();

        let mut config = Config::new();
        config.load(Some(&dir_str)).unwrap();
        config.save_token(" secret ".to_string()).unwrap();

        let mut reloaded = Config::new();
        reloaded.load(Some(&dir_str)).unwrap();
        assert_eq!(reloaded.access_token.as_deref(), Some("secret"));

        reloaded.clear_token().unwrap();
        let mut cleared = Config::new();
        cleared.load(Some(&dir_str)).unwrap();
        assert!(cleared.access_token.is_none());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_reads_existing_file() {
        let dir = temp_dir();
        fs::write(
            dir.join(FILE_NAME),
            "gateway_url: http://hr.internal/gateway\naccess_token: abc\nitems_per_page: 25\n",
        )
        .unwrap();

        let mut config = Config::new();
        config.load(Some(&dir.to_string_lossy())).unwrap();
        assert_eq!(config.gateway_url, "http://hr.internal/gateway");
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.items_per_page, 25);
        assert_eq!(config.file_path, Some(dir.join(FILE_NAME)));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_gateway_override() {
        let mut config = Config::new();
        config.set_gateway_url("http://10.0.0.5:7777/gateway/").unwrap();
        assert_eq!(config.gateway_url, "http://10.0.0.5:7777/gateway");
        assert!(matches!(
            config.set_gateway_url("ftp://nope"),
            Err(ConfigError::InvalidGatewayUrl(_))
        ));
    }

    #[test]
    fn test_save_token_rejects_blank() {
        let mut config = Config::new();
        assert!(config.save_token("  ".to_string()).is_err());
    }
}
