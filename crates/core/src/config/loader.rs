//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// File names searched in the working directory, in order
const LOCAL_CONFIG_FILES: [&str; 2] = [".cws.toml", "cws.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations
    ///
    /// An explicit path must exist. Without one, the first existing standard
    /// file is used, falling back to defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                let p = PathBuf::from(p);
                if !p.is_file() {
                    return Err(Error::config_not_found(&p));
                }
                Some(p)
            }
            None => find_config_file(Path::new("."), dirs::config_dir().as_deref()),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find a configuration file in `dir`, then in the user config directory
fn find_config_file(dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    LOCAL_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .chain(user_config_dir.map(|d| d.join("cws").join("config.toml")))
        .find(|p| p.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {e}", path.display()),
        )
        .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("While loading {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert!(config.schema.credentials.client_id.is_none());
        assert!(config.schema.api.timeout_secs.is_none());
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = Config::load(Some("/definitely/not/here/cws.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[credentials]
client_id = "id"
refresh_token = "rt"

[item]
publisher_id = "pub"
item_id = "abc"

[api]
timeout_secs = 90
"#,
        )
        .unwrap();

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.schema.credentials.client_id.as_deref(), Some("id"));
        assert!(config.schema.credentials.client_secret.is_none());
        assert_eq!(config.schema.item.item_id.as_deref(), Some("abc"));
        assert_eq!(config.schema.api.timeout_secs, Some(90));
    }

    #[test]
    fn test_parse_error_is_coded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[item]\npublisher_id = 12\n").unwrap();

        let err = Config::load(path.to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.unwrap().contains("bad.toml"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typo.toml");
        fs::write(&path, "[item]\nitem = \"abc\"\n").unwrap();

        assert!(Config::load(path.to_str()).is_err());
    }

    #[test]
    fn test_search_order() {
        let work = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        assert_eq!(find_config_file(work.path(), Some(user.path())), None);

        let user_file = user.path().join("cws").join("config.toml");
        fs::create_dir_all(user_file.parent().unwrap()).unwrap();
        fs::write(&user_file, "").unwrap();
        assert_eq!(find_config_file(work.path(), Some(user.path())), Some(user_file));

        fs::write(work.path().join("cws.toml"), "").unwrap();
        assert_eq!(
            find_config_file(work.path(), Some(user.path())),
            Some(work.path().join("cws.toml"))
        );

        fs::write(work.path().join(".cws.toml"), "").unwrap();
        assert_eq!(
            find_config_file(work.path(), None),
            Some(work.path().join(".cws.toml"))
        );
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let mut config = ConfigSchema::default();
        config.credentials.client_secret = Some("s3cret".into());
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
