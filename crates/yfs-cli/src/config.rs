use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use yfs_client::ClientConfig;

/// Contents of the `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub client: ClientConfig,
}

impl CliConfig {
    /// Load from `path`. No path, or a path that does not exist, gives the
    /// defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent; using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use yfs_client::DirFormat;

    #[test]
    fn no_path_gives_defaults() {
        let c = CliConfig::load(None).unwrap();
        assert_eq!(c, CliConfig::default());
        assert!(c.client.init_root);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = CliConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(c, CliConfig::default());
    }

    #[test]
    fn loads_client_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\ndir_format = \"legacy\"").unwrap();
        let c = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(c.client.dir_format, DirFormat::Legacy);
        assert!(c.client.init_root);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let c = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(c, CliConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\ndir_format = \"zip\"").unwrap();
        let err = CliConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}
