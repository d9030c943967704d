use crate::{
    host::MOST_RECENT_TAB_COMMAND,
    shortcut::{Shortcut, DEFAULT_SHORTCUT},
};
use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

/// User-facing config for the native host
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The shortcut bound to the switch command, e.g. `Ctrl+Shift+1`
    #[serde(default = "default_shortcut")]
    pub shortcut: String,
    /// The manifest command the shortcut is bound to
    #[serde(default = "default_command")]
    pub command: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shortcut: default_shortcut(),
            command: default_command(),
        }
    }
}

impl Config {
    /// The configured shortcut, or the default if the configured value is not a valid shortcut
    pub fn shortcut(&self) -> Shortcut {
        match Shortcut::parse(self.shortcut.as_str()) {
            Ok(shortcut) => shortcut,
            Err(err) => {
                warn!("{}, using {}", err, DEFAULT_SHORTCUT);
                Shortcut::default()
            }
        }
    }
}

fn default_shortcut() -> String {
    DEFAULT_SHORTCUT.to_string()
}

fn default_command() -> String {
    MOST_RECENT_TAB_COMMAND.to_string()
}

pub fn dotdir_path() -> Result<PathBuf> {
    let mut dir = dirs::home_dir().ok_or_else(|| anyhow::Error::msg("home_dir not found"))?;

    dir.push(".lasttab");

    Ok(dir)
}

/// Creates the dotdir, if it doesn't exist
pub fn mkdir() -> Result<()> {
    let path = dotdir_path()?;
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub fn host_log() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("host.log");
    Ok(path)
}

pub fn config_path() -> Result<PathBuf> {
    let mut path = dotdir_path()?;
    path.push("lasttab.yml");
    Ok(path)
}

/// Loads the config at the given path, writing a default config if the file does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.is_file() {
        debug!("config {:?} does not exist, writing defaults", path);
        let config = Config::default();
        write_config(path, &config)?;

        return Ok(config);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_yaml::from_reader(reader)?;

    Ok(config)
}

pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_yaml::to_writer(writer, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{config_path, dotdir_path, host_log, load_config, Config};
    use crate::shortcut::DEFAULT_SHORTCUT;
    use std::io::Write;

    #[test]
    fn dotdir_path_matches() {
        let mut expected = dirs::home_dir().expect("home dir required");
        expected.push(".lasttab");

        let path = dotdir_path();
        assert!(path.is_ok());
        assert_eq!(expected, path.unwrap());
    }

    #[test]
    fn config_path_matches() {
        let mut expected = dirs::home_dir().expect("home dir required");
        expected.push(".lasttab");
        expected.push("lasttab.yml");

        assert_eq!(expected, config_path().unwrap());
    }

    #[test]
    fn host_log_matches() {
        let mut expected = dirs::home_dir().expect("home dir required");
        expected.push(".lasttab");
        expected.push("host.log");

        assert_eq!(expected, host_log().unwrap());
    }

    #[test]
    fn missing_config_writes_default() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lasttab.yml");

        let config = load_config(path.as_path())?;
        assert_eq!(Config::default(), config);
        assert!(path.is_file());

        let reloaded = load_config(path.as_path())?;
        assert_eq!(config, reloaded);

        Ok(())
    }

    #[test]
    fn partial_config_fills_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lasttab.yml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "shortcut: Alt+F2")?;

        let config = load_config(path.as_path())?;
        assert_eq!("Alt+F2", config.shortcut().as_str());
        assert_eq!("most-recent-tab-command", config.command);

        Ok(())
    }

    #[test]
    fn invalid_shortcut_falls_back() {
        let config = Config {
            shortcut: "Hyper+X".to_string(),
            ..Config::default()
        };

        assert_eq!(DEFAULT_SHORTCUT, config.shortcut().as_str());
    }
}
