use std::fs;
use std::io::BufReader;
use std::{fs::File, path::PathBuf};

use serde::{Deserialize, Serialize};

use color_eyre::eyre::{bail, Context, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_found_prefix")]
    pub found_prefix: String,

    #[serde(default = "default_next_chars_prefix")]
    pub next_chars_prefix: String,

    #[serde(default = "default_not_found_message")]
    pub not_found_message: String,

    /// Diagnostic logging; off by default so the filter stays quiet in
    /// pipelines.
    #[serde(default)]
    pub logging: bool,

    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl Config {
    pub fn new(write: &bool, verbose: bool, log_to: Option<PathBuf>) -> Result<Self> {
        let config_path = get_app_config_path()?.join("config.yaml");
        if *write {
            write_default_config(&config_path).context("failed to write default config")?;
        }

        let mut config: Config;

        if let Ok(f) = File::open(config_path) {
            config = serde_yml::from_reader(BufReader::new(f)).context("unable to parse config")?;
        } else {
            config = Config::default()
        }

        if verbose {
            config.logging = true;
        }

        if let Some(p) = log_to {
            config.log_path = Some(p);
        }

        Ok(config)
    }
}

fn default_found_prefix() -> String {
    "Found: ".into()
}

fn default_next_chars_prefix() -> String {
    "Enable: ".into()
}

fn default_not_found_message() -> String {
    "Not found".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            found_prefix: default_found_prefix(),
            next_chars_prefix: default_next_chars_prefix(),
            not_found_message: default_not_found_message(),
            logging: false,
            log_path: None,
        }
    }
}

pub fn get_app_config_path() -> Result<std::path::PathBuf> {
    let path = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    };
    if path.is_none() {
        bail!("unable to find config path")
    }
    let mut path = path.unwrap();
    path.push("keyhint");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn write_default_config(path: &PathBuf) -> Result<()> {
    let config = Config::default();
    fs::write(path, serde_yml::to_string(&config)?)?;
    Ok(())
}
