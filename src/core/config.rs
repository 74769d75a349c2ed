use crate::core::state::ShellContext;
use std::fs;
use std::path::{Path, PathBuf};

/// Startup configuration read from `~/.venarc`: line-oriented
/// `key value` pairs seeding the prompt prefix and the clobber guard.
#[derive(Debug, Default, PartialEq)]
pub struct Config {
    pub prompt_prefix: Option<String>,
    pub noclobber: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load `~/.venarc` if it exists; a missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match dirs::home_dir() {
            Some(home) => Self::load_from(&home.join(".venarc")),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Ok(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        let mut config = Config::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(char::is_whitespace) {
                Some(("prompt", rest)) => {
                    let rest = rest.trim();
                    if !rest.is_empty() {
                        config.prompt_prefix = Some(rest.to_string());
                    }
                }
                Some(("noclobber", value)) => {
                    config.noclobber = value.trim() == "on";
                }
                // Unknown keys are skipped
                _ => {}
            }
        }
        config
    }

    pub fn apply(&self, ctx: &mut ShellContext) {
        if let Some(prefix) = &self.prompt_prefix {
            ctx.prompt_prefix = Some(prefix.clone());
        }
        ctx.noclobber = self.noclobber;
    }
}
