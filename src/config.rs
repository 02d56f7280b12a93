//! Optional TOML configuration. Every key has a default, so an absent file
//! and an empty file behave the same.
use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_MATH_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Script referenced from the document head to typeset the math.
    pub math_script_url: String,
    /// Title used when neither `\hwtitle` nor `\course` is given.
    pub fallback_title: String,
    /// Environment variable holding the publishing access token.
    pub token_env: String,
    /// Timeout for each publishing request.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            math_script_url: DEFAULT_MATH_SCRIPT_URL.to_owned(),
            fallback_title: String::from("Problem Set"),
            token_env: String::from("CANVAS_ACCESS_TOKEN"),
            timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&source).map_err(|source| Error::Config {
            path: path.to_owned(),
            source,
        })
    }
    pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }
}
