//! Fatal errors surfaced to the caller.
//!
//! Everything recoverable (missing inclusions, malformed environments, absent
//! metadata) is handled inside the stage that meets it and only logged.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::publish::PublishError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read `{}`: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write `{}`: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in `{}`: {}", .path.display(), .source)]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
