// Host-side errors. The animator itself never fails; only the window,
// config loading and snapshot writing can.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing the buffer to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Config read error ({path}): {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad TOML or out-of-range values
    #[error("Config error: {0}")]
    ConfigParse(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}
