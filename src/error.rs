use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the boundary of the simulation core.
///
/// Every variant is a caller or configuration mistake. A validated engine
/// never produces an error while ticking.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("launch parameters cannot change while a run is in flight")]
    RunInProgress,

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
