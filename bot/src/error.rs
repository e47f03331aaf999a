use thiserror::Error;

/// The generation backend failed. Carries the backend's error detail verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct GenerationError(pub String);

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Unknown personality: {0}")]
    UnknownPersonality(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable `{0}` is required")]
    Missing(&'static str),

    #[error("Could not get the environment variable `{0}` due to unicode error")]
    NotUnicode(&'static str),
}
