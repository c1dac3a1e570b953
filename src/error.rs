//! Error type shared by the autocomplete engine, key parsing and configuration loading.

/// Errors produced while building entries, parsing key combinations or
/// loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An entry was constructed with an empty display string.
    #[error("autocomplete entry display text must not be empty")]
    EmptyDisplay,

    /// A key combination string could not be parsed.
    #[error("invalid key combination: {0:?}")]
    InvalidKey(String),

    /// A TOML configuration document failed to deserialize.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
