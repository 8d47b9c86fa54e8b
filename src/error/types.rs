use thiserror::Error;

/// Unified result type for the dashgrid crate.
pub type Result<T> = std::result::Result<T, DashError>;

/// Errors surfaced at the crate's IO and serialization boundaries.
///
/// Engine operations themselves never fail; these only escape from the
/// codec, configuration and collaborator helpers.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("layout codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("layout store error: {0}")]
    Store(#[from] StoreError),
    #[error("haptics error: {0}")]
    Haptics(#[from] HapticsError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures reported by a [`crate::store::LayoutStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by a [`crate::haptics::Haptics`] collaborator.
#[derive(Debug, Error)]
pub enum HapticsError {
    #[error("no vibrator present")]
    Unsupported,
    #[error("vibration rejected: {0}")]
    Rejected(String),
}
