pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("X11 backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Failed to build keyboard state: {0:#}")]
    StateBuild(anyhow::Error),

    #[error("Unknown format character: {0:?}")]
    UnknownDirective(char),

    #[error("{0:?} is not an integer")]
    InvalidArgument(String),

    #[error("layout_number must be between 0 and {max}, got {value}")]
    OutOfRange { value: i64, max: usize },

    #[error("Only one group configured, nothing to switch to")]
    SingleGroup,

    #[error("Failed to change group: {0:#}")]
    LockGroup(anyhow::Error),

    #[error("Backend query failed: {0:#}")]
    Backend(anyhow::Error),
}
