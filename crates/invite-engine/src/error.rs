pub type InviteResult<T> = Result<T, InviteError>;

/// Failures loading host-supplied configuration. Runtime behavior never
/// errors: every other failure degrades to a default.
#[derive(thiserror::Error, Debug)]
pub enum InviteError {
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("timing error: {0}")]
    Timing(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl InviteError {
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
