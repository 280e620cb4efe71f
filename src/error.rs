use thiserror::Error;

pub type Result<T> = std::result::Result<T, WheelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The cumulative walk found no message. Unreachable for a validated table.
    #[error("Sampling exhausted the message table without a match")]
    SamplingExhausted,
}

impl WheelError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
