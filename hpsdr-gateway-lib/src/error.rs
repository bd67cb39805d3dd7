use thiserror::Error;

/// Errors that can occur in the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No enabled radios configured")]
    NoEnabledRadios,

    #[error("Failed to resolve radio hostname: {0}")]
    Resolve(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
