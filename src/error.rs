// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config persist error: {0}")]
    ConfigPersist(String),

    #[error("Config input error: {0}")]
    ConfigInput(String),

    #[error("Platform error: {0}")]
    Platform(String),
}
