//! Error types for the card engine.

use thiserror::Error;

use crate::core::EntityId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Illegal play: {0}")]
    IllegalPlay(String),

    #[error("Target {0} was not offered")]
    TargetNotOffered(EntityId),

    #[error("No card at hand index {0}")]
    NoSuchCard(usize),

    #[error("Unknown card name: {0}")]
    UnknownCard(String),

    #[error("Game is already over")]
    GameOver,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
