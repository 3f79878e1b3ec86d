use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown terminology standard: {0}")]
    UnknownStandard(String),
    #[error("invalid implementation guide version: '{0}'")]
    InvalidGuideVersion(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
