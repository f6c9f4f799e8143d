use shared::domain::ControlId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("duplicate control identity '{0}'")]
    DuplicateIdentity(ControlId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session already serves a renderer connection")]
    AlreadyConnected,
}
