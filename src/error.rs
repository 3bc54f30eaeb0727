//! Session error type shared by every SDK query.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by a [`crate::session::DroneSession`].
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no paired session")]
    NotPaired,

    #[error("session already paired")]
    AlreadyPaired,

    #[error("device not responding: {0}")]
    NoResponse(String),

    #[error("sensor unavailable: {0}")]
    SensorUnavailable(&'static str),

    #[error("link error: {0}")]
    Link(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
