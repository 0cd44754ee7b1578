use thiserror::Error;
use vmcu_shared::NamingError;

#[derive(Debug, Error)]
pub enum McuError {
    #[error("unknown pin '{0}'")]
    UnknownPin(String),
    #[error("unknown pin mode '{0}', expected 'input' or 'output'")]
    UnknownMode(String),
    #[error("chip registration failed: {0}")]
    Registration(#[from] NamingError),
}
