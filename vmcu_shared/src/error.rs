use thiserror::Error;

/// Raised by a chip when the host asks for a pin it does not expose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinError {
    #[error("invalid pin '{0}'")]
    InvalidPin(String),
}

/// Errors from the pin-naming subsystem.
#[derive(Debug, Error)]
pub enum NamingError {
    #[error("duplicate chip name '{0}'")]
    DuplicateChip(String),
    #[error("unknown pin chip name '{0}'")]
    UnknownChip(String),
    #[error("invalid pin description '{0}'")]
    InvalidDescriptor(String),
    #[error("pin error: {0}")]
    Pin(#[from] PinError),
}
