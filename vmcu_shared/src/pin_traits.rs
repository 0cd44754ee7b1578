// Trait-based interfaces between the host's pin subsystem and a chip that exposes pins

use crate::error::{NamingError, PinError};

/// A pin handle handed to the host after a successful lookup.
///
/// The host calls one of the setup methods once at startup and then reads
/// the pin as often as its own lifecycle requires.
pub trait McuPin: Send {
    fn setup_input(&mut self, pull_up: bool, invert: bool);
    fn setup_output(&mut self, initial_value: i32);
    /// Current level, always 0 or 1.
    fn read(&self) -> u8;
}

/// A chip resolves short pin names (the part after `prefix:`) to handles.
pub trait PinChip: Send {
    fn setup_pin(&self, short_name: &str) -> Result<Box<dyn McuPin>, PinError>;
}

/// Produces a chip bound to one MCU each time the host needs it.
pub type ChipFactory = Box<dyn Fn() -> Box<dyn PinChip> + Send + Sync>;

/// The host's registry mapping a chip prefix to its factory.
pub trait NamingSubsystem: Send + Sync {
    fn register_chip(&self, prefix: &str, factory: ChipFactory) -> Result<(), NamingError>;
}
