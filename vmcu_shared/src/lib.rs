// vmcu_shared: shared traits and types for the host glue and the virtual MCU

pub mod config;
pub mod error;
pub mod pin_traits;
pub mod pins;

pub use error::{NamingError, PinError};
pub use pin_traits::{ChipFactory, McuPin, NamingSubsystem, PinChip};
pub use pins::{PinDescriptor, PinRegistry, DEFAULT_CHIP};
