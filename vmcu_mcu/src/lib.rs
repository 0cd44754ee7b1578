//! # Virtual MCU
//!
//! A software stand-in for a microcontroller exposing eight digital pins,
//! `{prefix}:pin1` through `{prefix}:pin8`, that the host's configuration can
//! use like real endstop or filament-sensor inputs.
//!
//! - [`VirtualMcu`] owns the pin table and registers a chip factory with the
//!   host's naming subsystem.
//! - [`ChipAdapter`] resolves short pin names to [`PinAdapter`] handles.
//! - [`PinAdapter`] is a live view over one pin.
//!
//! ```rust
//! use vmcu_mcu::{PinMode, VirtualMcu};
//!
//! let mcu = VirtualMcu::default();
//! mcu.set_pin("pin3", true).unwrap();
//! assert_eq!(mcu.read_pin("pin3").unwrap(), 1);
//! assert_eq!(mcu.pin_mode("pin3").unwrap(), PinMode::Input);
//! ```

pub mod adapter;
pub mod error;
pub mod mcu;
pub mod pin;

pub use adapter::{ChipAdapter, PinAdapter};
pub use error::McuError;
pub use mcu::{VirtualMcu, DEFAULT_PREFIX};
pub use pin::{Pin, PinMode, PinStatus, PinTable, SharedPin, PIN_COUNT};
