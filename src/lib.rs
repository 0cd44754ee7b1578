//! # ams-vmcu
//!
//! Eight virtual digital pins (`ams:pin1`..`ams:pin8`) for a 3D-printer host,
//! usable anywhere a real endstop or filament-sensor input is expected.
//!
//! The core lives in [`vmcu_mcu`]; the host-facing traits, the pin registry
//! and the configuration model live in [`vmcu_shared`]. This crate wires them
//! together for a configuration file.

pub mod config;
pub mod host;

pub use host::{HostError, SensorState, VmcuHost};
pub use vmcu_mcu::{ChipAdapter, McuError, PinAdapter, PinMode, VirtualMcu};
pub use vmcu_shared::{McuPin, NamingError, NamingSubsystem, PinChip, PinError, PinRegistry};
