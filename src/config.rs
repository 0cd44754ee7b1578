// src/config.rs - configuration lives in the shared crate
pub use vmcu_shared::config::*;
