// Host-facing adapters: the chip the naming subsystem calls into, and the pin handles it returns

use crate::pin::{lock_pin, PinMode, PinTable, SharedPin};
use std::sync::Arc;
use vmcu_shared::{McuPin, PinChip, PinError};

/// Resolves short pin names against one MCU's pin table.
#[derive(Debug, Clone)]
pub struct ChipAdapter {
    pins: Arc<PinTable>,
}

impl ChipAdapter {
    pub fn new(pins: Arc<PinTable>) -> Self {
        Self { pins }
    }

    /// Look up `short_name` (e.g. `pin2`) and wrap it in a fresh adapter.
    pub fn lookup(&self, short_name: &str) -> Result<PinAdapter, PinError> {
        match self.pins.get(short_name) {
            Some(pin) => {
                tracing::debug!("Host resolved virtual pin {}", lock_pin(pin).name());
                Ok(PinAdapter::new(Arc::clone(pin)))
            }
            None => {
                tracing::warn!("Host requested unknown virtual pin '{}'", short_name);
                Err(PinError::InvalidPin(short_name.to_string()))
            }
        }
    }
}

impl PinChip for ChipAdapter {
    fn setup_pin(&self, short_name: &str) -> Result<Box<dyn McuPin>, PinError> {
        Ok(Box::new(self.lookup(short_name)?))
    }
}

/// Live view over one pin. Reads always reflect the pin's current state.
#[derive(Debug, Clone)]
pub struct PinAdapter {
    pin: SharedPin,
}

impl PinAdapter {
    pub fn new(pin: SharedPin) -> Self {
        Self { pin }
    }

    pub fn name(&self) -> String {
        lock_pin(&self.pin).name().to_string()
    }

    pub fn mode(&self) -> PinMode {
        lock_pin(&self.pin).mode()
    }
}

impl McuPin for PinAdapter {
    // Pull-up and invert have no electrical model here.
    fn setup_input(&mut self, _pull_up: bool, _invert: bool) {
        lock_pin(&self.pin).configure(PinMode::Input);
    }

    fn setup_output(&mut self, initial_value: i32) {
        let mut pin = lock_pin(&self.pin);
        pin.configure(PinMode::Output);
        pin.set_state(initial_value != 0);
    }

    fn read(&self) -> u8 {
        lock_pin(&self.pin).read()
    }
}
