use crate::adapter::ChipAdapter;
use crate::error::McuError;
use crate::pin::{lock_pin, PinMode, PinStatus, PinTable, SharedPin, PIN_COUNT};
use std::fmt;
use std::sync::Arc;
use vmcu_shared::{NamingSubsystem, PinChip};

pub const DEFAULT_PREFIX: &str = "ams";

/// A virtual MCU with a fixed table of eight pins.
///
/// Pins are keyed by their short name (`pin1`..`pin8`). Adapters handed to
/// the host share the same pins, so state changes made here are visible
/// through them and vice versa.
///
/// Access is expected to be serialized by the host; the per-pin locks only
/// make the shared views sound, they do not order concurrent writers.
pub struct VirtualMcu {
    prefix: String,
    pins: Arc<PinTable>,
    registered: bool,
    naming: Option<Arc<dyn NamingSubsystem>>,
}

impl VirtualMcu {
    /// Create the MCU; `naming` is the host's pin-naming subsystem, or
    /// `None` when running without a host.
    pub fn new(prefix: &str, naming: Option<Arc<dyn NamingSubsystem>>) -> Self {
        tracing::debug!("Creating virtual MCU '{}' with {} pins", prefix, PIN_COUNT);
        Self {
            prefix: prefix.to_string(),
            pins: Arc::new(PinTable::new(prefix)),
            registered: false,
            naming,
        }
    }

    pub fn standalone(prefix: &str) -> Self {
        Self::new(prefix, None)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    fn pin(&self, key: &str) -> Result<&SharedPin, McuError> {
        self.pins
            .get(key)
            .ok_or_else(|| McuError::UnknownPin(key.to_string()))
    }

    pub fn read_pin(&self, key: &str) -> Result<u8, McuError> {
        Ok(lock_pin(self.pin(key)?).read())
    }

    pub fn set_pin(&self, key: &str, value: bool) -> Result<(), McuError> {
        lock_pin(self.pin(key)?).set_state(value);
        Ok(())
    }

    pub fn configure_pin(&self, key: &str, mode: PinMode) -> Result<(), McuError> {
        lock_pin(self.pin(key)?).configure(mode);
        Ok(())
    }

    pub fn pin_mode(&self, key: &str) -> Result<PinMode, McuError> {
        Ok(lock_pin(self.pin(key)?).mode())
    }

    /// Fully-qualified pin names in creation order.
    pub fn list_pins(&self) -> Vec<String> {
        self.pins
            .pins()
            .map(|pin| lock_pin(pin).name().to_string())
            .collect()
    }

    pub fn snapshot(&self) -> Vec<PinStatus> {
        self.pins
            .pins()
            .map(|pin| {
                let pin = lock_pin(pin);
                PinStatus {
                    name: pin.name().to_string(),
                    mode: pin.mode(),
                    state: pin.read(),
                }
            })
            .collect()
    }

    /// A chip bound to this MCU's pins.
    pub fn chip(&self) -> ChipAdapter {
        ChipAdapter::new(Arc::clone(&self.pins))
    }

    /// Register this MCU's chip factory under its prefix. Idempotent.
    ///
    /// Without a naming subsystem this is a no-op and the MCU stays
    /// unregistered. A refusal from the subsystem is returned and leaves the
    /// MCU unregistered.
    pub fn register_chip(&mut self) -> Result<(), McuError> {
        if self.registered {
            tracing::debug!("Virtual MCU '{}' already registered", self.prefix);
            return Ok(());
        }
        let Some(naming) = &self.naming else {
            tracing::debug!(
                "No pin naming subsystem available, skipping registration of '{}'",
                self.prefix
            );
            return Ok(());
        };

        let pins = Arc::clone(&self.pins);
        naming.register_chip(
            &self.prefix,
            Box::new(move || Box::new(ChipAdapter::new(Arc::clone(&pins))) as Box<dyn PinChip>),
        )?;
        self.registered = true;
        tracing::info!(
            "Registered virtual MCU '{}' with pins {}:pin1..{}:pin{}",
            self.prefix,
            self.prefix,
            self.prefix,
            PIN_COUNT
        );
        Ok(())
    }
}

impl Default for VirtualMcu {
    fn default() -> Self {
        Self::standalone(DEFAULT_PREFIX)
    }
}

impl fmt::Debug for VirtualMcu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualMcu")
            .field("prefix", &self.prefix)
            .field("pins", &self.pins)
            .field("registered", &self.registered)
            .field("has_naming", &self.naming.is_some())
            .finish()
    }
}
