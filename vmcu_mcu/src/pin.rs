use crate::error::McuError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of pins every virtual MCU exposes.
pub const PIN_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinMode {
    #[default]
    Input,
    Output,
}

impl PinMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinMode::Input => "input",
            PinMode::Output => "output",
        }
    }
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PinMode {
    type Err = McuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(PinMode::Input),
            "output" => Ok(PinMode::Output),
            _ => Err(McuError::UnknownMode(s.to_string())),
        }
    }
}

/// A named digital line.
#[derive(Debug, Clone)]
pub struct Pin {
    name: String,
    mode: PinMode,
    state: bool,
}

impl Pin {
    pub fn new(name: String) -> Self {
        Pin {
            name,
            mode: PinMode::Input,
            state: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn configure(&mut self, mode: PinMode) {
        self.mode = mode;
    }

    /// Current level as 0 or 1.
    pub fn read(&self) -> u8 {
        u8::from(self.state)
    }

    pub fn set_state(&mut self, value: bool) {
        self.state = value;
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.mode, self.read())
    }
}

/// A pin shared between its MCU and any adapters handed to the host.
pub type SharedPin = Arc<Mutex<Pin>>;

/// Lock a shared pin. A pin holds no invariant a panicking writer could
/// break, so a poisoned lock is recovered rather than propagated.
pub(crate) fn lock_pin(pin: &SharedPin) -> MutexGuard<'_, Pin> {
    pin.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Serializable view of one pin for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinStatus {
    pub name: String,
    pub mode: PinMode,
    pub state: u8,
}

/// Short key (`pin1`..`pin8`) to pin, in creation order. Fixed after construction.
#[derive(Debug)]
pub struct PinTable {
    entries: Vec<(String, SharedPin)>,
}

impl PinTable {
    pub fn new(prefix: &str) -> Self {
        let entries = (1..=PIN_COUNT)
            .map(|i| {
                let key = format!("pin{}", i);
                let pin = Pin::new(format!("{}:{}", prefix, key));
                (key, Arc::new(Mutex::new(pin)))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&SharedPin> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, pin)| pin)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn pins(&self) -> impl Iterator<Item = &SharedPin> {
        self.entries.iter().map(|(_, pin)| pin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_creation() {
        let pin = Pin::new("ams:pin1".to_string());
        assert_eq!(pin.name(), "ams:pin1");
        assert_eq!(pin.mode(), PinMode::Input);
        assert_eq!(pin.read(), 0);
    }

    #[test]
    fn test_mode_and_state_are_independent() {
        let mut pin = Pin::new("TEST".to_string());
        pin.set_state(true);
        pin.configure(PinMode::Output);
        assert_eq!(pin.read(), 1);
        pin.configure(PinMode::Input);
        assert_eq!(pin.read(), 1);
        pin.set_state(false);
        assert_eq!(pin.mode(), PinMode::Input);
        assert_eq!(pin.read(), 0);
    }

    #[test]
    fn test_pin_mode_parsing() {
        assert_eq!("input".parse::<PinMode>().unwrap(), PinMode::Input);
        assert_eq!("OUTPUT".parse::<PinMode>().unwrap(), PinMode::Output);
        assert!(matches!("analog".parse::<PinMode>(), Err(McuError::UnknownMode(m)) if m == "analog"));
        assert_eq!(PinMode::Output.to_string(), "output");
    }

    #[test]
    fn test_table_layout() {
        let table = PinTable::new("box");
        assert_eq!(table.len(), PIN_COUNT);
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, ["pin1", "pin2", "pin3", "pin4", "pin5", "pin6", "pin7", "pin8"]);
        let pin = table.get("pin8").unwrap();
        assert_eq!(lock_pin(pin).name(), "box:pin8");
        assert!(table.get("pin0").is_none());
        assert!(table.get("box:pin1").is_none());
    }

    #[test]
    fn test_pin_display() {
        let mut pin = Pin::new("ams:pin4".to_string());
        pin.set_state(true);
        assert_eq!(pin.to_string(), "ams:pin4: input 1");
    }
}
