//! Pin descriptors and an in-process naming subsystem.
//!
//! A descriptor is the string a configuration entry uses to reference a pin,
//! e.g. `"^!ams:pin3"`. Leading `^` requests a pull-up and `!` inverts the
//! reading; the part before `:` names the chip and the rest is handed to
//! that chip as the short pin name.

use crate::error::NamingError;
use crate::pin_traits::{ChipFactory, McuPin, NamingSubsystem, PinChip};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Chip name used when a descriptor carries no `prefix:` part.
pub const DEFAULT_CHIP: &str = "mcu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinDescriptor {
    pub chip: String,
    pub pin: String,
    pub pull_up: bool,
    pub invert: bool,
}

impl PinDescriptor {
    pub fn parse(desc: &str) -> Result<Self, NamingError> {
        let invalid = || NamingError::InvalidDescriptor(desc.to_string());

        let mut rest = desc.trim();
        let mut pull_up = false;
        let mut invert = false;
        loop {
            if let Some(r) = rest.strip_prefix('^') {
                pull_up = true;
                rest = r.trim_start();
            } else if let Some(r) = rest.strip_prefix('!') {
                invert = true;
                rest = r.trim_start();
            } else {
                break;
            }
        }

        let (chip, pin) = match rest.split_once(':') {
            Some((chip, pin)) => (chip.trim(), pin.trim()),
            None => (DEFAULT_CHIP, rest),
        };
        let malformed = |s: &str| s.is_empty() || s.contains(char::is_whitespace) || s.contains(':');
        if malformed(chip) || malformed(pin) {
            return Err(invalid());
        }

        Ok(Self {
            chip: chip.to_string(),
            pin: pin.to_string(),
            pull_up,
            invert,
        })
    }
}

impl fmt::Display for PinDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pull_up {
            write!(f, "^")?;
        }
        if self.invert {
            write!(f, "!")?;
        }
        write!(f, "{}:{}", self.chip, self.pin)
    }
}

type SharedFactory = Arc<dyn Fn() -> Box<dyn PinChip> + Send + Sync>;

/// Prefix -> chip factory map, the host side of chip registration.
#[derive(Default)]
pub struct PinRegistry {
    chips: Mutex<BTreeMap<String, SharedFactory>>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered chip prefixes in sorted order.
    pub fn chip_names(&self) -> Vec<String> {
        let chips = self.chips.lock().unwrap_or_else(PoisonError::into_inner);
        chips.keys().cloned().collect()
    }

    /// Resolve a descriptor to a live pin handle on its chip.
    ///
    /// The caller is responsible for calling `setup_input`/`setup_output`
    /// on the returned handle; the descriptor carries the requested flags.
    pub fn setup_pin(&self, desc: &str) -> Result<(PinDescriptor, Box<dyn McuPin>), NamingError> {
        let descriptor = PinDescriptor::parse(desc)?;
        // The lock is released before the factory runs; a chip may resolve
        // pins through this registry.
        let factory = {
            let chips = self.chips.lock().unwrap_or_else(PoisonError::into_inner);
            chips
                .get(&descriptor.chip)
                .cloned()
                .ok_or_else(|| NamingError::UnknownChip(descriptor.chip.clone()))?
        };
        let chip = factory();
        let pin = chip.setup_pin(&descriptor.pin)?;
        tracing::debug!("Resolved pin {}", descriptor);
        Ok((descriptor, pin))
    }
}

impl NamingSubsystem for PinRegistry {
    fn register_chip(&self, prefix: &str, factory: ChipFactory) -> Result<(), NamingError> {
        let mut chips = self.chips.lock().unwrap_or_else(PoisonError::into_inner);
        if chips.contains_key(prefix) {
            return Err(NamingError::DuplicateChip(prefix.to_string()));
        }
        chips.insert(prefix.to_string(), Arc::from(factory));
        tracing::debug!("Registered pin chip '{}'", prefix);
        Ok(())
    }
}

impl fmt::Debug for PinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinRegistry")
            .field("chips", &self.chip_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinError;

    struct FixedPin(u8);

    impl McuPin for FixedPin {
        fn setup_input(&mut self, _pull_up: bool, _invert: bool) {}
        fn setup_output(&mut self, initial_value: i32) {
            self.0 = u8::from(initial_value != 0);
        }
        fn read(&self) -> u8 {
            self.0
        }
    }

    struct OnePinChip;

    impl PinChip for OnePinChip {
        fn setup_pin(&self, short_name: &str) -> Result<Box<dyn McuPin>, PinError> {
            match short_name {
                "p0" => Ok(Box::new(FixedPin(1))),
                other => Err(PinError::InvalidPin(other.to_string())),
            }
        }
    }

    fn one_pin_factory() -> ChipFactory {
        Box::new(|| Box::new(OnePinChip) as Box<dyn PinChip>)
    }

    #[test]
    fn test_parse_plain_descriptor() {
        let d = PinDescriptor::parse("ams:pin1").unwrap();
        assert_eq!(d.chip, "ams");
        assert_eq!(d.pin, "pin1");
        assert!(!d.pull_up);
        assert!(!d.invert);
    }

    #[test]
    fn test_parse_modifiers_any_order() {
        let a = PinDescriptor::parse("^!ams:pin2").unwrap();
        let b = PinDescriptor::parse("!^ams:pin2").unwrap();
        assert_eq!(a, b);
        assert!(a.pull_up && a.invert);
        assert_eq!(a.to_string(), "^!ams:pin2");
    }

    #[test]
    fn test_parse_defaults_to_mcu_chip() {
        let d = PinDescriptor::parse("!PA3").unwrap();
        assert_eq!(d.chip, DEFAULT_CHIP);
        assert_eq!(d.pin, "PA3");
        assert!(d.invert);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for desc in ["", "^", "ams:", ":pin1", "ams:pin 1", "a:b:c"] {
            assert!(
                matches!(PinDescriptor::parse(desc), Err(NamingError::InvalidDescriptor(_))),
                "{desc:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_registry_resolves_registered_chip() {
        let registry = PinRegistry::new();
        registry.register_chip("ext", one_pin_factory()).unwrap();
        let (desc, pin) = registry.setup_pin("^ext:p0").unwrap();
        assert!(desc.pull_up);
        assert_eq!(pin.read(), 1);
        assert_eq!(registry.chip_names(), vec!["ext".to_string()]);
    }

    #[test]
    fn test_registry_rejects_duplicate_chip() {
        let registry = PinRegistry::new();
        registry.register_chip("ext", one_pin_factory()).unwrap();
        let err = registry.register_chip("ext", one_pin_factory()).unwrap_err();
        assert!(matches!(err, NamingError::DuplicateChip(name) if name == "ext"));
    }

    /// Chip whose pins are other chips' pins, resolved through the registry.
    struct AliasChip {
        registry: Arc<PinRegistry>,
    }

    impl PinChip for AliasChip {
        fn setup_pin(&self, short_name: &str) -> Result<Box<dyn McuPin>, PinError> {
            self.registry
                .setup_pin(&format!("ext:{}", short_name))
                .map(|(_, pin)| pin)
                .map_err(|_| PinError::InvalidPin(short_name.to_string()))
        }
    }

    #[test]
    fn test_chip_can_resolve_through_registry() {
        let registry = Arc::new(PinRegistry::new());
        registry.register_chip("ext", one_pin_factory()).unwrap();
        let inner = Arc::clone(&registry);
        registry
            .register_chip(
                "alias",
                Box::new(move || {
                    Box::new(AliasChip {
                        registry: Arc::clone(&inner),
                    }) as Box<dyn PinChip>
                }),
            )
            .unwrap();

        let (desc, pin) = registry.setup_pin("alias:p0").unwrap();
        assert_eq!(desc.chip, "alias");
        assert_eq!(pin.read(), 1);
        assert!(matches!(
            registry.setup_pin("alias:p1"),
            Err(NamingError::Pin(PinError::InvalidPin(p))) if p == "p1"
        ));
    }

    #[test]
    fn test_registry_lookup_errors() {
        let registry = PinRegistry::new();
        registry.register_chip("ext", one_pin_factory()).unwrap();
        assert!(matches!(registry.setup_pin("other:p0"), Err(NamingError::UnknownChip(c)) if c == "other"));
        assert!(matches!(
            registry.setup_pin("ext:p9"),
            Err(NamingError::Pin(PinError::InvalidPin(p))) if p == "p9"
        ));
    }
}
