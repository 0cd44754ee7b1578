//! Host-side glue: build the virtual MCU from configuration, register it with
//! the pin registry, and resolve the configuration sections that use its pins.

use crate::config::{Config, ConfigError, SensorKind};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use vmcu_mcu::{McuError, PinStatus, VirtualMcu};
use vmcu_shared::{McuPin, NamingError, NamingSubsystem, PinDescriptor, PinRegistry};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Pin lookup error: {0}")]
    Naming(#[from] NamingError),
    #[error("MCU error: {0}")]
    Mcu(#[from] McuError),
}

struct ConfiguredSensor {
    name: String,
    kind: SensorKind,
    descriptor: PinDescriptor,
    pin: Box<dyn McuPin>,
}

/// Reading of one configured sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorState {
    pub name: String,
    pub kind: SensorKind,
    pub pin: String,
    pub level: u8,
    pub triggered: bool,
}

pub struct VmcuHost {
    registry: Arc<PinRegistry>,
    mcu: Option<VirtualMcu>,
    sensors: Vec<ConfiguredSensor>,
}

impl VmcuHost {
    pub fn from_config(config: &Config) -> Result<Self, HostError> {
        config.validate()?;
        let registry = Arc::new(PinRegistry::new());

        let mcu = match &config.input_pins {
            Some(input_pins) => {
                let naming: Arc<dyn NamingSubsystem> = registry.clone();
                let mut mcu = VirtualMcu::new(&input_pins.prefix, Some(naming));
                mcu.register_chip()?;
                Some(mcu)
            }
            None => {
                tracing::info!("No [input_pins] section, virtual MCU not created");
                None
            }
        };

        let mut sensors = Vec::with_capacity(config.sensors.len());
        for (name, sensor) in &config.sensors {
            let (descriptor, mut pin) = registry.setup_pin(&sensor.pin)?;
            pin.setup_input(descriptor.pull_up, descriptor.invert);
            tracing::debug!("Sensor '{}' ({:?}) on {}", name, sensor.kind, descriptor);
            sensors.push(ConfiguredSensor {
                name: name.clone(),
                kind: sensor.kind,
                descriptor,
                pin,
            });
        }

        for (name, output) in &config.outputs {
            let (descriptor, mut pin) = registry.setup_pin(&output.pin)?;
            pin.setup_output(output.value);
            tracing::debug!("Output '{}' on {} = {}", name, descriptor, output.value);
        }

        Ok(Self {
            registry,
            mcu,
            sensors,
        })
    }

    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    pub fn mcu(&self) -> Option<&VirtualMcu> {
        self.mcu.as_ref()
    }

    /// Sensors in name order. `triggered` applies the descriptor's invert flag.
    pub fn sensor_states(&self) -> Vec<SensorState> {
        self.sensors
            .iter()
            .map(|sensor| {
                let level = sensor.pin.read();
                SensorState {
                    name: sensor.name.clone(),
                    kind: sensor.kind,
                    pin: sensor.descriptor.to_string(),
                    level,
                    triggered: (level != 0) != sensor.descriptor.invert,
                }
            })
            .collect()
    }

    pub fn pin_report(&self) -> Vec<PinStatus> {
        self.mcu.as_ref().map(VirtualMcu::snapshot).unwrap_or_default()
    }
}
