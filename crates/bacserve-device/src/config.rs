//! Endpoint configuration.
//!
//! Everything has a default, so an empty JSON object (`{}`) is a valid
//! configuration that reproduces the stock example device.

use std::fs;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;

use bacserve_core::types::{ObjectId, ObjectType};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::network_port::DEFAULT_UDP_PORT;

pub const DEFAULT_REINITIALIZE_PASSWORD: &str = "12345";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub device: DeviceConfig,
    pub objects: ObjectCounts,
    pub network: NetworkConfig,
    /// Secret required by ReinitializeDevice.
    pub reinitialize_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            objects: ObjectCounts::default(),
            network: NetworkConfig::default(),
            reinitialize_password: DEFAULT_REINITIALIZE_PASSWORD.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.instance > ObjectId::MAX_INSTANCE {
            return Err(ConfigError::Invalid("device instance exceeds 4194303"));
        }
        if self.network.udp_port == 0 {
            return Err(ConfigError::Invalid("udp port must be non-zero"));
        }
        if self.reinitialize_password.is_empty() {
            return Err(ConfigError::Invalid("reinitialize password must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub instance: u32,
    pub name: String,
    pub description: String,
    pub vendor_identifier: u16,
    pub vendor_name: String,
    pub model_name: String,
    pub protocol_revision: u32,
    pub application_software_version: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            instance: 389001,
            name: "Device name Rainbow".to_string(),
            description: "This is the example description".to_string(),
            vendor_identifier: 389,
            vendor_name: "Chipkin Automation Systems".to_string(),
            model_name: "BACnetServerExampleCSharp".to_string(),
            protocol_revision: 16,
            application_software_version: "0.0.4".to_string(),
        }
    }
}

/// Number of instances created per object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectCounts {
    pub analog_input: u32,
    pub analog_output: u32,
    pub analog_value: u32,
    pub binary_input: u32,
    pub binary_value: u32,
    pub multi_state_input: u32,
    pub multi_state_value: u32,
    pub character_string_value: u32,
    pub positive_integer_value: u32,
    pub date_value: u32,
    pub time_value: u32,
}

impl ObjectCounts {
    pub const fn uniform(count: u32) -> Self {
        Self {
            analog_input: count,
            analog_output: count,
            analog_value: count,
            binary_input: count,
            binary_value: count,
            multi_state_input: count,
            multi_state_value: count,
            character_string_value: count,
            positive_integer_value: count,
            date_value: count,
            time_value: count,
        }
    }

    /// Configured count for a list-backed kind; zero for everything else.
    pub const fn get(&self, kind: ObjectType) -> u32 {
        match kind {
            ObjectType::AnalogInput => self.analog_input,
            ObjectType::AnalogOutput => self.analog_output,
            ObjectType::AnalogValue => self.analog_value,
            ObjectType::BinaryInput => self.binary_input,
            ObjectType::BinaryValue => self.binary_value,
            ObjectType::MultiStateInput => self.multi_state_input,
            ObjectType::MultiStateValue => self.multi_state_value,
            ObjectType::CharacterStringValue => self.character_string_value,
            ObjectType::PositiveIntegerValue => self.positive_integer_value,
            ObjectType::DateValue => self.date_value,
            ObjectType::TimeValue => self.time_value,
            _ => 0,
        }
    }
}

impl Default for ObjectCounts {
    fn default() -> Self {
        Self::uniform(3)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub udp_port: u16,
    pub ip_address: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub default_gateway: Ipv4Addr,
    pub dns_servers: Vec<Ipv4Addr>,
    /// Bits per second.
    pub link_speed: f32,
    pub bbmd: Option<BbmdConfig>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            udp_port: DEFAULT_UDP_PORT,
            ip_address: Ipv4Addr::new(192, 168, 1, 100),
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            default_gateway: Ipv4Addr::new(192, 168, 1, 1),
            dns_servers: vec![Ipv4Addr::new(8, 8, 8, 8)],
            link_speed: 100_000_000.0,
            bbmd: None,
        }
    }
}

/// Initial foreign-device registration target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbmdConfig {
    pub address: SocketAddrV4,
    #[serde(default = "default_lifetime")]
    pub lifetime_seconds: u16,
}

fn default_lifetime() -> u16 {
    300
}
