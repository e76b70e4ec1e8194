//! In-memory object database.
//!
//! The catalog owns every record. Lists are sized once at setup and never
//! grow; each kind is bounds-checked against its own length.

use bacserve_core::types::{Date, ObjectId, ObjectType, Time};
use log::debug;

use crate::config::ServerConfig;
use crate::names::NameAllocator;
use crate::network_port::{FdHostType, NetworkPort};
use crate::objects::{
    AnalogOutput, AnalogPoint, BinaryPoint, CharacterStringValue, DateValue, DeviceObject,
    MultiStatePoint, ObjectInfo, PositiveIntegerValue, PropertyAccess, TimeValue,
    COMPASS_STATE_TEXT,
};

/// List-backed kinds in setup and registration order.
pub const LIST_KINDS: [ObjectType; 11] = [
    ObjectType::AnalogInput,
    ObjectType::AnalogOutput,
    ObjectType::AnalogValue,
    ObjectType::BinaryInput,
    ObjectType::BinaryValue,
    ObjectType::MultiStateInput,
    ObjectType::MultiStateValue,
    ObjectType::CharacterStringValue,
    ObjectType::PositiveIntegerValue,
    ObjectType::DateValue,
    ObjectType::TimeValue,
];

/// Instance number of the single network-port object.
pub const NETWORK_PORT_INSTANCE: u32 = 0;

/// Borrowed record, tagged by capability.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    Device(&'a DeviceObject),
    Analog(&'a AnalogPoint),
    AnalogOutput(&'a AnalogOutput),
    Binary(&'a BinaryPoint),
    MultiState(&'a MultiStatePoint),
    CharacterString(&'a CharacterStringValue),
    PositiveInteger(&'a PositiveIntegerValue),
    Date(&'a DateValue),
    Time(&'a TimeValue),
    NetworkPort(&'a NetworkPort),
}

impl<'a> ObjectRef<'a> {
    pub fn access(self) -> &'a dyn PropertyAccess {
        match self {
            Self::Device(o) => o,
            Self::Analog(o) => o,
            Self::AnalogOutput(o) => o,
            Self::Binary(o) => o,
            Self::MultiState(o) => o,
            Self::CharacterString(o) => o,
            Self::PositiveInteger(o) => o,
            Self::Date(o) => o,
            Self::Time(o) => o,
            Self::NetworkPort(o) => o,
        }
    }
}

/// Mutably borrowed record, tagged by capability.
#[derive(Debug)]
pub enum ObjectMut<'a> {
    Device(&'a mut DeviceObject),
    Analog(&'a mut AnalogPoint),
    AnalogOutput(&'a mut AnalogOutput),
    Binary(&'a mut BinaryPoint),
    MultiState(&'a mut MultiStatePoint),
    CharacterString(&'a mut CharacterStringValue),
    PositiveInteger(&'a mut PositiveIntegerValue),
    Date(&'a mut DateValue),
    Time(&'a mut TimeValue),
    NetworkPort(&'a mut NetworkPort),
}

impl<'a> ObjectMut<'a> {
    pub fn access(self) -> &'a mut dyn PropertyAccess {
        match self {
            Self::Device(o) => o,
            Self::Analog(o) => o,
            Self::AnalogOutput(o) => o,
            Self::Binary(o) => o,
            Self::MultiState(o) => o,
            Self::CharacterString(o) => o,
            Self::PositiveInteger(o) => o,
            Self::Date(o) => o,
            Self::Time(o) => o,
            Self::NetworkPort(o) => o,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    device: DeviceObject,
    analog_inputs: Box<[AnalogPoint]>,
    analog_outputs: Box<[AnalogOutput]>,
    analog_values: Box<[AnalogPoint]>,
    binary_inputs: Box<[BinaryPoint]>,
    binary_values: Box<[BinaryPoint]>,
    multi_state_inputs: Box<[MultiStatePoint]>,
    multi_state_values: Box<[MultiStatePoint]>,
    character_string_values: Box<[CharacterStringValue]>,
    positive_integer_values: Box<[PositiveIntegerValue]>,
    date_values: Box<[DateValue]>,
    time_values: Box<[TimeValue]>,
    network_port: NetworkPort,
}

fn build<T>(count: u32, mut make: impl FnMut(u32) -> T) -> Box<[T]> {
    (0..count).map(&mut make).collect()
}

fn analog_seed(offset: u32) -> f32 {
    offset as f32 * 100.0 + offset as f32 * 0.1
}

impl Catalog {
    /// Builds every record with its deterministic starting value.
    ///
    /// Names are drawn from `names` in kind order, so two catalogs built from
    /// fresh allocators with the same configuration are identical.
    pub fn setup(config: &ServerConfig, names: &mut NameAllocator) -> Self {
        let counts = &config.objects;
        let device = DeviceObject {
            instance: config.device.instance,
            info: ObjectInfo::new(&config.device.name, &config.device.description),
            model_name: config.device.model_name.clone(),
            vendor_name: config.device.vendor_name.clone(),
            vendor_identifier: config.device.vendor_identifier,
            protocol_revision: config.device.protocol_revision,
            application_software_version: config.device.application_software_version.clone(),
        };

        let mut name = |kind: ObjectType| names.next_name(kind.label());
        let analog_inputs = build(counts.analog_input, |offset| {
            let info = ObjectInfo::new(name(ObjectType::AnalogInput), "Example description");
            AnalogPoint::new(info, analog_seed(offset), false)
        });
        let analog_outputs = build(counts.analog_output, |offset| {
            let info = ObjectInfo::new(name(ObjectType::AnalogOutput), "");
            AnalogOutput::new(info, offset as f32 * 1.1)
        });
        let analog_values = build(counts.analog_value, |offset| {
            let info = ObjectInfo::new(name(ObjectType::AnalogValue), "");
            AnalogPoint::new(info, analog_seed(offset), true)
        });
        let binary_inputs = build(counts.binary_input, |_| BinaryPoint {
            info: ObjectInfo::new(name(ObjectType::BinaryInput), ""),
            present_value: false,
            writable: false,
        });
        let binary_values = build(counts.binary_value, |_| BinaryPoint {
            info: ObjectInfo::new(name(ObjectType::BinaryValue), ""),
            present_value: false,
            writable: true,
        });
        let compass_states = COMPASS_STATE_TEXT.len() as u32;
        let multi_state_inputs = build(counts.multi_state_input, |offset| {
            let info = ObjectInfo::new(name(ObjectType::MultiStateInput), "");
            MultiStatePoint::compass(info, offset % compass_states, false)
        });
        let multi_state_values = build(counts.multi_state_value, |offset| {
            let info = ObjectInfo::new(name(ObjectType::MultiStateValue), "");
            MultiStatePoint::compass(info, offset % compass_states, true)
        });
        let character_string_values = build(counts.character_string_value, |_| {
            CharacterStringValue {
                info: ObjectInfo::new(name(ObjectType::CharacterStringValue), ""),
                present_value: "Value of the CharacterString object".to_string(),
            }
        });
        let positive_integer_values = build(counts.positive_integer_value, |offset| {
            PositiveIntegerValue {
                info: ObjectInfo::new(name(ObjectType::PositiveIntegerValue), ""),
                present_value: offset * 1000,
            }
        });
        let date_values = build(counts.date_value, |_| DateValue {
            info: ObjectInfo::new(name(ObjectType::DateValue), ""),
            present_value: Date::new(2019, 6, 7, 5),
        });
        let time_values = build(counts.time_value, |_| TimeValue {
            info: ObjectInfo::new(name(ObjectType::TimeValue), ""),
            present_value: Time::new(15, 13, 55, 0),
        });

        let network = &config.network;
        let mut network_port = NetworkPort {
            info: ObjectInfo::new(name(ObjectType::NetworkPort), ""),
            udp_port: network.udp_port,
            ip_address: network.ip_address.octets(),
            subnet_mask: network.subnet_mask.octets(),
            default_gateway: network.default_gateway.octets(),
            dns_servers: network.dns_servers.iter().map(|ip| ip.octets()).collect(),
            link_speed: network.link_speed,
            ..NetworkPort::default()
        };
        if let Some(bbmd) = network.bbmd {
            network_port.fd_host_type = FdHostType::IpAddress;
            network_port.fd_host_ip = bbmd.address.ip().octets();
            network_port.fd_host_port = bbmd.address.port();
            network_port.fd_subscription_lifetime = bbmd.lifetime_seconds;
        }

        debug!(
            "catalog: device {} with {} names allocated",
            device.instance,
            names.allocated()
        );

        Self {
            device,
            analog_inputs,
            analog_outputs,
            analog_values,
            binary_inputs,
            binary_values,
            multi_state_inputs,
            multi_state_values,
            character_string_values,
            positive_integer_values,
            date_values,
            time_values,
            network_port,
        }
    }

    pub fn device(&self) -> &DeviceObject {
        &self.device
    }

    pub fn device_instance(&self) -> u32 {
        self.device.instance
    }

    pub fn network_port(&self) -> &NetworkPort {
        &self.network_port
    }

    pub fn network_port_mut(&mut self) -> &mut NetworkPort {
        &mut self.network_port
    }

    pub fn analog_input_mut(&mut self, instance: u32) -> Option<&mut AnalogPoint> {
        self.analog_inputs.get_mut(usize::try_from(instance).ok()?)
    }

    pub fn analog_output(&self, instance: u32) -> Option<&AnalogOutput> {
        self.analog_outputs.get(usize::try_from(instance).ok()?)
    }

    /// Number of instances of `kind`. Unsupported kinds have none.
    pub fn count(&self, kind: ObjectType) -> u32 {
        let len = match kind {
            ObjectType::Device | ObjectType::NetworkPort => 1,
            ObjectType::AnalogInput => self.analog_inputs.len(),
            ObjectType::AnalogOutput => self.analog_outputs.len(),
            ObjectType::AnalogValue => self.analog_values.len(),
            ObjectType::BinaryInput => self.binary_inputs.len(),
            ObjectType::BinaryValue => self.binary_values.len(),
            ObjectType::MultiStateInput => self.multi_state_inputs.len(),
            ObjectType::MultiStateValue => self.multi_state_values.len(),
            ObjectType::CharacterStringValue => self.character_string_values.len(),
            ObjectType::PositiveIntegerValue => self.positive_integer_values.len(),
            ObjectType::DateValue => self.date_values.len(),
            ObjectType::TimeValue => self.time_values.len(),
            _ => 0,
        };
        len as u32
    }

    pub fn get(&self, kind: ObjectType, instance: u32) -> Option<ObjectRef<'_>> {
        let i = usize::try_from(instance).ok()?;
        Some(match kind {
            ObjectType::Device if instance == self.device.instance => {
                ObjectRef::Device(&self.device)
            }
            ObjectType::NetworkPort if instance == NETWORK_PORT_INSTANCE => {
                ObjectRef::NetworkPort(&self.network_port)
            }
            ObjectType::AnalogInput => ObjectRef::Analog(self.analog_inputs.get(i)?),
            ObjectType::AnalogOutput => ObjectRef::AnalogOutput(self.analog_outputs.get(i)?),
            ObjectType::AnalogValue => ObjectRef::Analog(self.analog_values.get(i)?),
            ObjectType::BinaryInput => ObjectRef::Binary(self.binary_inputs.get(i)?),
            ObjectType::BinaryValue => ObjectRef::Binary(self.binary_values.get(i)?),
            ObjectType::MultiStateInput => ObjectRef::MultiState(self.multi_state_inputs.get(i)?),
            ObjectType::MultiStateValue => ObjectRef::MultiState(self.multi_state_values.get(i)?),
            ObjectType::CharacterStringValue => {
                ObjectRef::CharacterString(self.character_string_values.get(i)?)
            }
            ObjectType::PositiveIntegerValue => {
                ObjectRef::PositiveInteger(self.positive_integer_values.get(i)?)
            }
            ObjectType::DateValue => ObjectRef::Date(self.date_values.get(i)?),
            ObjectType::TimeValue => ObjectRef::Time(self.time_values.get(i)?),
            _ => return None,
        })
    }

    pub fn get_mut(&mut self, kind: ObjectType, instance: u32) -> Option<ObjectMut<'_>> {
        let i = usize::try_from(instance).ok()?;
        Some(match kind {
            ObjectType::Device if instance == self.device.instance => {
                ObjectMut::Device(&mut self.device)
            }
            ObjectType::NetworkPort if instance == NETWORK_PORT_INSTANCE => {
                ObjectMut::NetworkPort(&mut self.network_port)
            }
            ObjectType::AnalogInput => ObjectMut::Analog(self.analog_inputs.get_mut(i)?),
            ObjectType::AnalogOutput => ObjectMut::AnalogOutput(self.analog_outputs.get_mut(i)?),
            ObjectType::AnalogValue => ObjectMut::Analog(self.analog_values.get_mut(i)?),
            ObjectType::BinaryInput => ObjectMut::Binary(self.binary_inputs.get_mut(i)?),
            ObjectType::BinaryValue => ObjectMut::Binary(self.binary_values.get_mut(i)?),
            ObjectType::MultiStateInput => {
                ObjectMut::MultiState(self.multi_state_inputs.get_mut(i)?)
            }
            ObjectType::MultiStateValue => {
                ObjectMut::MultiState(self.multi_state_values.get_mut(i)?)
            }
            ObjectType::CharacterStringValue => {
                ObjectMut::CharacterString(self.character_string_values.get_mut(i)?)
            }
            ObjectType::PositiveIntegerValue => {
                ObjectMut::PositiveInteger(self.positive_integer_values.get_mut(i)?)
            }
            ObjectType::DateValue => ObjectMut::Date(self.date_values.get_mut(i)?),
            ObjectType::TimeValue => ObjectMut::Time(self.time_values.get_mut(i)?),
            _ => return None,
        })
    }

    /// Every hosted object except the device, in registration order.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        LIST_KINDS
            .iter()
            .flat_map(|&kind| (0..self.count(kind)).map(move |i| ObjectId::new(kind, i)))
            .chain(std::iter::once(ObjectId::new(
                ObjectType::NetworkPort,
                NETWORK_PORT_INSTANCE,
            )))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectCounts;

    fn catalog() -> Catalog {
        Catalog::setup(&ServerConfig::default(), &mut NameAllocator::new())
    }

    #[test]
    fn each_kind_is_bounded_by_its_own_count() {
        let config = ServerConfig {
            objects: ObjectCounts {
                positive_integer_value: 5,
                character_string_value: 1,
                ..ObjectCounts::default()
            },
            ..ServerConfig::default()
        };
        let catalog = Catalog::setup(&config, &mut NameAllocator::new());
        for kind in LIST_KINDS {
            let count = catalog.count(kind);
            assert!(catalog.get(kind, count - 1).is_some(), "{kind:?}");
            assert!(catalog.get(kind, count).is_none(), "{kind:?}");
        }
        assert_eq!(catalog.count(ObjectType::PositiveIntegerValue), 5);
        assert!(catalog.get(ObjectType::PositiveIntegerValue, 4).is_some());
    }

    #[test]
    fn singletons_are_addressed_by_fixed_instances() {
        let catalog = catalog();
        assert!(catalog.get(ObjectType::Device, 389001).is_some());
        assert!(catalog.get(ObjectType::Device, 0).is_none());
        assert!(catalog.get(ObjectType::NetworkPort, 0).is_some());
        assert!(catalog.get(ObjectType::NetworkPort, 1).is_none());
        assert!(catalog.get(ObjectType::BinaryOutput, 0).is_none());
        assert_eq!(catalog.count(ObjectType::Other(300)), 0);
    }

    #[test]
    fn setup_values_are_deterministic() {
        let catalog = catalog();
        let ObjectRef::Analog(ai) = catalog.get(ObjectType::AnalogInput, 2).unwrap() else {
            panic!("analog input expected");
        };
        assert!((ai.present_value - 200.2).abs() < 1e-3);
        assert_eq!(ai.info.name, "AnalogInput Chartreuse");

        let ao = catalog.analog_output(2).unwrap();
        assert!((ao.relinquish_default - 2.2).abs() < 1e-6);
        assert_eq!(ao.present_value(), ao.relinquish_default);
        assert_eq!(ao.info.name, "AnalogOutput Fuchsia");

        let ObjectRef::MultiState(msi) = catalog.get(ObjectType::MultiStateInput, 1).unwrap() else {
            panic!("multi-state input expected");
        };
        assert_eq!(msi.present_value, 1);

        let ObjectRef::PositiveInteger(piv) =
            catalog.get(ObjectType::PositiveIntegerValue, 2).unwrap()
        else {
            panic!("positive integer value expected");
        };
        assert_eq!(piv.present_value, 2000);
    }

    #[test]
    fn names_are_unique_across_kinds() {
        let catalog = catalog();
        let mut names: Vec<String> = catalog
            .object_ids()
            .into_iter()
            .map(|id| {
                let object = catalog.get(id.object_type(), id.instance()).unwrap();
                match object {
                    ObjectRef::Analog(o) => o.info.name.clone(),
                    ObjectRef::AnalogOutput(o) => o.info.name.clone(),
                    ObjectRef::Binary(o) => o.info.name.clone(),
                    ObjectRef::MultiState(o) => o.info.name.clone(),
                    ObjectRef::CharacterString(o) => o.info.name.clone(),
                    ObjectRef::PositiveInteger(o) => o.info.name.clone(),
                    ObjectRef::Date(o) => o.info.name.clone(),
                    ObjectRef::Time(o) => o.info.name.clone(),
                    ObjectRef::NetworkPort(o) => o.info.name.clone(),
                    ObjectRef::Device(o) => o.info.name.clone(),
                }
            })
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 34);
    }

    #[test]
    fn configured_bbmd_seeds_the_network_port() {
        let mut config = ServerConfig::default();
        config.network.bbmd = Some(crate::config::BbmdConfig {
            address: "10.0.0.9:47809".parse().unwrap(),
            lifetime_seconds: 120,
        });
        let catalog = Catalog::setup(&config, &mut NameAllocator::new());
        let port = catalog.network_port();
        assert_eq!(port.fd_host_type, FdHostType::IpAddress);
        assert_eq!(port.fd_host_ip, [10, 0, 0, 9]);
        assert_eq!(port.fd_host_port, 47809);
        assert_eq!(port.fd_subscription_lifetime, 120);
        assert!(!port.changes_pending);
    }
}
