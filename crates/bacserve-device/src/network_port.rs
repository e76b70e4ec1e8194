//! The network-port object: IP settings plus the foreign-device target.
//!
//! Remote writes touch the UDP port and the foreign-device fields. Each
//! accepted write raises `changes_pending`; the flag stays up until a
//! reinitialize request commits it.

use std::net::{Ipv4Addr, SocketAddrV4};

use bacserve_core::types::{DataValue, PropertyId};
use log::info;

use crate::dispatch::ValueKind;
use crate::error::PropertyError;
use crate::objects::{ObjectInfo, PropertyAccess};

/// Default BACnet/IP UDP port.
pub const DEFAULT_UDP_PORT: u16 = 47808;

/// `BACnetNetworkType` value for IPv4.
pub const NETWORK_TYPE_IPV4: u32 = 5;

/// `BACnetIPMode` values.
pub const IP_MODE_NORMAL: u32 = 0;
pub const IP_MODE_FOREIGN: u32 = 1;

/// Element numbers inside `fd-bbmd-address`.
const BBMD_HOST: u32 = 1;
const BBMD_PORT: u32 = 2;

/// Host discriminator of a `BACnetHostNPort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FdHostType {
    #[default]
    None,
    IpAddress,
    Name,
}

impl FdHostType {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::None => 0,
            Self::IpAddress => 1,
            Self::Name => 2,
        }
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::IpAddress),
            2 => Some(Self::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPort {
    pub info: ObjectInfo,
    pub udp_port: u16,
    pub changes_pending: bool,
    pub ip_address: [u8; 4],
    pub subnet_mask: [u8; 4],
    pub default_gateway: [u8; 4],
    pub dns_servers: Vec<[u8; 4]>,
    /// Bits per second.
    pub link_speed: f32,
    pub fd_host_type: FdHostType,
    pub fd_host_ip: [u8; 4],
    pub fd_host_port: u16,
    /// Seconds.
    pub fd_subscription_lifetime: u16,
}

impl Default for NetworkPort {
    fn default() -> Self {
        Self {
            info: ObjectInfo::default(),
            udp_port: DEFAULT_UDP_PORT,
            changes_pending: false,
            ip_address: [0; 4],
            subnet_mask: [255, 255, 255, 0],
            default_gateway: [0; 4],
            dns_servers: Vec::new(),
            link_speed: 0.0,
            fd_host_type: FdHostType::None,
            fd_host_ip: [0; 4],
            fd_host_port: DEFAULT_UDP_PORT,
            fd_subscription_lifetime: 0,
        }
    }
}

impl NetworkPort {
    /// Commits pending configuration. Returns whether anything was pending.
    pub fn commit_pending(&mut self) -> bool {
        let was_pending = self.changes_pending;
        if was_pending {
            info!(
                "network port: committed udp {} fd-bbmd {:?} {}:{} lifetime {}s",
                self.udp_port,
                self.fd_host_type,
                Ipv4Addr::from(self.fd_host_ip),
                self.fd_host_port,
                self.fd_subscription_lifetime
            );
        }
        self.changes_pending = false;
        was_pending
    }

    /// Directed broadcast address of the local subnet.
    pub fn broadcast_address(&self) -> Ipv4Addr {
        let ip = u32::from_be_bytes(self.ip_address);
        let mask = u32::from_be_bytes(self.subnet_mask);
        Ipv4Addr::from(ip | !mask)
    }

    /// BBMD to register with, when the host is an IP address.
    pub fn foreign_device_target(&self) -> Option<SocketAddrV4> {
        match self.fd_host_type {
            FdHostType::IpAddress => Some(SocketAddrV4::new(
                Ipv4Addr::from(self.fd_host_ip),
                self.fd_host_port,
            )),
            FdHostType::None | FdHostType::Name => None,
        }
    }

    pub fn ip_mode(&self) -> u32 {
        if self.foreign_device_target().is_some() {
            IP_MODE_FOREIGN
        } else {
            IP_MODE_NORMAL
        }
    }

    fn read_bbmd(&self, index: Option<u32>, kind: ValueKind) -> Result<DataValue<'_>, PropertyError> {
        match (index, kind) {
            (Some(BBMD_HOST), ValueKind::Enumerated) => {
                Ok(DataValue::Enumerated(self.fd_host_type.to_u32()))
            }
            (Some(BBMD_HOST), ValueKind::OctetString) => Ok(DataValue::OctetString(&self.fd_host_ip)),
            (Some(BBMD_PORT), ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(u32::from(self.fd_host_port)))
            }
            (Some(BBMD_HOST | BBMD_PORT), _) | (None, _) => Err(PropertyError::UnknownProperty),
            (Some(_), _) => Err(PropertyError::InvalidArrayIndex),
        }
    }

    fn read_dns(&self, index: Option<u32>, kind: ValueKind) -> Result<DataValue<'_>, PropertyError> {
        match (index, kind) {
            (Some(0), ValueKind::Unsigned) => Ok(DataValue::Unsigned(self.dns_servers.len() as u32)),
            (Some(i), ValueKind::OctetString) if i > 0 => {
                let server = usize::try_from(i - 1)
                    .ok()
                    .and_then(|i| self.dns_servers.get(i))
                    .ok_or(PropertyError::InvalidArrayIndex)?;
                Ok(DataValue::OctetString(server))
            }
            _ => Err(PropertyError::UnknownProperty),
        }
    }

    fn write_bbmd(&mut self, index: Option<u32>, value: &DataValue<'_>) -> Result<(), PropertyError> {
        match (index, value) {
            (Some(BBMD_HOST), DataValue::Enumerated(v)) => {
                self.fd_host_type = FdHostType::from_u32(*v).ok_or(PropertyError::ValueOutOfRange)?;
            }
            (Some(BBMD_HOST), DataValue::OctetString(bytes)) => {
                self.fd_host_ip = <[u8; 4]>::try_from(*bytes)
                    .map_err(|_| PropertyError::ValueOutOfRange)?;
            }
            (Some(BBMD_PORT), DataValue::Unsigned(v)) => {
                self.fd_host_port = u16::try_from(*v).map_err(|_| PropertyError::ValueOutOfRange)?;
            }
            (Some(BBMD_HOST | BBMD_PORT), _) => return Err(PropertyError::InvalidDataType),
            (Some(_), _) => return Err(PropertyError::InvalidArrayIndex),
            (None, _) => return Err(PropertyError::UnknownProperty),
        }
        Ok(())
    }
}

impl PropertyAccess for NetworkPort {
    fn properties(&self) -> &'static [PropertyId] {
        &[
            PropertyId::ObjectName,
            PropertyId::Description,
            PropertyId::BacnetIpUdpPort,
            PropertyId::ChangesPending,
            PropertyId::FdBbmdAddress,
            PropertyId::FdSubscriptionLifetime,
            PropertyId::LinkSpeed,
            PropertyId::IpAddress,
            PropertyId::IpSubnetMask,
            PropertyId::IpDefaultGateway,
            PropertyId::IpDnsServer,
            PropertyId::NetworkType,
            PropertyId::BacnetIpMode,
        ]
    }

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        match property {
            PropertyId::FdBbmdAddress => return self.read_bbmd(index, kind),
            PropertyId::IpDnsServer => return self.read_dns(index, kind),
            _ if index.is_some() => return Err(PropertyError::UnknownProperty),
            _ => {}
        }
        match (property, kind) {
            (PropertyId::BacnetIpUdpPort, ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(u32::from(self.udp_port)))
            }
            (PropertyId::ChangesPending, ValueKind::Boolean) => {
                Ok(DataValue::Boolean(self.changes_pending))
            }
            (PropertyId::FdSubscriptionLifetime, ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(u32::from(self.fd_subscription_lifetime)))
            }
            (PropertyId::LinkSpeed, ValueKind::Real) => Ok(DataValue::Real(self.link_speed)),
            (PropertyId::IpAddress, ValueKind::OctetString) => {
                Ok(DataValue::OctetString(&self.ip_address))
            }
            (PropertyId::IpSubnetMask, ValueKind::OctetString) => {
                Ok(DataValue::OctetString(&self.subnet_mask))
            }
            (PropertyId::IpDefaultGateway, ValueKind::OctetString) => {
                Ok(DataValue::OctetString(&self.default_gateway))
            }
            (PropertyId::NetworkType, ValueKind::Enumerated) => {
                Ok(DataValue::Enumerated(NETWORK_TYPE_IPV4))
            }
            (PropertyId::BacnetIpMode, ValueKind::Enumerated) => {
                Ok(DataValue::Enumerated(self.ip_mode()))
            }
            _ => self.info.read(property, kind),
        }
    }

    fn write(
        &mut self,
        property: PropertyId,
        index: Option<u32>,
        value: &DataValue<'_>,
        _priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        match property {
            PropertyId::FdBbmdAddress => self.write_bbmd(index, value)?,
            PropertyId::BacnetIpUdpPort => {
                if index.is_some() {
                    return Err(PropertyError::UnknownProperty);
                }
                let DataValue::Unsigned(v) = value else {
                    return Err(PropertyError::InvalidDataType);
                };
                self.udp_port = u16::try_from(*v)
                    .ok()
                    .filter(|port| *port != 0)
                    .ok_or(PropertyError::ValueOutOfRange)?;
            }
            PropertyId::FdSubscriptionLifetime => {
                if index.is_some() {
                    return Err(PropertyError::UnknownProperty);
                }
                let DataValue::Unsigned(v) = value else {
                    return Err(PropertyError::InvalidDataType);
                };
                self.fd_subscription_lifetime =
                    u16::try_from(*v).map_err(|_| PropertyError::ValueOutOfRange)?;
            }
            _ => return Err(self.deny_write(property)),
        }
        self.changes_pending = true;
        Ok(())
    }
}
