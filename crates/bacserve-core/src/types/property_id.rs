/// BACnet property identifiers.
///
/// Properties the device endpoint can answer for are named variants; every
/// other identifier the engine probes is carried as
/// [`Proprietary`](Self::Proprietary) and ends up rejected as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyId {
    ApplicationSoftwareVersion,
    Description,
    ModelName,
    NumberOfStates,
    ObjectIdentifier,
    ObjectName,
    ObjectType,
    OutOfService,
    PresentValue,
    PriorityArray,
    RelinquishDefault,
    StateText,
    StatusFlags,
    Units,
    VendorIdentifier,
    VendorName,
    ProtocolRevision,
    IpAddress,
    IpDefaultGateway,
    IpDnsServer,
    BacnetIpMode,
    IpSubnetMask,
    BacnetIpUdpPort,
    ChangesPending,
    FdBbmdAddress,
    FdSubscriptionLifetime,
    LinkSpeed,
    NetworkType,
    Proprietary(u32),
}

impl PropertyId {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::ApplicationSoftwareVersion => 12,
            Self::Description => 28,
            Self::ModelName => 70,
            Self::NumberOfStates => 74,
            Self::ObjectIdentifier => 75,
            Self::ObjectName => 77,
            Self::ObjectType => 79,
            Self::OutOfService => 81,
            Self::PresentValue => 85,
            Self::PriorityArray => 87,
            Self::RelinquishDefault => 104,
            Self::StateText => 110,
            Self::StatusFlags => 111,
            Self::Units => 117,
            Self::VendorIdentifier => 120,
            Self::VendorName => 121,
            Self::ProtocolRevision => 139,
            Self::IpAddress => 400,
            Self::IpDefaultGateway => 401,
            Self::IpDnsServer => 406,
            Self::BacnetIpMode => 408,
            Self::IpSubnetMask => 411,
            Self::BacnetIpUdpPort => 412,
            Self::ChangesPending => 416,
            Self::FdBbmdAddress => 418,
            Self::FdSubscriptionLifetime => 419,
            Self::LinkSpeed => 420,
            Self::NetworkType => 427,
            Self::Proprietary(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            12 => Self::ApplicationSoftwareVersion,
            28 => Self::Description,
            70 => Self::ModelName,
            74 => Self::NumberOfStates,
            75 => Self::ObjectIdentifier,
            77 => Self::ObjectName,
            79 => Self::ObjectType,
            81 => Self::OutOfService,
            85 => Self::PresentValue,
            87 => Self::PriorityArray,
            104 => Self::RelinquishDefault,
            110 => Self::StateText,
            111 => Self::StatusFlags,
            117 => Self::Units,
            120 => Self::VendorIdentifier,
            121 => Self::VendorName,
            139 => Self::ProtocolRevision,
            400 => Self::IpAddress,
            401 => Self::IpDefaultGateway,
            406 => Self::IpDnsServer,
            408 => Self::BacnetIpMode,
            411 => Self::IpSubnetMask,
            412 => Self::BacnetIpUdpPort,
            416 => Self::ChangesPending,
            418 => Self::FdBbmdAddress,
            419 => Self::FdSubscriptionLifetime,
            420 => Self::LinkSpeed,
            427 => Self::NetworkType,
            v => Self::Proprietary(v),
        }
    }
}
