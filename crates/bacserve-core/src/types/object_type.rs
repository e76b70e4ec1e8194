/// BACnet object type identifiers.
///
/// Only the kinds a device endpoint can host are named; anything else the
/// engine hands over is carried as [`Other`](Self::Other) so it can be
/// rejected as an unknown object instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectType {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Device,
    MultiStateInput,
    MultiStateOutput,
    MultiStateValue,
    CharacterStringValue,
    DateValue,
    PositiveIntegerValue,
    TimeValue,
    NetworkPort,
    Other(u16),
}

impl ObjectType {
    /// Converts this object type to its numeric BACnet identifier.
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::AnalogInput => 0,
            Self::AnalogOutput => 1,
            Self::AnalogValue => 2,
            Self::BinaryInput => 3,
            Self::BinaryOutput => 4,
            Self::BinaryValue => 5,
            Self::Device => 8,
            Self::MultiStateInput => 13,
            Self::MultiStateOutput => 14,
            Self::MultiStateValue => 19,
            Self::CharacterStringValue => 40,
            Self::DateValue => 42,
            Self::PositiveIntegerValue => 48,
            Self::TimeValue => 50,
            Self::NetworkPort => 56,
            Self::Other(v) => v,
        }
    }

    /// Creates an `ObjectType` from its numeric BACnet identifier.
    ///
    /// Values without a mapping become [`Other`](Self::Other).
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::AnalogInput,
            1 => Self::AnalogOutput,
            2 => Self::AnalogValue,
            3 => Self::BinaryInput,
            4 => Self::BinaryOutput,
            5 => Self::BinaryValue,
            8 => Self::Device,
            13 => Self::MultiStateInput,
            14 => Self::MultiStateOutput,
            19 => Self::MultiStateValue,
            40 => Self::CharacterStringValue,
            42 => Self::DateValue,
            48 => Self::PositiveIntegerValue,
            50 => Self::TimeValue,
            56 => Self::NetworkPort,
            v => Self::Other(v),
        }
    }

    /// Short name used as the prefix of generated object names.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AnalogInput => "AnalogInput",
            Self::AnalogOutput => "AnalogOutput",
            Self::AnalogValue => "AnalogValue",
            Self::BinaryInput => "BinaryInput",
            Self::BinaryOutput => "BinaryOutput",
            Self::BinaryValue => "BinaryValue",
            Self::Device => "Device",
            Self::MultiStateInput => "MultiStateInput",
            Self::MultiStateOutput => "MultiStateOutput",
            Self::MultiStateValue => "MultiStateValue",
            Self::CharacterStringValue => "CharacterString",
            Self::DateValue => "DateValue",
            Self::PositiveIntegerValue => "PositiveIntegerValue",
            Self::TimeValue => "TimeValue",
            Self::NetworkPort => "NetworkPort",
            Self::Other(_) => "Object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectType;

    #[test]
    fn known_types_round_trip_through_numeric_id() {
        for ty in [
            ObjectType::AnalogOutput,
            ObjectType::MultiStateValue,
            ObjectType::PositiveIntegerValue,
            ObjectType::NetworkPort,
        ] {
            assert_eq!(ObjectType::from_u16(ty.to_u16()), ty);
        }
    }

    #[test]
    fn unmapped_ids_are_preserved() {
        assert_eq!(ObjectType::from_u16(17), ObjectType::Other(17));
        assert_eq!(ObjectType::Other(17).to_u16(), 17);
    }
}
