/// BACnet error class reported in Error PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorClass {
    Device = 0,
    Object = 1,
    Property = 2,
    Resources = 3,
    Security = 4,
    Services = 5,
    Vt = 6,
    Communication = 7,
}

/// BACnet error code reported in Error PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ErrorCode {
    Other = 0,
    ConfigurationInProgress = 2,
    DeviceBusy = 3,
    InvalidDataType = 9,
    MissingRequiredParameter = 16,
    PasswordFailure = 26,
    UnknownObject = 31,
    UnknownProperty = 32,
    ValueOutOfRange = 37,
    WriteAccessDenied = 40,
    InvalidArrayIndex = 42,
    OptionalFunctionalityNotSupported = 45,
}

/// Target state of a ReinitializeDevice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ReinitializeState {
    Coldstart = 0,
    Warmstart = 1,
    StartBackup = 2,
    EndBackup = 3,
    StartRestore = 4,
    EndRestore = 5,
    AbortRestore = 6,
    ActivateChanges = 7,
}

impl ErrorClass {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Device),
            1 => Some(Self::Object),
            2 => Some(Self::Property),
            3 => Some(Self::Resources),
            4 => Some(Self::Security),
            5 => Some(Self::Services),
            6 => Some(Self::Vt),
            7 => Some(Self::Communication),
            _ => None,
        }
    }
}

impl ErrorCode {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Other),
            2 => Some(Self::ConfigurationInProgress),
            3 => Some(Self::DeviceBusy),
            9 => Some(Self::InvalidDataType),
            16 => Some(Self::MissingRequiredParameter),
            26 => Some(Self::PasswordFailure),
            31 => Some(Self::UnknownObject),
            32 => Some(Self::UnknownProperty),
            37 => Some(Self::ValueOutOfRange),
            40 => Some(Self::WriteAccessDenied),
            42 => Some(Self::InvalidArrayIndex),
            45 => Some(Self::OptionalFunctionalityNotSupported),
            _ => None,
        }
    }
}

impl ReinitializeState {
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Coldstart),
            1 => Some(Self::Warmstart),
            2 => Some(Self::StartBackup),
            3 => Some(Self::EndBackup),
            4 => Some(Self::StartRestore),
            5 => Some(Self::EndRestore),
            6 => Some(Self::AbortRestore),
            7 => Some(Self::ActivateChanges),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorClass, ErrorCode, ReinitializeState};

    #[test]
    fn error_codes_round_trip() {
        for code in [
            ErrorCode::MissingRequiredParameter,
            ErrorCode::PasswordFailure,
            ErrorCode::OptionalFunctionalityNotSupported,
            ErrorCode::InvalidArrayIndex,
        ] {
            assert_eq!(ErrorCode::from_u32(code.to_u32()), Some(code));
        }
        assert_eq!(ErrorCode::from_u32(1), None);
        assert_eq!(ErrorClass::from_u32(4), Some(ErrorClass::Security));
    }

    #[test]
    fn reinitialize_state_numbering() {
        assert_eq!(ReinitializeState::ActivateChanges.to_u32(), 7);
        assert_eq!(
            ReinitializeState::from_u32(1),
            Some(ReinitializeState::Warmstart)
        );
        assert_eq!(ReinitializeState::from_u32(8), None);
    }
}
