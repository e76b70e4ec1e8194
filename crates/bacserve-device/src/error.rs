use bacserve_core::types::{ErrorClass, ErrorCode, ObjectType};
use thiserror::Error;

/// Failure of a single property read or write.
///
/// None of these are faults: the engine probes optional properties and
/// reports whichever error comes back to the remote client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("unknown object")]
    UnknownObject,
    #[error("unknown property")]
    UnknownProperty,
    #[error("invalid array index")]
    InvalidArrayIndex,
    #[error("priority {0} outside 1..=16")]
    PriorityOutOfRange(u8),
    #[error("write access denied")]
    WriteAccessDenied,
    #[error("value out of range")]
    ValueOutOfRange,
    #[error("invalid data type")]
    InvalidDataType,
    #[error("priority slot is null")]
    NullSlot,
}

impl PropertyError {
    pub const fn error_class(self) -> ErrorClass {
        match self {
            Self::UnknownObject => ErrorClass::Object,
            _ => ErrorClass::Property,
        }
    }

    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::UnknownObject => ErrorCode::UnknownObject,
            Self::UnknownProperty => ErrorCode::UnknownProperty,
            Self::InvalidArrayIndex | Self::NullSlot => ErrorCode::InvalidArrayIndex,
            Self::PriorityOutOfRange(_) | Self::ValueOutOfRange => ErrorCode::ValueOutOfRange,
            Self::WriteAccessDenied => ErrorCode::WriteAccessDenied,
            Self::InvalidDataType => ErrorCode::InvalidDataType,
        }
    }
}

/// Rejection of a ReinitializeDevice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReinitializeError {
    #[error("password required")]
    MissingPassword,
    #[error("password failure")]
    PasswordFailure,
    #[error("reinitialize state {0} not supported")]
    UnsupportedState(u32),
}

impl ReinitializeError {
    pub const fn error_class(self) -> ErrorClass {
        match self {
            Self::PasswordFailure => ErrorClass::Security,
            Self::MissingPassword | Self::UnsupportedState(_) => ErrorClass::Services,
        }
    }

    pub const fn error_code(self) -> ErrorCode {
        match self {
            Self::MissingPassword => ErrorCode::MissingRequiredParameter,
            Self::PasswordFailure => ErrorCode::PasswordFailure,
            Self::UnsupportedState(_) => ErrorCode::OptionalFunctionalityNotSupported,
        }
    }
}

/// An outbound engine call that the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("engine rejected {call} for {object_type:?}:{instance}")]
    Rejected {
        call: &'static str,
        object_type: ObjectType,
        instance: u32,
    },
    #[error("engine rejected {0}")]
    Refused(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("property error: {0}")]
    Property(#[from] PropertyError),
    #[error("no foreign-device registration target configured")]
    ForeignDeviceNotConfigured,
}

#[cfg(test)]
mod tests {
    use super::{PropertyError, ReinitializeError};
    use bacserve_core::types::{ErrorClass, ErrorCode};

    #[test]
    fn reinitialize_errors_map_to_distinct_codes() {
        assert_eq!(
            ReinitializeError::MissingPassword.error_code(),
            ErrorCode::MissingRequiredParameter
        );
        assert_eq!(
            ReinitializeError::PasswordFailure.error_code(),
            ErrorCode::PasswordFailure
        );
        assert_eq!(
            ReinitializeError::PasswordFailure.error_class(),
            ErrorClass::Security
        );
        assert_eq!(
            ReinitializeError::UnsupportedState(0).error_code(),
            ErrorCode::OptionalFunctionalityNotSupported
        );
    }

    #[test]
    fn unknown_object_is_an_object_class_error() {
        assert_eq!(PropertyError::UnknownObject.error_class(), ErrorClass::Object);
        assert_eq!(
            PropertyError::PriorityOutOfRange(17).error_code(),
            ErrorCode::ValueOutOfRange
        );
    }
}
