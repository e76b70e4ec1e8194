use std::path::Path;

use bacserve_core::types::{DataValue, ObjectType};
use bacserve_device::{ConfigError, PropertyError, ServerConfig, ValueKind};
use clap::ValueEnum;
use serde_json::{json, Value};

/// CLI-friendly enum for selecting hosted object types.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ObjectTypeArg {
    Device,
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryValue,
    MultiStateInput,
    MultiStateValue,
    CharacterStringValue,
    PositiveIntegerValue,
    DateValue,
    TimeValue,
    NetworkPort,
}

impl ObjectTypeArg {
    pub const fn into_object_type(self) -> ObjectType {
        match self {
            Self::Device => ObjectType::Device,
            Self::AnalogInput => ObjectType::AnalogInput,
            Self::AnalogOutput => ObjectType::AnalogOutput,
            Self::AnalogValue => ObjectType::AnalogValue,
            Self::BinaryInput => ObjectType::BinaryInput,
            Self::BinaryValue => ObjectType::BinaryValue,
            Self::MultiStateInput => ObjectType::MultiStateInput,
            Self::MultiStateValue => ObjectType::MultiStateValue,
            Self::CharacterStringValue => ObjectType::CharacterStringValue,
            Self::PositiveIntegerValue => ObjectType::PositiveIntegerValue,
            Self::DateValue => ObjectType::DateValue,
            Self::TimeValue => ObjectType::TimeValue,
            Self::NetworkPort => ObjectType::NetworkPort,
        }
    }
}

/// Value type to request from the dispatcher.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ValueKindArg {
    Boolean,
    Unsigned,
    Signed,
    Real,
    Double,
    Enumerated,
    CharacterString,
    OctetString,
    Date,
    Time,
}

impl ValueKindArg {
    pub const fn into_value_kind(self) -> ValueKind {
        match self {
            Self::Boolean => ValueKind::Boolean,
            Self::Unsigned => ValueKind::Unsigned,
            Self::Signed => ValueKind::Signed,
            Self::Real => ValueKind::Real,
            Self::Double => ValueKind::Double,
            Self::Enumerated => ValueKind::Enumerated,
            Self::CharacterString => ValueKind::CharacterString,
            Self::OctetString => ValueKind::OctetString,
            Self::Date => ValueKind::Date,
            Self::Time => ValueKind::Time,
        }
    }
}

/// Loads the JSON configuration at `path`, or the defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    match path {
        Some(path) => ServerConfig::from_path(path),
        None => Ok(ServerConfig::default()),
    }
}

pub fn value_to_json(value: &DataValue<'_>) -> Value {
    match value {
        DataValue::Null => Value::Null,
        DataValue::Boolean(v) => json!(v),
        DataValue::Unsigned(v) | DataValue::Enumerated(v) => json!(v),
        DataValue::Real(v) => json!(v),
        DataValue::CharacterString(v) => json!(v),
        DataValue::OctetString(v) => json!(v),
        DataValue::Date(v) => json!(v),
        DataValue::Time(v) => json!(v),
    }
}

pub fn error_to_json(err: PropertyError) -> Value {
    json!({
        "error": err.to_string(),
        "error_class": err.error_class(),
        "error_code": err.error_code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacserve_core::types::Date;

    #[test]
    fn values_render_as_plain_json() {
        assert_eq!(value_to_json(&DataValue::Null), Value::Null);
        assert_eq!(value_to_json(&DataValue::Unsigned(7)), json!(7));
        assert_eq!(
            value_to_json(&DataValue::CharacterString("North (N)")),
            json!("North (N)")
        );
        assert_eq!(
            value_to_json(&DataValue::OctetString(&[10, 0, 0, 1])),
            json!([10, 0, 0, 1])
        );
        assert_eq!(
            value_to_json(&DataValue::Date(Date::new(2019, 6, 7, 5))),
            json!({"year_since_1900": 119, "month": 6, "day": 7, "weekday": 5})
        );
    }

    #[test]
    fn errors_carry_class_and_code() {
        let rendered = error_to_json(PropertyError::UnknownObject);
        assert_eq!(rendered["error_class"], json!("Object"));
        assert_eq!(rendered["error_code"], json!("UnknownObject"));
    }

    #[test]
    fn missing_config_path_yields_defaults() {
        assert_eq!(load_config(None).unwrap(), ServerConfig::default());
    }
}
