//! Object records hosted by the device and their per-property accessors.
//!
//! Every record implements [`PropertyAccess`], matching `(property, value
//! kind)` for exactly the properties it supports. Anything else falls
//! through to [`PropertyError::UnknownProperty`], which the engine treats as
//! "not here" rather than a fault.

use bacserve_core::types::{units, DataValue, Date, PropertyId, Time};

use crate::dispatch::ValueKind;
use crate::error::PropertyError;
use crate::priority::{PriorityArray, PrioritySlot, DEFAULT_WRITE_PRIORITY, PRIORITY_LEVELS};

/// Wind-compass state names used by the multi-state objects.
pub const COMPASS_STATE_TEXT: [&str; 16] = [
    "North (N)",
    "North by east (NbE)",
    "Northeast by north (NEbN)",
    "Northeast by east (NEbE)",
    "East (E)",
    "East by north (EbN)",
    "Southeast by east (SEbE)",
    "Southeast by south (SEbS)",
    "South (S)",
    "South by east (SbE)",
    "Southwest by south (SWbS)",
    "Southwest by west (SWbW)",
    "West (W)",
    "West by south (WbS)",
    "Northwest by west (NWbW)",
    "Northwest by north (NWbN)",
];

/// Typed access to the properties of one record.
pub trait PropertyAccess {
    /// Properties this record answers for, readable or not.
    fn properties(&self) -> &'static [PropertyId];

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError>;

    /// Records are read-only unless they override this.
    fn write(
        &mut self,
        property: PropertyId,
        index: Option<u32>,
        value: &DataValue<'_>,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        let _ = (index, value, priority);
        Err(self.deny_write(property))
    }

    /// Rejection for a write the record does not accept.
    fn deny_write(&self, property: PropertyId) -> PropertyError {
        if self.properties().contains(&property) {
            PropertyError::WriteAccessDenied
        } else {
            PropertyError::UnknownProperty
        }
    }
}

fn scalar(index: Option<u32>) -> Result<(), PropertyError> {
    match index {
        None => Ok(()),
        Some(_) => Err(PropertyError::UnknownProperty),
    }
}

/// Name and description shared by every record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectInfo {
    pub name: String,
    pub description: String,
}

impl ObjectInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub(crate) fn read(
        &self,
        property: PropertyId,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        match (property, kind) {
            (PropertyId::ObjectName, ValueKind::CharacterString) => {
                Ok(DataValue::CharacterString(&self.name))
            }
            (PropertyId::Description, ValueKind::CharacterString) => {
                Ok(DataValue::CharacterString(&self.description))
            }
            _ => Err(PropertyError::UnknownProperty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceObject {
    pub instance: u32,
    pub info: ObjectInfo,
    pub model_name: String,
    pub vendor_name: String,
    pub vendor_identifier: u16,
    pub protocol_revision: u32,
    pub application_software_version: String,
}

impl PropertyAccess for DeviceObject {
    fn properties(&self) -> &'static [PropertyId] {
        &[
            PropertyId::ObjectName,
            PropertyId::Description,
            PropertyId::ModelName,
            PropertyId::VendorName,
            PropertyId::VendorIdentifier,
            PropertyId::ProtocolRevision,
            PropertyId::ApplicationSoftwareVersion,
        ]
    }

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        scalar(index)?;
        match (property, kind) {
            (PropertyId::ModelName, ValueKind::CharacterString) => {
                Ok(DataValue::CharacterString(&self.model_name))
            }
            (PropertyId::VendorName, ValueKind::CharacterString) => {
                Ok(DataValue::CharacterString(&self.vendor_name))
            }
            (PropertyId::ApplicationSoftwareVersion, ValueKind::CharacterString) => {
                Ok(DataValue::CharacterString(&self.application_software_version))
            }
            (PropertyId::VendorIdentifier, ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(u32::from(self.vendor_identifier)))
            }
            (PropertyId::ProtocolRevision, ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(self.protocol_revision))
            }
            _ => self.info.read(property, kind),
        }
    }
}

/// Analog input or analog value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogPoint {
    pub info: ObjectInfo,
    pub present_value: f32,
    pub units: u32,
    pub out_of_service: bool,
    /// Present value accepts remote writes (analog value).
    pub writable: bool,
}

impl AnalogPoint {
    pub fn new(info: ObjectInfo, present_value: f32, writable: bool) -> Self {
        Self {
            info,
            present_value,
            units: units::NO_UNITS,
            out_of_service: false,
            writable,
        }
    }
}

const ANALOG_POINT_PROPERTIES: &[PropertyId] = &[
    PropertyId::ObjectName,
    PropertyId::Description,
    PropertyId::PresentValue,
    PropertyId::Units,
    PropertyId::OutOfService,
];

impl PropertyAccess for AnalogPoint {
    fn properties(&self) -> &'static [PropertyId] {
        ANALOG_POINT_PROPERTIES
    }

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        scalar(index)?;
        match (property, kind) {
            (PropertyId::PresentValue, ValueKind::Real) => Ok(DataValue::Real(self.present_value)),
            (PropertyId::Units, ValueKind::Enumerated) => Ok(DataValue::Enumerated(self.units)),
            (PropertyId::OutOfService, ValueKind::Boolean) => {
                Ok(DataValue::Boolean(self.out_of_service))
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
        match (property, value) {
            (PropertyId::PresentValue, _) if !self.writable => Err(PropertyError::WriteAccessDenied),
            (PropertyId::PresentValue, DataValue::Real(v)) => {
                scalar(index)?;
                self.present_value = *v;
                Ok(())
            }
            (PropertyId::PresentValue, _) => Err(PropertyError::InvalidDataType),
            _ => Err(self.deny_write(property)),
        }
    }
}

/// Commandable analog output.
///
/// The present value is never stored; it is always resolved from the
/// priority array and the relinquish default.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogOutput {
    pub info: ObjectInfo,
    pub units: u32,
    pub out_of_service: bool,
    pub relinquish_default: f32,
    priority_array: PriorityArray,
}

impl AnalogOutput {
    pub fn new(info: ObjectInfo, relinquish_default: f32) -> Self {
        Self {
            info,
            units: units::NO_UNITS,
            out_of_service: false,
            relinquish_default,
            priority_array: PriorityArray::new(),
        }
    }

    /// Writes `value` at `priority`, or relinquishes it when `value` is `None`.
    pub fn command(&mut self, priority: u8, value: Option<f32>) -> Result<(), PropertyError> {
        match value {
            Some(v) => self.priority_array.write(priority, v),
            None => self.priority_array.relinquish(priority),
        }
    }

    pub fn present_value(&self) -> f32 {
        self.priority_array.effective_value(self.relinquish_default)
    }

    pub fn priority_array(&self) -> &PriorityArray {
        &self.priority_array
    }

    fn read_priority_array(
        &self,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        if !matches!(
            kind,
            ValueKind::Unsigned | ValueKind::Boolean | ValueKind::Real
        ) {
            return Err(PropertyError::UnknownProperty);
        }
        let index = index.ok_or(PropertyError::UnknownProperty)?;
        if index == 0 {
            return match kind {
                ValueKind::Unsigned => Ok(DataValue::Unsigned(PRIORITY_LEVELS as u32)),
                _ => Err(PropertyError::UnknownProperty),
            };
        }
        let slot = self
            .priority_array
            .slot(index)
            .ok_or(PropertyError::InvalidArrayIndex)?;
        match (kind, slot) {
            (ValueKind::Boolean, slot) => Ok(DataValue::Boolean(slot.is_vacant())),
            (ValueKind::Real, PrioritySlot::Occupied(v)) => Ok(DataValue::Real(v)),
            (ValueKind::Real, PrioritySlot::Vacant) => Err(PropertyError::NullSlot),
            _ => Err(PropertyError::UnknownProperty),
        }
    }
}

impl PropertyAccess for AnalogOutput {
    fn properties(&self) -> &'static [PropertyId] {
        &[
            PropertyId::ObjectName,
            PropertyId::Description,
            PropertyId::PresentValue,
            PropertyId::PriorityArray,
            PropertyId::RelinquishDefault,
            PropertyId::Units,
            PropertyId::OutOfService,
        ]
    }

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        if property == PropertyId::PriorityArray {
            return self.read_priority_array(index, kind);
        }
        scalar(index)?;
        match (property, kind) {
            (PropertyId::PresentValue, ValueKind::Real) => Ok(DataValue::Real(self.present_value())),
            (PropertyId::RelinquishDefault, ValueKind::Real) => {
                Ok(DataValue::Real(self.relinquish_default))
            }
            (PropertyId::Units, ValueKind::Enumerated) => Ok(DataValue::Enumerated(self.units)),
            (PropertyId::OutOfService, ValueKind::Boolean) => {
                Ok(DataValue::Boolean(self.out_of_service))
            }
            _ => self.info.read(property, kind),
        }
    }

    fn write(
        &mut self,
        property: PropertyId,
        index: Option<u32>,
        value: &DataValue<'_>,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        if property != PropertyId::PresentValue {
            return Err(self.deny_write(property));
        }
        scalar(index)?;
        let priority = priority.unwrap_or(DEFAULT_WRITE_PRIORITY);
        match value {
            DataValue::Real(v) => self.command(priority, Some(*v)),
            DataValue::Null => self.command(priority, None),
            _ => Err(PropertyError::InvalidDataType),
        }
    }
}

/// Binary input or binary value; reported as enumerated inactive/active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPoint {
    pub info: ObjectInfo,
    pub present_value: bool,
    pub writable: bool,
}

impl PropertyAccess for BinaryPoint {
    fn properties(&self) -> &'static [PropertyId] {
        &[
            PropertyId::ObjectName,
            PropertyId::Description,
            PropertyId::PresentValue,
        ]
    }

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        scalar(index)?;
        match (property, kind) {
            (PropertyId::PresentValue, ValueKind::Enumerated) => {
                Ok(DataValue::Enumerated(u32::from(self.present_value)))
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
        match (property, value) {
            (PropertyId::PresentValue, _) if !self.writable => Err(PropertyError::WriteAccessDenied),
            (PropertyId::PresentValue, DataValue::Enumerated(v)) => {
                scalar(index)?;
                self.present_value = match v {
                    0 => false,
                    1 => true,
                    _ => return Err(PropertyError::ValueOutOfRange),
                };
                Ok(())
            }
            (PropertyId::PresentValue, _) => Err(PropertyError::InvalidDataType),
            _ => Err(self.deny_write(property)),
        }
    }
}

/// Multi-state input or multi-state value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiStatePoint {
    pub info: ObjectInfo,
    pub present_value: u32,
    pub state_text: Vec<String>,
    pub writable: bool,
}

impl MultiStatePoint {
    /// A point labelled with the compass table.
    pub fn compass(info: ObjectInfo, present_value: u32, writable: bool) -> Self {
        Self {
            info,
            present_value,
            state_text: COMPASS_STATE_TEXT.iter().map(|s| s.to_string()).collect(),
            writable,
        }
    }

    pub fn number_of_states(&self) -> u32 {
        self.state_text.len() as u32
    }

    fn read_state_text(
        &self,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        match (index, kind) {
            (Some(0), ValueKind::Unsigned) => Ok(DataValue::Unsigned(self.number_of_states())),
            (Some(i), ValueKind::CharacterString) if i > 0 => {
                let text = usize::try_from(i - 1)
                    .ok()
                    .and_then(|i| self.state_text.get(i))
                    .ok_or(PropertyError::InvalidArrayIndex)?;
                Ok(DataValue::CharacterString(text))
            }
            _ => Err(PropertyError::UnknownProperty),
        }
    }
}

impl PropertyAccess for MultiStatePoint {
    fn properties(&self) -> &'static [PropertyId] {
        &[
            PropertyId::ObjectName,
            PropertyId::Description,
            PropertyId::PresentValue,
            PropertyId::NumberOfStates,
            PropertyId::StateText,
        ]
    }

    fn read(
        &self,
        property: PropertyId,
        index: Option<u32>,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        if property == PropertyId::StateText {
            return self.read_state_text(index, kind);
        }
        scalar(index)?;
        match (property, kind) {
            (PropertyId::PresentValue, ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(self.present_value))
            }
            (PropertyId::NumberOfStates, ValueKind::Unsigned) => {
                Ok(DataValue::Unsigned(self.number_of_states()))
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
        match (property, value) {
            (PropertyId::PresentValue, _) if !self.writable => Err(PropertyError::WriteAccessDenied),
            (PropertyId::PresentValue, DataValue::Unsigned(v)) => {
                scalar(index)?;
                if *v >= self.number_of_states() {
                    return Err(PropertyError::ValueOutOfRange);
                }
                self.present_value = *v;
                Ok(())
            }
            (PropertyId::PresentValue, _) => Err(PropertyError::InvalidDataType),
            _ => Err(self.deny_write(property)),
        }
    }
}

/// Generates a read-only single-valued record type.
macro_rules! value_object {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $kind:ident, |$v:ident| $to_value:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub info: ObjectInfo,
            pub present_value: $ty,
        }

        impl PropertyAccess for $name {
            fn properties(&self) -> &'static [PropertyId] {
                &[
                    PropertyId::ObjectName,
                    PropertyId::Description,
                    PropertyId::PresentValue,
                ]
            }

            fn read(
                &self,
                property: PropertyId,
                index: Option<u32>,
                kind: ValueKind,
            ) -> Result<DataValue<'_>, PropertyError> {
                scalar(index)?;
                match (property, kind) {
                    (PropertyId::PresentValue, ValueKind::$kind) => {
                        let $v = &self.present_value;
                        Ok($to_value)
                    }
                    _ => self.info.read(property, kind),
                }
            }
        }
    };
}

value_object!(
    CharacterStringValue,
    String,
    CharacterString,
    |v| DataValue::CharacterString(v)
);
value_object!(PositiveIntegerValue, u32, Unsigned, |v| DataValue::Unsigned(*v));
value_object!(DateValue, Date, Date, |v| DataValue::Date(*v));
value_object!(TimeValue, Time, Time, |v| DataValue::Time(*v));
