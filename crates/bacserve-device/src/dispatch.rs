//! Routing of engine property requests to catalog records.

use bacserve_core::types::{DataValue, ObjectType, PropertyId};
use log::{debug, info};

use crate::catalog::Catalog;
use crate::error::PropertyError;

/// Value type the engine asks for. One engine callback exists per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
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

impl ValueKind {
    /// Kinds the engine registers callbacks for but this device never serves.
    pub const fn is_unsupported(self) -> bool {
        matches!(self, Self::Signed | Self::Double)
    }
}

/// Address of one property (or one element of an array property).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRequest {
    pub object_type: ObjectType,
    pub instance: u32,
    pub property: PropertyId,
    /// 1-based element; `Some(0)` asks for the array length.
    pub array_index: Option<u32>,
}

impl PropertyRequest {
    pub const fn new(object_type: ObjectType, instance: u32, property: PropertyId) -> Self {
        Self {
            object_type,
            instance,
            property,
            array_index: None,
        }
    }

    pub const fn with_index(mut self, index: u32) -> Self {
        self.array_index = Some(index);
        self
    }
}

impl Catalog {
    pub fn read_property(
        &self,
        request: &PropertyRequest,
        kind: ValueKind,
    ) -> Result<DataValue<'_>, PropertyError> {
        let result = if kind.is_unsupported() {
            Err(PropertyError::UnknownProperty)
        } else {
            self.get(request.object_type, request.instance)
                .ok_or(PropertyError::UnknownObject)
                .and_then(|object| {
                    object
                        .access()
                        .read(request.property, request.array_index, kind)
                })
        };
        if let Err(err) = &result {
            debug!(
                "read {:?}:{} {:?}[{:?}] as {:?}: {err}",
                request.object_type, request.instance, request.property, request.array_index, kind
            );
        }
        result
    }

    pub fn write_property(
        &mut self,
        request: &PropertyRequest,
        value: &DataValue<'_>,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        let object = self
            .get_mut(request.object_type, request.instance)
            .ok_or(PropertyError::UnknownObject)?;
        match object
            .access()
            .write(request.property, request.array_index, value, priority)
        {
            Ok(()) => {
                info!(
                    "write {:?}:{} {:?}[{:?}] = {value:?} @ {priority:?}",
                    request.object_type, request.instance, request.property, request.array_index
                );
                Ok(())
            }
            Err(err) => {
                debug!(
                    "write {:?}:{} {:?} {} rejected: {err}",
                    request.object_type,
                    request.instance,
                    request.property,
                    value.type_name()
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::names::NameAllocator;

    fn catalog() -> Catalog {
        Catalog::setup(&ServerConfig::default(), &mut NameAllocator::new())
    }

    #[test]
    fn out_of_range_instance_is_unknown_object() {
        let catalog = catalog();
        let request = PropertyRequest::new(ObjectType::AnalogInput, 3, PropertyId::PresentValue);
        assert_eq!(
            catalog.read_property(&request, ValueKind::Real),
            Err(PropertyError::UnknownObject)
        );
        let request = PropertyRequest::new(ObjectType::Other(200), 0, PropertyId::ObjectName);
        assert_eq!(
            catalog.read_property(&request, ValueKind::CharacterString),
            Err(PropertyError::UnknownObject)
        );
    }

    #[test]
    fn signed_and_double_are_never_served() {
        let catalog = catalog();
        let request = PropertyRequest::new(ObjectType::AnalogInput, 0, PropertyId::PresentValue);
        assert_eq!(
            catalog.read_property(&request, ValueKind::Signed),
            Err(PropertyError::UnknownProperty)
        );
        assert_eq!(
            catalog.read_property(&request, ValueKind::Double),
            Err(PropertyError::UnknownProperty)
        );
    }

    #[test]
    fn device_properties_resolve() {
        let catalog = catalog();
        let vendor = PropertyRequest::new(ObjectType::Device, 389001, PropertyId::VendorIdentifier);
        assert_eq!(
            catalog.read_property(&vendor, ValueKind::Unsigned),
            Ok(DataValue::Unsigned(389))
        );
        let name = PropertyRequest::new(ObjectType::Device, 389001, PropertyId::ObjectName);
        assert_eq!(
            catalog.read_property(&name, ValueKind::CharacterString),
            Ok(DataValue::CharacterString("Device name Rainbow"))
        );
    }

    #[test]
    fn writes_route_to_the_addressed_instance() {
        let mut catalog = catalog();
        let request = PropertyRequest::new(ObjectType::AnalogValue, 1, PropertyId::PresentValue);
        catalog
            .write_property(&request, &DataValue::Real(42.0), None)
            .unwrap();
        assert_eq!(
            catalog.read_property(&request, ValueKind::Real),
            Ok(DataValue::Real(42.0))
        );
        let other = PropertyRequest::new(ObjectType::AnalogValue, 0, PropertyId::PresentValue);
        assert_eq!(
            catalog.read_property(&other, ValueKind::Real),
            Ok(DataValue::Real(0.0))
        );
    }

    #[test]
    fn indexed_request_reaches_state_text() {
        let catalog = catalog();
        let request =
            PropertyRequest::new(ObjectType::MultiStateValue, 2, PropertyId::StateText).with_index(1);
        assert_eq!(
            catalog.read_property(&request, ValueKind::CharacterString),
            Ok(DataValue::CharacterString("North (N)"))
        );
    }
}
