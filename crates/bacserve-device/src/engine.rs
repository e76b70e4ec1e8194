//! Outbound calls into the protocol engine.
//!
//! The engine owns encoding, framing and transaction handling. This crate
//! only tells it what exists and when a value has changed.

use std::net::SocketAddrV4;

use bacserve_core::types::{ObjectType, PropertyId};
use log::info;

use crate::error::EngineError;

/// Confirmed services the device opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    SubscribeCov,
    ReadPropertyMultiple,
    WriteProperty,
    WritePropertyMultiple,
    ReinitializeDevice,
}

impl Service {
    /// Confirmed service choice.
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::SubscribeCov => 5,
            Self::ReadPropertyMultiple => 14,
            Self::WriteProperty => 15,
            Self::WritePropertyMultiple => 16,
            Self::ReinitializeDevice => 20,
        }
    }
}

/// Services enabled at setup, in order.
pub const ENABLED_SERVICES: [Service; 5] = [
    Service::ReadPropertyMultiple,
    Service::WriteProperty,
    Service::WritePropertyMultiple,
    Service::SubscribeCov,
    Service::ReinitializeDevice,
];

pub trait ProtocolEngine {
    fn add_device(&mut self, instance: u32) -> Result<(), EngineError>;

    fn add_object(
        &mut self,
        device: u32,
        object_type: ObjectType,
        instance: u32,
    ) -> Result<(), EngineError>;

    fn set_property_by_object_type_enabled(
        &mut self,
        device: u32,
        object_type: ObjectType,
        property: PropertyId,
        enabled: bool,
    ) -> Result<(), EngineError>;

    fn set_property_by_object_type_subscribable(
        &mut self,
        device: u32,
        object_type: ObjectType,
        property: PropertyId,
        subscribable: bool,
    ) -> Result<(), EngineError>;

    fn set_property_writable(
        &mut self,
        device: u32,
        object_type: ObjectType,
        instance: u32,
        property: PropertyId,
        writable: bool,
    ) -> Result<(), EngineError>;

    fn set_service_enabled(
        &mut self,
        device: u32,
        service: Service,
        enabled: bool,
    ) -> Result<(), EngineError>;

    /// Announces a local change so the engine can emit COV notifications.
    fn value_updated(
        &mut self,
        device: u32,
        object_type: ObjectType,
        instance: u32,
        property: PropertyId,
    );

    fn register_foreign_device(
        &mut self,
        bbmd: SocketAddrV4,
        lifetime_seconds: u16,
    ) -> Result<(), EngineError>;
}

/// Engine stand-in that accepts everything and logs each call.
#[derive(Debug, Default)]
pub struct LoggingEngine;

impl ProtocolEngine for LoggingEngine {
    fn add_device(&mut self, instance: u32) -> Result<(), EngineError> {
        info!("engine: add device {instance}");
        Ok(())
    }

    fn add_object(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        instance: u32,
    ) -> Result<(), EngineError> {
        info!("engine: add object {}:{instance}", object_type.label());
        Ok(())
    }

    fn set_property_by_object_type_enabled(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        property: PropertyId,
        enabled: bool,
    ) -> Result<(), EngineError> {
        info!("engine: {} {property:?} enabled={enabled}", object_type.label());
        Ok(())
    }

    fn set_property_by_object_type_subscribable(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        property: PropertyId,
        subscribable: bool,
    ) -> Result<(), EngineError> {
        info!(
            "engine: {} {property:?} subscribable={subscribable}",
            object_type.label()
        );
        Ok(())
    }

    fn set_property_writable(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        instance: u32,
        property: PropertyId,
        writable: bool,
    ) -> Result<(), EngineError> {
        info!(
            "engine: {}:{instance} {property:?} writable={writable}",
            object_type.label()
        );
        Ok(())
    }

    fn set_service_enabled(
        &mut self,
        _device: u32,
        service: Service,
        enabled: bool,
    ) -> Result<(), EngineError> {
        info!(
            "engine: service {service:?} (choice {}) enabled={enabled}",
            service.to_u8()
        );
        Ok(())
    }

    fn value_updated(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        instance: u32,
        property: PropertyId,
    ) {
        info!(
            "engine: value updated {}:{instance} {property:?}",
            object_type.label()
        );
    }

    fn register_foreign_device(
        &mut self,
        bbmd: SocketAddrV4,
        lifetime_seconds: u16,
    ) -> Result<(), EngineError> {
        info!("engine: register foreign device with {bbmd} for {lifetime_seconds}s");
        Ok(())
    }
}

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    AddDevice(u32),
    AddObject(ObjectType, u32),
    PropertyEnabled(ObjectType, PropertyId, bool),
    PropertySubscribable(ObjectType, PropertyId, bool),
    PropertyWritable(ObjectType, u32, PropertyId, bool),
    ServiceEnabled(Service, bool),
    ValueUpdated(ObjectType, u32, PropertyId),
    RegisterForeignDevice(SocketAddrV4, u16),
}

/// Engine double that records every call, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    /// Calls whose label matches are rejected instead of recorded.
    pub reject: Option<&'static str>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(call: &'static str) -> Self {
        Self {
            calls: Vec::new(),
            reject: Some(call),
        }
    }

    fn record(
        &mut self,
        label: &'static str,
        object_type: ObjectType,
        instance: u32,
        call: EngineCall,
    ) -> Result<(), EngineError> {
        if self.reject == Some(label) {
            return Err(EngineError::Rejected {
                call: label,
                object_type,
                instance,
            });
        }
        self.calls.push(call);
        Ok(())
    }

    pub fn value_updates(&self) -> impl Iterator<Item = &EngineCall> + '_ {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::ValueUpdated(..)))
    }
}

impl ProtocolEngine for RecordingEngine {
    fn add_device(&mut self, instance: u32) -> Result<(), EngineError> {
        self.record(
            "add_device",
            ObjectType::Device,
            instance,
            EngineCall::AddDevice(instance),
        )
    }

    fn add_object(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        instance: u32,
    ) -> Result<(), EngineError> {
        self.record(
            "add_object",
            object_type,
            instance,
            EngineCall::AddObject(object_type, instance),
        )
    }

    fn set_property_by_object_type_enabled(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        property: PropertyId,
        enabled: bool,
    ) -> Result<(), EngineError> {
        self.record(
            "set_property_by_object_type_enabled",
            object_type,
            0,
            EngineCall::PropertyEnabled(object_type, property, enabled),
        )
    }

    fn set_property_by_object_type_subscribable(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        property: PropertyId,
        subscribable: bool,
    ) -> Result<(), EngineError> {
        self.record(
            "set_property_by_object_type_subscribable",
            object_type,
            0,
            EngineCall::PropertySubscribable(object_type, property, subscribable),
        )
    }

    fn set_property_writable(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        instance: u32,
        property: PropertyId,
        writable: bool,
    ) -> Result<(), EngineError> {
        self.record(
            "set_property_writable",
            object_type,
            instance,
            EngineCall::PropertyWritable(object_type, instance, property, writable),
        )
    }

    fn set_service_enabled(
        &mut self,
        device: u32,
        service: Service,
        enabled: bool,
    ) -> Result<(), EngineError> {
        self.record(
            "set_service_enabled",
            ObjectType::Device,
            device,
            EngineCall::ServiceEnabled(service, enabled),
        )
    }

    fn value_updated(
        &mut self,
        _device: u32,
        object_type: ObjectType,
        instance: u32,
        property: PropertyId,
    ) {
        self.calls
            .push(EngineCall::ValueUpdated(object_type, instance, property));
    }

    fn register_foreign_device(
        &mut self,
        bbmd: SocketAddrV4,
        lifetime_seconds: u16,
    ) -> Result<(), EngineError> {
        if self.reject == Some("register_foreign_device") {
            return Err(EngineError::Refused("register_foreign_device"));
        }
        self.calls
            .push(EngineCall::RegisterForeignDevice(bbmd, lifetime_seconds));
        Ok(())
    }
}
