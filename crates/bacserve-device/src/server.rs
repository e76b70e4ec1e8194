//! The device endpoint: catalog, reinitializer and engine wired together.
//!
//! The engine's poll loop owns a [`DeviceServer`] and calls its typed
//! getters and setters from the same thread. Nothing here blocks or locks.

use std::mem;
use std::net::SocketAddrV4;

use bacserve_core::types::{DataValue, Date, ObjectType, PropertyId, Time};
use log::{debug, info};

use crate::catalog::{Catalog, LIST_KINDS, NETWORK_PORT_INSTANCE};
use crate::config::ServerConfig;
use crate::dispatch::{PropertyRequest, ValueKind};
use crate::engine::{ProtocolEngine, ENABLED_SERVICES};
use crate::error::{DeviceError, EngineError, PropertyError, ReinitializeError};
use crate::host::{copy_str_truncated, copy_truncated, unix_time_seconds};
use crate::names::NameAllocator;
use crate::network_port::NetworkPort;
use crate::reinit::{ReinitializeOutcome, Reinitializer};

#[derive(Debug)]
pub struct DeviceServer<E> {
    catalog: Catalog,
    engine: E,
    reinitializer: Reinitializer,
    restart_requested: bool,
}

impl<E: ProtocolEngine> DeviceServer<E> {
    /// Builds the catalog from `config` and registers it with `engine`.
    pub fn new(config: &ServerConfig, engine: E) -> Result<Self, DeviceError> {
        config.validate()?;
        let catalog = Catalog::setup(config, &mut NameAllocator::new());
        let mut server = Self {
            catalog,
            engine,
            reinitializer: Reinitializer::new(config.reinitialize_password.as_str()),
            restart_requested: false,
        };
        server.register()?;
        Ok(server)
    }

    fn register(&mut self) -> Result<(), EngineError> {
        let device = self.catalog.device_instance();
        let engine = &mut self.engine;
        engine.add_device(device)?;

        for kind in LIST_KINDS {
            let writable = matches!(
                kind,
                ObjectType::AnalogValue | ObjectType::BinaryValue | ObjectType::MultiStateValue
            );
            for instance in 0..self.catalog.count(kind) {
                engine.add_object(device, kind, instance)?;
                if writable {
                    engine.set_property_writable(
                        device,
                        kind,
                        instance,
                        PropertyId::PresentValue,
                        true,
                    )?;
                }
            }
            match kind {
                ObjectType::AnalogInput => {
                    engine.set_property_by_object_type_enabled(
                        device,
                        kind,
                        PropertyId::Description,
                        true,
                    )?;
                    engine.set_property_by_object_type_subscribable(
                        device,
                        kind,
                        PropertyId::PresentValue,
                        true,
                    )?;
                }
                ObjectType::MultiStateInput | ObjectType::MultiStateValue => {
                    engine.set_property_by_object_type_enabled(
                        device,
                        kind,
                        PropertyId::StateText,
                        true,
                    )?;
                }
                _ => {}
            }
        }
        engine.add_object(device, ObjectType::NetworkPort, NETWORK_PORT_INSTANCE)?;

        for service in ENABLED_SERVICES {
            engine.set_service_enabled(device, service, true)?;
        }
        info!(
            "device {device} registered with {} objects",
            self.catalog.object_ids().len()
        );
        Ok(())
    }

    /// Object records, for direct inspection.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The single network-port record.
    pub fn network_port(&self) -> &NetworkPort {
        self.catalog.network_port()
    }

    /// The engine this endpoint registered with.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consumes the endpoint, handing the engine back for a rebuild.
    pub fn into_engine(self) -> E {
        self.engine
    }

    fn read(&self, request: &PropertyRequest, kind: ValueKind) -> Result<DataValue<'_>, PropertyError> {
        debug!("get {kind:?} {request:?}");
        self.catalog.read_property(request, kind)
    }

    fn write(
        &mut self,
        request: &PropertyRequest,
        value: DataValue<'_>,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        debug!("set {} {request:?} @ {priority:?}", value.type_name());
        self.catalog.write_property(request, &value, priority)
    }

    /// Copies the string into `out`, truncating at a character boundary.
    pub fn get_character_string(
        &self,
        request: &PropertyRequest,
        out: &mut [u8],
    ) -> Result<usize, PropertyError> {
        match self.read(request, ValueKind::CharacterString)? {
            DataValue::CharacterString(s) => Ok(copy_str_truncated(s, out)),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// Copies the octet string into `out`, truncating to its length.
    pub fn get_octet_string(
        &self,
        request: &PropertyRequest,
        out: &mut [u8],
    ) -> Result<usize, PropertyError> {
        match self.read(request, ValueKind::OctetString)? {
            DataValue::OctetString(bytes) => Ok(copy_truncated(bytes, out)),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// Reads a real, resolving commandable present values through the
    /// priority array.
    pub fn get_real(&self, request: &PropertyRequest) -> Result<f32, PropertyError> {
        match self.read(request, ValueKind::Real)? {
            DataValue::Real(v) => Ok(v),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// Reads an enumerated value such as units or a binary present value.
    pub fn get_enumerated(&self, request: &PropertyRequest) -> Result<u32, PropertyError> {
        match self.read(request, ValueKind::Enumerated)? {
            DataValue::Enumerated(v) => Ok(v),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// Reads an unsigned value. Array index 0 answers the array length.
    pub fn get_unsigned(&self, request: &PropertyRequest) -> Result<u32, PropertyError> {
        match self.read(request, ValueKind::Unsigned)? {
            DataValue::Unsigned(v) => Ok(v),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// For priority-array elements this answers "is the slot null".
    pub fn get_bool(&self, request: &PropertyRequest) -> Result<bool, PropertyError> {
        match self.read(request, ValueKind::Boolean)? {
            DataValue::Boolean(v) => Ok(v),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// Reads a date.
    pub fn get_date(&self, request: &PropertyRequest) -> Result<Date, PropertyError> {
        match self.read(request, ValueKind::Date)? {
            DataValue::Date(v) => Ok(v),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// Reads a time.
    pub fn get_time(&self, request: &PropertyRequest) -> Result<Time, PropertyError> {
        match self.read(request, ValueKind::Time)? {
            DataValue::Time(v) => Ok(v),
            _ => Err(PropertyError::InvalidDataType),
        }
    }

    /// No hosted property is signed.
    pub fn get_signed(&self, request: &PropertyRequest) -> Result<i32, PropertyError> {
        self.read(request, ValueKind::Signed).map(|_| 0)
    }

    /// No hosted property is a double.
    pub fn get_double(&self, request: &PropertyRequest) -> Result<f64, PropertyError> {
        self.read(request, ValueKind::Double).map(|_| 0.0)
    }

    /// Writes a real. Commandable objects take it at `priority`, default 16.
    pub fn set_real(
        &mut self,
        request: &PropertyRequest,
        value: f32,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Real(value), priority)
    }

    /// Writes an enumerated value.
    pub fn set_enumerated(
        &mut self,
        request: &PropertyRequest,
        value: u32,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Enumerated(value), priority)
    }

    /// Writes an unsigned value.
    pub fn set_unsigned(
        &mut self,
        request: &PropertyRequest,
        value: u32,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Unsigned(value), priority)
    }

    /// Relinquishes `priority` on a commandable object.
    pub fn set_null(
        &mut self,
        request: &PropertyRequest,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Null, priority)
    }

    /// Writes a boolean.
    pub fn set_bool(
        &mut self,
        request: &PropertyRequest,
        value: bool,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Boolean(value), priority)
    }

    /// Writes a character string.
    pub fn set_character_string(
        &mut self,
        request: &PropertyRequest,
        value: &str,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::CharacterString(value), priority)
    }

    /// Writes an octet string, such as a BBMD IP address.
    pub fn set_octet_string(
        &mut self,
        request: &PropertyRequest,
        value: &[u8],
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::OctetString(value), priority)
    }

    /// Writes a date.
    pub fn set_date(
        &mut self,
        request: &PropertyRequest,
        value: Date,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Date(value), priority)
    }

    /// Writes a time.
    pub fn set_time(
        &mut self,
        request: &PropertyRequest,
        value: Time,
        priority: Option<u8>,
    ) -> Result<(), PropertyError> {
        self.write(request, DataValue::Time(value), priority)
    }

    /// Seconds since the Unix epoch, for the engine's clock callback.
    pub fn current_time(&self) -> u64 {
        unix_time_seconds()
    }

    /// Handles ReinitializeDevice. A warm start is latched, not performed:
    /// the poll loop collects it with [`take_restart_request`] after the
    /// acknowledgement has gone out.
    ///
    /// [`take_restart_request`]: Self::take_restart_request
    pub fn reinitialize_device(
        &mut self,
        state: u32,
        password: Option<&str>,
    ) -> Result<ReinitializeOutcome, ReinitializeError> {
        let outcome =
            self.reinitializer
                .handle(self.catalog.network_port_mut(), state, password)?;
        if outcome.restart {
            self.restart_requested = true;
        }
        Ok(outcome)
    }

    /// Returns whether a warm start was latched, clearing the latch.
    pub fn take_restart_request(&mut self) -> bool {
        mem::take(&mut self.restart_requested)
    }

    /// Outcome of the most recent ReinitializeDevice request.
    pub fn last_reinitialize_result(
        &self,
    ) -> Option<Result<ReinitializeOutcome, ReinitializeError>> {
        self.reinitializer.last_result()
    }

    /// Adds `delta` to an analog input and notifies the engine.
    pub fn adjust_analog_input(&mut self, instance: u32, delta: f32) -> Result<f32, DeviceError> {
        let point = self
            .catalog
            .analog_input_mut(instance)
            .ok_or(PropertyError::UnknownObject)?;
        point.present_value += delta;
        let value = point.present_value;
        info!("analog input {instance} adjusted to {value:.2}");
        self.engine.value_updated(
            self.catalog.device_instance(),
            ObjectType::AnalogInput,
            instance,
            PropertyId::PresentValue,
        );
        Ok(value)
    }

    /// Registers with the network port's BBMD using its subscription lifetime.
    pub fn register_foreign_device(&mut self) -> Result<SocketAddrV4, DeviceError> {
        let port = self.catalog.network_port();
        let target = port
            .foreign_device_target()
            .ok_or(DeviceError::ForeignDeviceNotConfigured)?;
        let lifetime = port.fd_subscription_lifetime;
        self.engine.register_foreign_device(target, lifetime)?;
        info!("registered as foreign device with {target} for {lifetime}s");
        Ok(target)
    }
}
