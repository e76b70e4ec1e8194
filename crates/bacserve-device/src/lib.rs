//! Device-side BACnet endpoint.
//!
//! `bacserve-device` hosts the object database behind a BACnet device and
//! answers the property callbacks of an external protocol engine:
//!
//! - [`Catalog`] owns every object record and routes typed reads and writes
//!   to them ([`Catalog::read_property`], [`Catalog::write_property`]).
//! - [`PriorityArray`] arbitrates the 16 command priorities of commandable
//!   outputs.
//! - [`Reinitializer`] gates ReinitializeDevice behind a password and commits
//!   pending network-port configuration.
//! - [`DeviceServer`] ties these to a [`ProtocolEngine`] and exposes one
//!   getter and setter per value type.
//!
//! ```
//! use bacserve_core::types::{ObjectType, PropertyId};
//! use bacserve_device::{DeviceServer, PropertyRequest, RecordingEngine, ServerConfig};
//!
//! let mut server = DeviceServer::new(&ServerConfig::default(), RecordingEngine::new())?;
//! let pv = PropertyRequest::new(ObjectType::AnalogOutput, 1, PropertyId::PresentValue);
//! server.set_real(&pv, 42.0, Some(8))?;
//! assert_eq!(server.get_real(&pv)?, 42.0);
//! server.set_null(&pv, Some(8))?;
//! assert_eq!(server.get_real(&pv)?, 1.1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod host;
pub mod names;
pub mod network_port;
pub mod objects;
pub mod priority;
pub mod reinit;
pub mod server;

pub use catalog::{Catalog, ObjectMut, ObjectRef};
pub use config::{BbmdConfig, DeviceConfig, NetworkConfig, ObjectCounts, ServerConfig};
pub use dispatch::{PropertyRequest, ValueKind};
pub use engine::{EngineCall, LoggingEngine, ProtocolEngine, RecordingEngine, Service};
pub use error::{ConfigError, DeviceError, EngineError, PropertyError, ReinitializeError};
pub use names::NameAllocator;
pub use network_port::{FdHostType, NetworkPort};
pub use objects::PropertyAccess;
pub use priority::{PriorityArray, PrioritySlot};
pub use reinit::{ReinitializeOutcome, ReinitializePhase, Reinitializer};
pub use server::DeviceServer;
