//! BACnet vocabulary for device-side endpoints.
//!
//! `bacserve-core` holds the protocol identifiers and value types that the
//! device endpoint exchanges with an external protocol engine: object types,
//! property identifiers, dates and times, borrowed data values and the error
//! class/code pairs reported back to remote clients. It performs no wire
//! encoding and can be used in `no_std` builds.
//!
//! # Feature flags
//!
//! - **`std`** (default): links the standard library.
//! - **`serde`**: derives `Serialize`/`Deserialize` on core types.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

/// Core BACnet data types: object identifiers, property identifiers, data values and error codes.
pub mod types;

pub use types::{
    DataValue, Date, ErrorClass, ErrorCode, ObjectId, ObjectType, PropertyId, ReinitializeState,
    Time,
};
