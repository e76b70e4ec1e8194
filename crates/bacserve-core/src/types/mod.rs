pub mod data_value;
pub mod date_time;
pub mod object_id;
pub mod object_type;
pub mod property_id;
pub mod spec;
pub mod units;

pub use data_value::DataValue;
pub use date_time::{Date, Time};
pub use object_id::ObjectId;
pub use object_type::ObjectType;
pub use property_id::PropertyId;
pub use spec::{ErrorClass, ErrorCode, ReinitializeState};
