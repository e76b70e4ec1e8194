//! Engineering-unit enumeration values used by the analog objects.

pub const DEGREES_CELSIUS: u32 = 62;
pub const NO_UNITS: u32 = 95;
pub const PERCENT: u32 = 98;
