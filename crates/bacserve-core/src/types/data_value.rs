use crate::types::{Date, Time};

/// A single application-tagged value as exchanged with the protocol engine.
///
/// String and octet-string payloads borrow from the record that owns them.
/// `Null` doubles as the relinquish marker on commandable writes.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue<'a> {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Real(f32),
    Enumerated(u32),
    CharacterString(&'a str),
    OctetString(&'a [u8]),
    Date(Date),
    Time(Time),
}

impl DataValue<'_> {
    /// Application tag name, used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Unsigned(_) => "unsigned",
            Self::Real(_) => "real",
            Self::Enumerated(_) => "enumerated",
            Self::CharacterString(_) => "character-string",
            Self::OctetString(_) => "octet-string",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
        }
    }
}
