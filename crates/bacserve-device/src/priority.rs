//! Sixteen-level command arbitration for commandable objects.
//!
//! Priority 1 is the highest. The protocol numbers slots 1..=16; storage is
//! 0-based and never exposed.

use crate::error::PropertyError;

/// Number of command priorities defined by the protocol.
pub const PRIORITY_LEVELS: usize = 16;

/// Priority used when a write arrives without one.
pub const DEFAULT_WRITE_PRIORITY: u8 = 16;

/// One slot of a priority array.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PrioritySlot {
    #[default]
    Vacant,
    Occupied(f32),
}

impl PrioritySlot {
    pub const fn is_vacant(self) -> bool {
        matches!(self, Self::Vacant)
    }

    pub const fn value(self) -> Option<f32> {
        match self {
            Self::Vacant => None,
            Self::Occupied(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriorityArray {
    slots: [PrioritySlot; PRIORITY_LEVELS],
}

impl PriorityArray {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_index(priority: u8) -> Result<usize, PropertyError> {
        match priority {
            1..=16 => Ok(usize::from(priority) - 1),
            _ => Err(PropertyError::PriorityOutOfRange(priority)),
        }
    }

    /// Stores `value` at `priority`.
    pub fn write(&mut self, priority: u8, value: f32) -> Result<(), PropertyError> {
        let index = Self::slot_index(priority)?;
        self.slots[index] = PrioritySlot::Occupied(value);
        Ok(())
    }

    /// Clears `priority` back to vacant.
    pub fn relinquish(&mut self, priority: u8) -> Result<(), PropertyError> {
        let index = Self::slot_index(priority)?;
        self.slots[index] = PrioritySlot::Vacant;
        Ok(())
    }

    /// Reads one slot by its 1-based protocol index.
    pub fn slot(&self, index: u32) -> Option<PrioritySlot> {
        let index = usize::try_from(index).ok()?.checked_sub(1)?;
        self.slots.get(index).copied()
    }

    /// The highest-priority command, as `(priority, value)`.
    pub fn active_command(&self) -> Option<(u8, f32)> {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(i, slot)| slot.value().map(|v| (i as u8 + 1, v)))
    }

    /// Present value: the highest-priority command, or `relinquish_default`
    /// when every slot is vacant.
    pub fn effective_value(&self, relinquish_default: f32) -> f32 {
        self.active_command()
            .map(|(_, v)| v)
            .unwrap_or(relinquish_default)
    }

    pub fn iter(&self) -> impl Iterator<Item = PrioritySlot> + '_ {
        self.slots.iter().copied()
    }
}
