//! Display buffer and half renderers
//!
//! The eight digits are split into two halves of four. Writing one half
//! re-sends the other from the retained state, so the device always receives
//! a full buffer while callers only think about the half they changed.
//!
//! Slots are numbered 1-8 from the left, matching digit registers 0-7.

use core::ops::RangeInclusive;

use crate::digit::{DigitCode, Slot};
use crate::encoder::{Segment, SEGMENT_LEN};

/// Number of digits on the display
pub const SLOT_COUNT: usize = 8;

/// One half of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    /// Slots 1-4
    Left,
    /// Slots 5-8
    Right,
}

impl Half {
    /// First slot of this half (1-based)
    pub const fn first_slot(self) -> usize {
        match self {
            Half::Left => 1,
            Half::Right => SEGMENT_LEN + 1,
        }
    }

    /// Slots covered by this half (1-based)
    pub const fn slots(self) -> RangeInclusive<usize> {
        let first = self.first_slot();
        first..=first + SEGMENT_LEN - 1
    }
}

/// Area affected by a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// Slots 1-8
    #[default]
    All,
    /// Slots 1-4
    Left,
    /// Slots 5-8
    Right,
}

impl Zone {
    /// Slots covered by this zone (1-based)
    pub const fn slots(self) -> RangeInclusive<usize> {
        match self {
            Zone::All => 1..=SLOT_COUNT,
            Zone::Left => Half::Left.slots(),
            Zone::Right => Half::Right.slots(),
        }
    }
}

impl From<Half> for Zone {
    fn from(half: Half) -> Self {
        match half {
            Half::Left => Zone::Left,
            Half::Right => Zone::Right,
        }
    }
}

/// Eight optional digit codes, slot 1 first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    slots: [Slot; SLOT_COUNT],
}

impl DisplayBuffer {
    /// Buffer with every slot unset
    pub const fn empty() -> Self {
        Self {
            slots: [None; SLOT_COUNT],
        }
    }

    /// Buffer from raw slots
    pub const fn from_slots(slots: [Slot; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    /// Buffer with every slot set to `code`
    pub const fn filled(code: DigitCode) -> Self {
        Self {
            slots: [Some(code); SLOT_COUNT],
        }
    }

    /// Slot `n` (1-8), `None` if out of range or unset
    pub fn slot(&self, n: usize) -> Slot {
        n.checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .copied()
            .flatten()
    }

    /// All slots, slot 1 first
    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    /// Slots of one half
    pub fn half(&self, half: Half) -> [Slot; SEGMENT_LEN] {
        let start = half.first_slot() - 1;
        core::array::from_fn(|i| self.slots[start + i])
    }

    /// Replace one half
    pub fn set_half(&mut self, half: Half, slots: [Slot; SEGMENT_LEN]) {
        let start = half.first_slot() - 1;
        self.slots[start..start + SEGMENT_LEN].copy_from_slice(&slots);
    }

    /// Set every slot of `zone` to `slot`
    pub fn fill_zone(&mut self, zone: Zone, slot: Slot) {
        for n in zone.slots() {
            self.slots[n - 1] = slot;
        }
    }

    /// Check if no slot is set
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Register values as sent to the device, unset slots as blank
    pub fn wire_payload(&self) -> [u8; SLOT_COUNT] {
        self.slots
            .map(|slot| slot.unwrap_or(DigitCode::BLANK).raw())
    }
}

/// Result of rendering one operation
///
/// `transmit` goes to the device, `retain` becomes the new retained state
/// once that transmission succeeds. They only differ for clears, which show
/// dashes but forget the cleared slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Render {
    /// Buffer handed to the transport
    pub transmit: DisplayBuffer,
    /// Retained state after a successful transmit
    pub retain: DisplayBuffer,
}

/// Right-align a segment within a half
///
/// The last code lands in the last slot. Slots in front of a short segment
/// stay unset rather than blank.
pub fn align_right(segment: &Segment) -> [Slot; SEGMENT_LEN] {
    let mut slots = [None; SEGMENT_LEN];
    let offset = SEGMENT_LEN - segment.len();
    for (slot, code) in slots[offset..].iter_mut().zip(segment.codes()) {
        *slot = Some(*code);
    }
    slots
}

/// Render a write of either or both halves
///
/// A half without a segment is copied verbatim from `retained`, unset slots
/// included.
pub fn render_write(
    retained: &DisplayBuffer,
    left: Option<&Segment>,
    right: Option<&Segment>,
) -> Render {
    let mut buffer = *retained;
    for (half, segment) in [(Half::Left, left), (Half::Right, right)] {
        if let Some(segment) = segment {
            buffer.set_half(half, align_right(segment));
        }
    }
    Render {
        transmit: buffer,
        retain: buffer,
    }
}

/// Render a clear of `zone`
///
/// Cleared slots show a dash and are unset in the retained state; the rest
/// is copied from `retained`.
pub fn render_clear(retained: &DisplayBuffer, zone: Zone) -> Render {
    let mut transmit = *retained;
    transmit.fill_zone(zone, Some(DigitCode::DASH));

    let mut retain = *retained;
    retain.fill_zone(zone, None);

    Render { transmit, retain }
}
