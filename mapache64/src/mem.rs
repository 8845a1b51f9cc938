//! # Memory Map
//!
//! | Range             | Use                                   |
//! |-------------------|---------------------------------------|
//! | `$0000-$00FF`     | Zero page (fast variables)            |
//! | `$0100-$01FF`     | Hardware stack                        |
//! | `$0200-$0213`     | Output buffer, 10 × 16-bit slots      |
//!
//! Everything above the output buffer belongs to the console's own map
//! (VRAM, controllers, ROM) and is not addressed by this crate.

use core::ops::Range;

pub const ZERO_PAGE: Range<u16> = 0x0000..0x0100;
pub const STACK: Range<u16> = 0x0100..0x0200;

/// Base of the output buffer the template fills during `reset`.
pub const OUTPUT_BUFFER: u16 = 0x0200;
pub const OUTPUT_SLOTS: usize = 10;
/// Bytes per slot. Slots hold a little-endian `i16`.
pub const SLOT_WIDTH: u16 = 2;

/// Address of output slot `index`, or `None` past the last slot.
#[inline]
pub const fn output_slot(index: usize) -> Option<u16> {
    if index < OUTPUT_SLOTS {
        Some(OUTPUT_BUFFER + index as u16 * SLOT_WIDTH)
    } else {
        None
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Region {
    ZeroPage,
    Stack,
    Ram,
}

impl Region {
    pub const fn of(addr: u16) -> Region {
        if addr < STACK.start {
            Region::ZeroPage
        } else if addr < STACK.end {
            Region::Stack
        } else {
            Region::Ram
        }
    }

    /// Zero page and stack are owned by the compiler runtime.
    pub const fn is_reserved(&self) -> bool {
        !matches!(self, Region::Ram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_contiguous_words() {
        assert_eq!(output_slot(0), Some(0x0200));
        assert_eq!(output_slot(1), Some(0x0202));
        assert_eq!(output_slot(9), Some(0x0212));
        assert_eq!(output_slot(10), None);
    }

    #[test]
    fn regions() {
        assert_eq!(Region::of(0x00FF), Region::ZeroPage);
        assert_eq!(Region::of(0x0100), Region::Stack);
        assert_eq!(Region::of(0x01FF), Region::Stack);
        assert_eq!(Region::of(OUTPUT_BUFFER), Region::Ram);
        assert!(Region::of(0x0042).is_reserved());
        assert!(!Region::of(0x8000).is_reserved());
    }
}
