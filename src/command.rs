//! LCD2USB request definitions
//!
//! This module defines the vendor request bytes understood by the adapter
//! firmware. Every transfer to or from the adapter is a single USB control
//! transfer whose request byte carries the operation class, the controller
//! target mask and, for batched transfers, the payload length:
//!
//! ```text
//!   bit  7 6 5 4 3 2 1 0
//!        C C C T T R L L
//! ```
//!
//! - `CCC` selects the operation class ([`ECHO`], [`COMMAND`], [`DATA`],
//!   [`SET`], [`GET`]), pre-shifted left by 5 in the constants below.
//! - `TT` is the controller [`Target`] mask for `COMMAND`/`DATA` requests.
//!   For `SET`/`GET` requests the same bits select a sub-operation instead
//!   (see [`SET_CONTRAST`], [`GET_FIRMWARE_VERSION`] and friends).
//! - `R` is reserved and must be 0.
//! - `LL` is the payload length minus one (1..=4 bytes) for batched
//!   `COMMAND`/`DATA` transfers; see [`crate::batch::Frame`].
//!
//! The module also defines the subset of HD44780 instruction bytes the
//! session layer issues itself. Anything else from the HD44780 instruction
//! set can be sent verbatim through [`Lcd::command`](crate::Lcd::command).

// Operation classes (bits 7..5 of the request byte)

/// Echo request class (`0 << 5`)
///
/// The adapter returns the transfer's 16-bit `value` field unchanged in a
/// 2-byte read. Useful as a link reliability check.
pub const ECHO: u8 = 0 << 5;

/// Display command class (`1 << 5`)
///
/// Payload bytes are written to the HD44780 instruction register of every
/// controller selected by the target mask.
pub const COMMAND: u8 = 1 << 5;

/// Display data class (`2 << 5`)
///
/// Payload bytes are written to the HD44780 data register (DDRAM or CGRAM,
/// depending on the last address-set command) of the targeted controllers.
pub const DATA: u8 = 2 << 5;

/// Analog set class (`3 << 5`)
pub const SET: u8 = 3 << 5;

/// Status get class (`4 << 5`)
pub const GET: u8 = 4 << 5;

// SET sub-operations (bits 4..3 select the value being set)

/// Set the LCD drive contrast (0..=255)
pub const SET_CONTRAST: u8 = SET | (0 << 3);

/// Set the backlight brightness (0 = off ..= 255)
pub const SET_BRIGHTNESS: u8 = SET | (1 << 3);

/// Reserved set slot, ignored by current firmware
pub const SET_RESERVED_0: u8 = SET | (2 << 3);

/// Reserved set slot, ignored by current firmware
pub const SET_RESERVED_1: u8 = SET | (3 << 3);

// GET sub-operations (bits 4..3 select the value being read)

/// Read the firmware version (low byte = major, high byte = minor)
pub const GET_FIRMWARE_VERSION: u8 = GET | (0 << 3);

/// Read the button state mask (bit 0 = button A, bit 1 = button B)
pub const GET_KEYS: u8 = GET | (1 << 3);

/// Read the controller presence mask (see [`crate::status::Controllers`])
pub const GET_CONTROLLERS: u8 = GET | (2 << 3);

/// Reserved get slot, ignored by current firmware
pub const GET_RESERVED_1: u8 = GET | (3 << 3);

/// Controller-chip target mask for [`COMMAND`] and [`DATA`] requests
///
/// Large character panels cascade two HD44780 controllers; the adapter
/// addresses them through bits 4..3 of the request byte. Masks combine
/// with `|`. The empty mask is accepted by the firmware and addresses no
/// controller at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target(u8);

impl Target {
    /// First controller chip
    pub const CONTROLLER_0: Self = Self(1 << 3);
    /// Second controller chip (only present on dual-controller panels)
    pub const CONTROLLER_1: Self = Self(1 << 4);
    /// Broadcast to both controllers
    pub const BOTH: Self = Self(Self::CONTROLLER_0.0 | Self::CONTROLLER_1.0);
    /// Address no controller; the transfer is accepted but has no effect
    pub const NONE: Self = Self(0);

    /// Mask bits as they appear in the request byte
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::BOTH
    }
}

impl core::ops::BitOr for Target {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// HD44780 instruction bytes issued by the session layer

/// Clear display instruction (0x01)
///
/// Blanks the DDRAM and resets the address counter.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home instruction (0x03)
///
/// Moves the cursor to address 0. The low bit is a don't-care for the
/// HD44780.
pub const RETURN_HOME: u8 = 0x03;

/// Set CGRAM address instruction base (0x40)
///
/// OR in `slot << 3` to address the first pixel row of a glyph slot.
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// DDRAM base address of each display row, set-address bit included
///
/// The four-row address map is fixed by the HD44780's row interleaving.
/// Rows beyond the table fall back to row 0.
pub const ROW_BASE_ADDR: [u8; 4] = [0x80, 0xC0, 0x94, 0xD4];

/// Number of user-definable glyph slots in CGRAM
pub const GLYPH_COUNT: u8 = 8;

/// Pixel rows per glyph; each byte's low 5 bits are one row, top to bottom
pub const GLYPH_ROWS: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_classes_are_disjoint() {
        let classes = [ECHO, COMMAND, DATA, SET, GET];
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_target_masks_combine() {
        assert_eq!(
            (Target::CONTROLLER_0 | Target::CONTROLLER_1).bits(),
            Target::BOTH.bits()
        );
        assert_eq!(Target::NONE.bits(), 0);
        assert_eq!(Target::default(), Target::BOTH);
    }

    #[test]
    fn test_sub_operations_keep_their_class() {
        assert_eq!(SET_CONTRAST & 0b1110_0000, SET);
        assert_eq!(SET_BRIGHTNESS & 0b1110_0000, SET);
        assert_eq!(GET_FIRMWARE_VERSION & 0b1110_0000, GET);
        assert_eq!(GET_KEYS & 0b1110_0000, GET);
        assert_eq!(GET_CONTROLLERS & 0b1110_0000, GET);
    }
}
