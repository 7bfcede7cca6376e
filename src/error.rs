//! Error types for the driver
//!
//! - [`Error`] - Runtime errors during session operations
//! - [`BuilderError`] - Errors during configuration construction
//!
//! Every transport failure surfaces to the caller; nothing is swallowed
//! and no operation encodes failure as an in-band value. The driver
//! performs no retries — callers that need resilience retry whole logical
//! operations, accepting that already-flushed display bytes may be sent
//! again.

use crate::config::MAX_WIDTH;
use crate::transport::ControlTransport;

/// Errors that can occur when talking to the adapter
///
/// Generic over the transport type to preserve the specific error type.
/// This allows error handling code to match on the underlying USB error.
#[derive(Debug)]
pub enum Error<T: ControlTransport> {
    /// Control transfer failure (USB stall, disconnect, timeout)
    ///
    /// Wraps the underlying error from the [`ControlTransport`]
    /// implementation. Any pending batch was emptied before the transfer
    /// was attempted, so the session stays usable.
    Transport(T::Error),
    /// A status read returned fewer bytes than the 2-byte status word
    ShortRead {
        /// Bytes the status word requires
        expected: usize,
        /// Bytes the transfer actually produced
        actual: usize,
    },
    /// Glyph slot outside the CGRAM range 0..=7
    InvalidGlyphSlot {
        /// Slot that was requested
        slot: u8,
    },
}

impl<T: ControlTransport> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "USB transport error: {e:?}"),
            Self::ShortRead { expected, actual } => {
                write!(f, "Short status read: expected {expected} bytes, got {actual}")
            }
            Self::InvalidGlyphSlot { slot } => {
                write!(f, "Invalid glyph slot {slot} (CGRAM has slots 0..=7)")
            }
        }
    }
}

impl<T: ControlTransport + core::fmt::Debug> core::error::Error for Error<T> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Display width outside 1..=40 characters
    ///
    /// The HD44780 DDRAM holds at most 40 characters per row under the
    /// fixed four-row address map.
    InvalidWidth {
        /// Width that was requested
        width: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidWidth { width } => {
                write!(f, "Invalid display width {width} (must be 1..={MAX_WIDTH})")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
