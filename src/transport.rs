//! USB transport abstraction
//!
//! This module provides the [`ControlTransport`] trait, the seam between
//! the driver and whatever performs the actual USB control transfers
//! (a libusb wrapper on a host, a recorded mock in tests).
//!
//! The adapter uses no bulk or interrupt endpoints: the entire protocol
//! rides on vendor-class control transfers addressed to the device. An
//! implementation maps the trait methods onto the platform's control
//! transfer primitive as follows:
//!
//! - [`control_out`](ControlTransport::control_out): host-to-device,
//!   request type vendor, recipient device, no payload stage. The request
//!   byte and the 16-bit `value`/`index` fields carry everything.
//! - [`control_in`](ControlTransport::control_in): device-to-host,
//!   request type vendor, recipient device, reading `buf.len()` bytes.
//!
//! Device discovery, open and close are the implementation's business;
//! [`VENDOR_ID`]/[`PRODUCT_ID`] identify the adapter on the bus. Both
//! methods block until the transfer completes or the timeout expires, and
//! a timeout is reported through the implementation's ordinary error type.
//!
//! ## Example
//!
//! ```
//! use lcd2usb::ControlTransport;
//!
//! /// A transport that accepts everything and reads back zeroes.
//! struct NullTransport;
//!
//! impl ControlTransport for NullTransport {
//!     type Error = core::convert::Infallible;
//!
//!     fn control_out(
//!         &mut self,
//!         _request: u8,
//!         _value: u16,
//!         _index: u16,
//!         _timeout_ms: u32,
//!     ) -> Result<usize, Self::Error> {
//!         Ok(0)
//!     }
//!
//!     fn control_in(
//!         &mut self,
//!         _request: u8,
//!         _value: u16,
//!         _index: u16,
//!         buf: &mut [u8],
//!         _timeout_ms: u32,
//!     ) -> Result<usize, Self::Error> {
//!         buf.fill(0);
//!         Ok(buf.len())
//!     }
//! }
//! ```

use core::fmt::Debug;

/// USB vendor ID of the adapter
pub const VENDOR_ID: u16 = 0x0403;

/// USB product ID of the adapter
pub const PRODUCT_ID: u16 = 0xC630;

/// Default control-transfer timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u32 = 1_000;

/// Trait for the control-transfer primitive to the adapter
///
/// This trait abstracts over different USB stacks, allowing
/// [`Lcd`](crate::display::Lcd) to work with any implementation that can
/// issue vendor control transfers to an open device handle.
///
/// Both methods return the number of bytes transferred. The driver never
/// retries a failed transfer; errors propagate to the caller unchanged,
/// wrapped in [`Error::Transport`](crate::error::Error::Transport).
pub trait ControlTransport {
    /// Error type for transfer failures (stall, disconnect, timeout)
    ///
    /// Must implement [`Debug`] for error reporting. The driver does not
    /// distinguish timeouts from other I/O failures.
    type Error: Debug;

    /// Issue one host-to-device vendor control transfer with no payload
    ///
    /// # Errors
    ///
    /// Returns the implementation's error if the transfer fails or times
    /// out.
    fn control_out(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        timeout_ms: u32,
    ) -> Result<usize, Self::Error>;

    /// Issue one device-to-host vendor control transfer reading into `buf`
    ///
    /// # Errors
    ///
    /// Returns the implementation's error if the transfer fails or times
    /// out. A short read is not an error at this level; the driver checks
    /// the returned length.
    fn control_in(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<usize, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_usb_identification() {
        assert_eq!(VENDOR_ID, 0x0403);
        assert_eq!(PRODUCT_ID, 0xC630);
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(DEFAULT_TIMEOUT_MS, 1_000);
    }
}
