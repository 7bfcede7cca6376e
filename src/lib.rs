//! LCD2USB Character Display Driver
//!
//! A driver for HD44780-family character LCDs attached through the
//! LCD2USB adapter, a microcontroller bridge that carries the entire
//! display protocol over USB vendor control transfers.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - Transport-agnostic: bring any type implementing [`ControlTransport`]
//! - Command batching: consecutive same-type bytes coalesce into one
//!   control transfer carrying up to four payload bytes
//! - Single and dual-controller panels, up to 4 rows of 40 characters
//! - Custom CGRAM glyphs, contrast/brightness control, button readout
//!
//! ## Usage
//!
//! ```
//! use lcd2usb::{ControlTransport, Lcd};
//!
//! # struct MockUsb;
//! # impl ControlTransport for MockUsb {
//! #     type Error = core::convert::Infallible;
//! #     fn control_out(
//! #         &mut self,
//! #         _request: u8,
//! #         _value: u16,
//! #         _index: u16,
//! #         _timeout_ms: u32,
//! #     ) -> Result<usize, Self::Error> {
//! #         Ok(0)
//! #     }
//! #     fn control_in(
//! #         &mut self,
//! #         _request: u8,
//! #         _value: u16,
//! #         _index: u16,
//! #         buf: &mut [u8],
//! #         _timeout_ms: u32,
//! #     ) -> Result<usize, Self::Error> {
//! #         buf.copy_from_slice(&3u16.to_le_bytes());
//! #         Ok(buf.len())
//! #     }
//! # }
//! # let usb = MockUsb;
//! // `usb` is an open handle to the adapter, e.g. a libusb wrapper.
//! let mut lcd = match Lcd::new(usb) {
//!     Ok(lcd) => lcd,
//!     Err(_) => return,
//! };
//!
//! let _ = lcd.clear();
//! let _ = lcd.write("Hello");
//! let _ = lcd.write_at(0, 1, "world");
//!
//! // Tear down without losing buffered bytes.
//! let _usb = lcd.release();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Command batching and wire-request encoding
pub mod batch;
/// LCD2USB request definitions
pub mod command;
/// Session configuration types and builder
pub mod config;
/// Core session operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Decoded adapter status values
pub mod status;
/// USB transport abstraction
pub mod transport;

pub use batch::{Batch, Frame, MAX_BATCH};
pub use command::Target;
pub use config::{Builder, Config, DEFAULT_WIDTH, MAX_WIDTH};
pub use display::{Align, Lcd};
pub use error::{BuilderError, Error};
pub use status::{Controllers, Keys, Version};
pub use transport::{ControlTransport, DEFAULT_TIMEOUT_MS, PRODUCT_ID, VENDOR_ID};
