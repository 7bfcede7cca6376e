//! Core session operations
//!
//! [`Lcd`] owns the transport and the batch buffer and maps logical
//! display operations onto batched control transfers. See the crate docs
//! for a usage example.

use log::{debug, trace};

use crate::batch::{Batch, Frame};
use crate::command::{
    CLEAR_DISPLAY, COMMAND, DATA, ECHO, GET_CONTROLLERS, GET_FIRMWARE_VERSION, GET_KEYS,
    GLYPH_COUNT, GLYPH_ROWS, RETURN_HOME, ROW_BASE_ADDR, SET_BRIGHTNESS, SET_CGRAM_ADDR,
    SET_CONTRAST, Target,
};
use crate::config::Config;
use crate::error::Error;
use crate::status::{Controllers, Keys, Version};
use crate::transport::ControlTransport;

type LcdResult<T> = core::result::Result<(), Error<T>>;

/// Horizontal alignment for the row-fill helpers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right
    #[default]
    Left,
    /// Pad on both sides; an odd leftover column goes to the right
    Center,
    /// Pad on the left
    Right,
}

/// Session handle for an HD44780 panel behind the adapter
///
/// One `Lcd` owns one open transport and the batch buffer tied to it.
/// All display-mutating methods go through the batcher; status reads and
/// analog sets are single-shot transfers, issued after flushing whatever
/// is pending so operations reach the adapter in call order.
///
/// Dropping a session with unflushed bytes loses them. Call
/// [`flush`](Self::flush) after buffering raw commands, or tear down with
/// [`release`](Self::release), which flushes and returns the transport.
pub struct Lcd<T>
where
    T: ControlTransport,
{
    /// Open transport to the adapter
    transport: T,
    /// Pending same-type payload bytes
    batch: Batch,
    /// Session configuration
    config: Config,
    /// Controller presence, probed once at session start
    controllers: Controllers,
}

impl<T> Lcd<T>
where
    T: ControlTransport,
{
    /// Open a session with the default configuration
    ///
    /// # Errors
    ///
    /// Fails if the controller presence probe fails; the transport is
    /// consumed either way.
    pub fn new(transport: T) -> Result<Self, Error<T>> {
        Self::with_config(transport, Config::default())
    }

    /// Open a session with the given configuration
    ///
    /// Probes the adapter once for the controller presence mask; the
    /// result is cached and available through
    /// [`controllers`](Self::controllers).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::ShortRead`] if the probe
    /// fails.
    pub fn with_config(mut transport: T, config: Config) -> Result<Self, Error<T>> {
        let word = get_word(&mut transport, GET_CONTROLLERS, 0, config.timeout_ms)?;
        let controllers = Controllers::from_mask(word);
        debug!(
            "session open: controller 0 {}, controller 1 {}",
            controllers.controller_0, controllers.controller_1
        );

        Ok(Self {
            transport,
            batch: Batch::new(),
            config,
            controllers,
        })
    }

    /// Controller chips detected when the session was opened
    pub fn controllers(&self) -> Controllers {
        self.controllers
    }

    /// Session configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the control-transfer timeout in milliseconds
    pub fn set_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    /// Send any pending batched bytes to the adapter
    ///
    /// A no-op when nothing is pending. The buffer is empty afterwards
    /// even if the transfer fails; failed bytes are not replayed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the transfer fails.
    pub fn flush(&mut self) -> LcdResult<T> {
        match self.batch.take() {
            Some(frame) => self.send(frame),
            None => Ok(()),
        }
    }

    /// Issue an HD44780 instruction byte to both controllers
    ///
    /// The byte is batched; it reaches the adapter on the next flush,
    /// type change or full buffer. See the HD44780 datasheet for the
    /// instruction set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if an implied flush fails.
    pub fn command(&mut self, command: u8) -> LcdResult<T> {
        self.command_to(Target::BOTH, command)
    }

    /// Issue an HD44780 instruction byte to the selected controllers
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if an implied flush fails.
    pub fn command_to(&mut self, target: Target, command: u8) -> LcdResult<T> {
        self.enqueue(COMMAND | target.bits(), command)
    }

    /// Write text at the current cursor position
    ///
    /// Bytes are sent verbatim; the panel's character ROM decides what
    /// non-ASCII values look like. The whole string is on the wire when
    /// this returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn write(&mut self, text: &str) -> LcdResult<T> {
        self.write_bytes(text.as_bytes())
    }

    /// Write raw data bytes at the current cursor position
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn write_bytes(&mut self, data: &[u8]) -> LcdResult<T> {
        self.write_bytes_to(Target::BOTH, data)
    }

    /// Write raw data bytes to the selected controllers
    ///
    /// Ends with an explicit flush so the data is fully sent before the
    /// caller's next step (e.g. a button-state read).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn write_bytes_to(&mut self, target: Target, data: &[u8]) -> LcdResult<T> {
        let tag = DATA | target.bits();
        for &byte in data {
            self.enqueue(tag, byte)?;
        }
        self.flush()
    }

    /// Move the cursor to a column and row
    ///
    /// Rows beyond 3 fall back to row 0; that is the documented behavior
    /// of the fixed four-row address map, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if an implied flush fails.
    pub fn goto(&mut self, column: u8, row: u8) -> LcdResult<T> {
        let base = ROW_BASE_ADDR
            .get(usize::from(row))
            .copied()
            .unwrap_or(ROW_BASE_ADDR[0]);
        self.command(base.wrapping_add(column))
    }

    /// Move the cursor to address 0
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if an implied flush fails.
    pub fn home(&mut self) -> LcdResult<T> {
        self.command(RETURN_HOME)
    }

    /// Clear the display and move the cursor to the top-left corner
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn clear(&mut self) -> LcdResult<T> {
        self.command(CLEAR_DISPLAY)?;
        self.goto(0, 0)?;
        self.flush()
    }

    /// Write text starting at a column and row
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn write_at(&mut self, column: u8, row: u8, text: &str) -> LcdResult<T> {
        self.goto(column, row)?;
        self.write(text)
    }

    /// Fill one row with text, padded with spaces to the configured width
    ///
    /// Text longer than the width is truncated. With [`Align::Center`],
    /// an odd leftover column goes to the right of the text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn fill_row(&mut self, row: u8, align: Align, text: &str) -> LcdResult<T> {
        let width = usize::from(self.config.width);
        let bytes = text.as_bytes();
        let visible = bytes.len().min(width);
        let pad = width - visible;
        let (left, right) = match align {
            Align::Left => (0, pad),
            Align::Center => (pad / 2, pad - pad / 2),
            Align::Right => (pad, 0),
        };

        let tag = DATA | Target::BOTH.bits();
        self.goto(0, row)?;
        for _ in 0..left {
            self.enqueue(tag, b' ')?;
        }
        for &byte in &bytes[..visible] {
            self.enqueue(tag, byte)?;
        }
        for _ in 0..right {
            self.enqueue(tag, b' ')?;
        }
        self.flush()
    }

    /// Record a custom glyph into one of the eight CGRAM slots
    ///
    /// Each byte's low 5 bits are the pixel columns of one character row,
    /// top to bottom. The glyph appears in DDRAM as character code
    /// `slot`. The address-select command is forced onto the wire before
    /// the pixel data by the batcher's type-change rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGlyphSlot`] for slots beyond 7 without
    /// touching the adapter, or [`Error::Transport`] if a transfer fails.
    pub fn define_glyph(&mut self, slot: u8, rows: &[u8; GLYPH_ROWS]) -> LcdResult<T> {
        if slot >= GLYPH_COUNT {
            return Err(Error::InvalidGlyphSlot { slot });
        }
        self.command(SET_CGRAM_ADDR | (slot << 3))?;
        self.write_bytes(rows)
    }

    /// Set the LCD drive contrast
    ///
    /// The visible result depends on the panel. Any pending batch is
    /// flushed first so the change lands in call order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn set_contrast(&mut self, value: u8) -> LcdResult<T> {
        self.flush()?;
        self.set(SET_CONTRAST, value.into())
    }

    /// Set the backlight brightness (0 = off)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if a transfer fails.
    pub fn set_brightness(&mut self, value: u8) -> LcdResult<T> {
        self.flush()?;
        self.set(SET_BRIGHTNESS, value.into())
    }

    /// Send a 16-bit value through the adapter's echo request
    ///
    /// The adapter returns the value unchanged; comparing it against what
    /// was sent checks link reliability. Any pending batch is flushed
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::ShortRead`] if the
    /// round trip fails — a failure is never reported as a value.
    pub fn echo(&mut self, value: u16) -> Result<u16, Error<T>> {
        self.flush()?;
        get_word(&mut self.transport, ECHO, value, self.config.timeout_ms)
    }

    /// Read the adapter's firmware version
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::ShortRead`] if the read
    /// fails.
    pub fn firmware_version(&mut self) -> Result<Version, Error<T>> {
        self.flush()?;
        let word = get_word(
            &mut self.transport,
            GET_FIRMWARE_VERSION,
            0,
            self.config.timeout_ms,
        )?;
        Ok(Version::from_word(word))
    }

    /// Read the state of the adapter's two buttons
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] or [`Error::ShortRead`] if the read
    /// fails.
    pub fn keys(&mut self) -> Result<Keys, Error<T>> {
        self.flush()?;
        let word = get_word(&mut self.transport, GET_KEYS, 0, self.config.timeout_ms)?;
        Ok(Keys::from_mask(word))
    }

    /// Flush pending bytes and hand the transport back
    ///
    /// The guaranteed-flush teardown path: nothing buffered is lost. On a
    /// failed final flush the transport is dropped with the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the final flush fails.
    pub fn release(mut self) -> Result<T, Error<T>> {
        self.flush()?;
        Ok(self.transport)
    }

    /// Run one byte through the batcher, sending any closed run
    fn enqueue(&mut self, tag: u8, byte: u8) -> LcdResult<T> {
        match self.batch.push(tag, byte) {
            Some(frame) => self.send(frame),
            None => Ok(()),
        }
    }

    /// Put one encoded frame on the wire
    fn send(&mut self, frame: Frame) -> LcdResult<T> {
        trace!(
            "control out: request {:#04x}, value {:#06x}, index {:#06x}",
            frame.request, frame.value, frame.index
        );
        self.transport
            .control_out(frame.request, frame.value, frame.index, self.config.timeout_ms)
            .map_err(Error::Transport)?;
        Ok(())
    }

    /// Issue one single-shot set transfer, bypassing the batcher
    fn set(&mut self, request: u8, value: u16) -> LcdResult<T> {
        trace!("control out: request {:#04x}, value {:#06x}", request, value);
        self.transport
            .control_out(request, value, 0, self.config.timeout_ms)
            .map_err(Error::Transport)?;
        Ok(())
    }
}

/// Read one 16-bit little-endian status word from the adapter
fn get_word<T>(
    transport: &mut T,
    request: u8,
    value: u16,
    timeout_ms: u32,
) -> Result<u16, Error<T>>
where
    T: ControlTransport,
{
    let mut buf = [0u8; 2];
    let n = transport
        .control_in(request, value, 0, &mut buf, timeout_ms)
        .map_err(Error::Transport)?;
    if n < buf.len() {
        return Err(Error::ShortRead {
            expected: buf.len(),
            actual: n,
        });
    }
    trace!("control in: request {:#04x} -> {:#06x}", request, u16::from_le_bytes(buf));
    Ok(u16::from_le_bytes(buf))
}
