//! Session configuration types and builder

pub use crate::error::BuilderError;
use crate::transport::DEFAULT_TIMEOUT_MS;

/// Widest HD44780 row addressable under the four-row address map
pub const MAX_WIDTH: u8 = 40;

/// Default display width in characters
pub const DEFAULT_WIDTH: u8 = 20;

/// Session configuration
///
/// Use [`Builder`] to construct a validated `Config`, or
/// [`Config::default`] for a 20-character panel with the default
/// transfer timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display width in characters (used by the row-fill helpers)
    pub width: u8,
    /// Control-transfer timeout in milliseconds
    pub timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Builder for constructing session configuration
///
/// # Example
///
/// ```
/// use lcd2usb::Builder;
///
/// let config = match Builder::new().width(16).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.width, 16);
/// ```
#[must_use]
#[derive(Debug)]
pub struct Builder {
    /// Display width in characters
    width: u8,
    /// Control-transfer timeout in milliseconds
    timeout_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Builder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display width in characters (1..=40)
    pub fn width(mut self, width: u8) -> Self {
        self.width = width;
        self
    }

    /// Set the control-transfer timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidWidth`] if the width is 0 or larger
    /// than [`MAX_WIDTH`].
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(BuilderError::InvalidWidth { width: self.width });
        }
        Ok(Config {
            width: self.width,
            timeout_ms: self.timeout_ms,
        })
    }
}
