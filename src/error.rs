//! Unified error type for deskclock.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Bus
    /// An I²C transaction with a peripheral failed.
    Bus,

    // Settings
    /// The stored settings record does not start with the magic number.
    BadMagic,

    /// The stored settings checksum does not match its payload.
    BadChecksum,

    /// A stored settings field is out of range.
    InvalidField,

    /// Read-back after a settings write differs from what was written.
    VerifyMismatch,

    // Time-keeping
    /// The RTC returned a date/time that is not a valid calendar value.
    InvalidDateTime,

    // Sensor
    /// The climate sensor reported it is still busy or uncalibrated.
    SensorNotReady,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl Error {
    /// Short label used in log lines.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::Bus => "bus",
            Error::BadMagic => "bad magic",
            Error::BadChecksum => "bad checksum",
            Error::InvalidField => "invalid field",
            Error::VerifyMismatch => "verify mismatch",
            Error::InvalidDateTime => "invalid date/time",
            Error::SensorNotReady => "sensor not ready",
            Error::BufferOverflow => "buffer overflow",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
