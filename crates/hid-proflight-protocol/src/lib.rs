//! HID protocol implementation for Saitek Pro Flight cockpit panels.
//!
//! This crate provides the bidirectional codec for two panels:
//! - Pro Flight Multi Panel (autopilot switch panel, PID `0x0D06`)
//! - Pro Flight Radio Panel (dual radio stack, PID `0x0D05`)
//!
//! ## Protocol Notes
//!
//! Both panels speak a small fixed-layout binary protocol:
//!
//! - **Input reports** (report id 0, type 0, ≥3 bytes) carry the raw levels
//!   of the mode selector, switches and rotary encoder phases. Switch and
//!   encoder activity is accumulated edge-triggered and saturating — a bit
//!   held high across reports counts once, a press counter stops at 9 and an
//!   encoder value clamps at ±99. Reports with any other id or type are not
//!   ours and are passed through untouched.
//! - **Feature reports** (13 bytes Multipanel / 23 bytes Radiopanel) drive
//!   the seven-segment display fields and, on the Multipanel, the indicator
//!   LEDs. The byte layout is fixed by the hardware; see [`multipanel`] and
//!   [`radiopanel`] for the exact offsets.
//! - **Status text** is a fixed-offset, human-editable dump of the panel
//!   state that round-trips exactly through the display portion. Writes are
//!   22 characters (Multipanel) or 45 characters (Radiopanel).
//!
//! The codecs are pure CPU transforms: no I/O, no locking, no allocation
//! beyond the returned buffers. Session ownership and the reader/writer
//! discipline live in `proflight-session`.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod accumulator;
pub mod digit;
pub mod ids;
pub mod multipanel;
pub mod radiopanel;
pub mod types;

pub use accumulator::*;
pub use digit::*;
pub use ids::*;
pub use multipanel::*;
pub use radiopanel::*;
pub use types::*;

use proflight_hid_common::ProflightHidError;
use thiserror::Error;

/// Errors returned by Pro Flight protocol operations.
#[derive(Error, Debug)]
pub enum ProflightError {
    #[error("Invalid report size: expected at least {expected}, got {actual}")]
    InvalidReportSize { expected: usize, actual: usize },

    #[error("Status text too short: expected {expected} characters, got {actual}")]
    TextTooShort { expected: usize, actual: usize },

    #[error("Invalid report: {0}")]
    InvalidReport(String),
}

/// Convenience result alias for Pro Flight protocol operations.
pub type ProflightResult<T> = Result<T, ProflightError>;

impl From<ProflightHidError> for ProflightError {
    fn from(e: ProflightHidError) -> Self {
        ProflightError::InvalidReport(e.to_string())
    }
}

/// Report id both panels use for input reports (and for feature reports —
/// byte 0 of every outgoing buffer).
pub const INPUT_REPORT_ID: u8 = 0;

/// Minimum input-report payload both panels require.
pub const INPUT_REPORT_MIN_BYTES: usize = 3;

/// Number of character cells in one seven-segment display field.
pub const DISPLAY_CELLS: usize = 5;

/// Feature-report length for the Multi Panel (id byte + 2×5 digit codes +
/// LED mask + reserved).
pub const FEATURE_REPORT_SIZE_MULTIPANEL: usize = 13;

/// Feature-report length for the Radio Panel (id byte + 4×5 digit codes +
/// 2 reserved).
pub const FEATURE_REPORT_SIZE_RADIOPANEL: usize = 23;

/// Consumable characters in a Multi Panel status-text write.
pub const TEXT_WRITE_SIZE_MULTIPANEL: usize = 22;

/// Consumable characters in a Radio Panel status-text write.
pub const TEXT_WRITE_SIZE_RADIOPANEL: usize = 45;
