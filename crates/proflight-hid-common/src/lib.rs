//! Common HID utilities for the Pro Flight panel protocol implementations
//!
//! This crate provides the plumbing shared by the panel protocol crates:
//! byte-level report parsing/building helpers, device identity, and the
//! feature-report transport seam used to reach the physical device.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod report;
pub mod sink;

pub use device_info::*;
pub use report::*;
pub use sink::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProflightHidError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to write to device: {0}")]
    WriteError(String),

    #[error("Invalid report format: {0}")]
    InvalidReport(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ProflightHidResult<T> = Result<T, ProflightHidError>;

/// HID report type values as delivered by the host HID layer.
pub const HID_REPORT_TYPE_INPUT: u8 = 0;
pub const HID_REPORT_TYPE_OUTPUT: u8 = 1;
pub const HID_REPORT_TYPE_FEATURE: u8 = 2;
