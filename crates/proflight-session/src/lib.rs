//! Device sessions for Saitek Pro Flight panels
//!
//! One [`DeviceSession`] per attached panel: it owns the decoded panel
//! state behind a reader/writer lock, dispatches raw input reports and
//! text-interface calls to the right codec for its product type, and pushes
//! built feature reports to the transport collaborator. Sessions are created
//! when a panel attaches and dropped when it detaches; nothing persists.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod session;

pub use session::*;

use hid_proflight_protocol::ProflightError;
use proflight_hid_common::ProflightHidError;
use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProflightError),

    #[error("Feature report transmission failed: {0}")]
    Transport(#[from] ProflightHidError),

    #[error("Not a supported Pro Flight panel: {vendor_id:04x}:{product_id:04x}")]
    UnsupportedDevice { vendor_id: u16, product_id: u16 },
}

pub type SessionResult<T> = Result<T, SessionError>;
