//! Device IDs for Saitek Pro Flight panels
//!
//! Saitek (later Logitech G) flight-sim peripherals share VID `0x06A3`.
//! The two panels handled here are distinguished by product ID.

use crate::{FEATURE_REPORT_SIZE_MULTIPANEL, FEATURE_REPORT_SIZE_RADIOPANEL};
use crate::{TEXT_WRITE_SIZE_MULTIPANEL, TEXT_WRITE_SIZE_RADIOPANEL};
use serde::{Deserialize, Serialize};

/// Saitek USB Vendor ID.
pub const SAITEK_VENDOR_ID: u16 = 0x06A3;

/// Pro Flight Radio Panel.
pub const PROFLIGHT_RADIOPANEL_PID: u16 = 0x0D05;
/// Pro Flight Multi Panel.
pub const PROFLIGHT_MULTIPANEL_PID: u16 = 0x0D06;

/// Return `true` if the vendor id belongs to Saitek.
pub fn is_saitek_device(vendor_id: u16) -> bool {
    vendor_id == SAITEK_VENDOR_ID
}

/// Product tag, fixed when a panel attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Multipanel,
    Radiopanel,
}

impl PanelKind {
    pub fn from_product_id(product_id: u16) -> Option<Self> {
        match product_id {
            PROFLIGHT_MULTIPANEL_PID => Some(Self::Multipanel),
            PROFLIGHT_RADIOPANEL_PID => Some(Self::Radiopanel),
            _ => None,
        }
    }

    pub fn product_id(self) -> u16 {
        match self {
            Self::Multipanel => PROFLIGHT_MULTIPANEL_PID,
            Self::Radiopanel => PROFLIGHT_RADIOPANEL_PID,
        }
    }

    /// Length of the outgoing feature report for this product.
    pub fn feature_report_size(self) -> usize {
        match self {
            Self::Multipanel => FEATURE_REPORT_SIZE_MULTIPANEL,
            Self::Radiopanel => FEATURE_REPORT_SIZE_RADIOPANEL,
        }
    }

    /// Consumable characters in a status-text write for this product.
    pub fn text_write_size(self) -> usize {
        match self {
            Self::Multipanel => TEXT_WRITE_SIZE_MULTIPANEL,
            Self::Radiopanel => TEXT_WRITE_SIZE_RADIOPANEL,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Multipanel => "Saitek Pro Flight Multi Panel",
            Self::Radiopanel => "Saitek Pro Flight Radio Panel",
        }
    }
}
