//! Shared type definitions for the panel codecs

use serde::{Deserialize, Serialize};

/// Result of offering a raw report to a panel codec.
///
/// `Passthrough` means the report id/type is not ours and the host HID layer
/// should keep processing it by other means. It is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeOutcome {
    Handled,
    Passthrough,
}

/// Accumulator reset policy.
///
/// Under `ResetOnRead` (the default for a freshly attached panel), formatting
/// the status text zeroes every press counter and encoder value as a side
/// effect of the read. Under `Normal` the accumulators persist across reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetMode {
    Normal,
    #[default]
    ResetOnRead,
}

impl ResetMode {
    pub fn as_char(self) -> char {
        match self {
            Self::Normal => 'N',
            Self::ResetOnRead => 'R',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Self::Normal),
            'R' => Some(Self::ResetOnRead),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_mode_chars() {
        assert_eq!(ResetMode::Normal.as_char(), 'N');
        assert_eq!(ResetMode::ResetOnRead.as_char(), 'R');
        assert_eq!(ResetMode::from_char('N'), Some(ResetMode::Normal));
        assert_eq!(ResetMode::from_char('R'), Some(ResetMode::ResetOnRead));
        assert_eq!(ResetMode::from_char('x'), None);
    }

    #[test]
    fn test_reset_mode_default() {
        assert_eq!(ResetMode::default(), ResetMode::ResetOnRead);
    }
}
