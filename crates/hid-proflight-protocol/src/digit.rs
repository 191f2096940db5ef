//! Seven-segment digit codes and the character codec
//!
//! Each display cell holds one hardware digit code: values `0x00..=0x09` are
//! the digits, `0x0E` is the minus sign (Multi Panel only), `0x0F` is blank.
//! On the Radio Panel the high bit (`0x80`) lights the decimal point of the
//! cell and is orthogonal to the digit value; a `'.'` in input text folds
//! onto the previously emitted cell instead of consuming one.
//!
//! The codec is deliberately lossy toward input ("anything unrecognized is
//! blank") but exact in the other direction: every code the encoder can
//! produce re-encodes to itself after rendering.

use crate::DISPLAY_CELLS;
use serde::{Deserialize, Serialize};

/// Raw digit-code value for a blank cell.
pub const DIGIT_CODE_BLANK: u8 = 0x0F;
/// Raw digit-code value for the minus sign (Multi Panel displays only).
pub const DIGIT_CODE_MINUS: u8 = 0x0E;
/// Decimal-point flag, OR'd onto the code (Radio Panel displays only).
pub const DIGIT_CODE_DOT: u8 = 0x80;

/// One display cell as the hardware sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitCode(u8);

impl DigitCode {
    pub const BLANK: Self = Self(DIGIT_CODE_BLANK);
    pub const MINUS: Self = Self(DIGIT_CODE_MINUS);

    /// Code for a decimal digit. Values above 9 fall back to blank.
    pub fn digit(n: u8) -> Self {
        if n <= 9 { Self(n) } else { Self::BLANK }
    }

    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    /// The digit value, if this cell shows one (dot flag ignored).
    pub fn digit_value(self) -> Option<u8> {
        let base = self.0 & !DIGIT_CODE_DOT;
        (base <= 9).then_some(base)
    }

    pub fn is_blank(self) -> bool {
        self.0 & !DIGIT_CODE_DOT == DIGIT_CODE_BLANK
    }

    pub fn is_minus(self) -> bool {
        self.0 == DIGIT_CODE_MINUS
    }

    pub fn has_dot(self) -> bool {
        self.0 & DIGIT_CODE_DOT != 0
    }

    pub fn with_dot(self) -> Self {
        Self(self.0 | DIGIT_CODE_DOT)
    }
}

impl Default for DigitCode {
    /// A zeroed display shows nothing, not `00000`.
    fn default() -> Self {
        Self::BLANK
    }
}

/// Which panel's display hardware interprets the codes.
///
/// The Multi Panel understands the minus sign but has no decimal points; the
/// Radio Panel is the other way around and treats `'-'` as blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentCharset {
    Multipanel,
    Radiopanel,
}

impl SegmentCharset {
    /// Encode one printable character. `'.'` is handled at field level on the
    /// Radio Panel and is an unrecognized (blank) character here.
    pub fn encode_char(self, ch: char) -> DigitCode {
        match ch {
            '0'..='9' => DigitCode::digit(ch as u8 - b'0'),
            '-' if self == Self::Multipanel => DigitCode::MINUS,
            _ => DigitCode::BLANK,
        }
    }

    /// The base character for a cell; the dot flag is rendered separately.
    pub fn decode_char(self, code: DigitCode) -> char {
        if code.is_minus() && self == Self::Multipanel {
            return '-';
        }
        match code.digit_value() {
            Some(n) => (b'0' + n) as char,
            None => ' ',
        }
    }

    /// Encode text left-to-right into exactly [`DISPLAY_CELLS`] codes:
    /// short input is blank-padded, excess input is ignored. On the Radio
    /// Panel a `'.'` sets the dot flag on the previous emitted cell (dropped
    /// if nothing was emitted yet), even when all cells are already full.
    pub fn encode_field(self, text: &str) -> [DigitCode; DISPLAY_CELLS] {
        let mut field = [DigitCode::BLANK; DISPLAY_CELLS];
        let mut emitted = 0usize;
        for ch in text.chars() {
            if ch == '.' && self == Self::Radiopanel {
                if let Some(prev) = emitted.checked_sub(1).and_then(|i| field.get_mut(i)) {
                    *prev = prev.with_dot();
                }
                continue;
            }
            if let Some(cell) = field.get_mut(emitted) {
                *cell = self.encode_char(ch);
                emitted += 1;
            }
        }
        field
    }

    /// Render a field back to text. Radio Panel dots expand the output, so a
    /// 5-cell field renders to between 5 and 10 characters.
    pub fn render_field(self, field: &[DigitCode; DISPLAY_CELLS]) -> String {
        let mut out = String::with_capacity(DISPLAY_CELLS * 2);
        for code in field {
            out.push(self.decode_char(*code));
            if self == Self::Radiopanel && code.has_dot() {
                out.push('.');
            }
        }
        out
    }
}
