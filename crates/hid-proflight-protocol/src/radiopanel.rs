//! Pro Flight Radio Panel codec
//!
//! The Radio Panel is two identical radio stacks ("sides"), each with a
//! 7-position mode selector, an ACT/STBY button, a dual concentric rotary
//! knob (inner + outer) and two 5-cell display rows.
//!
//! Input report (id 0, type 0, 3 bytes), one byte per side:
//!
//! | Byte | Bits | Meaning |
//! |------|------|---------|
//! | 0 | 0–6 | side-0 selector, priority COM1 > COM2 > NAV1 > NAV2 > ADF > DME > XPDR |
//! | 0 | 7 | side-0 ACT/STBY |
//! | 1 | 0–6 / 7 | side 1, mirroring byte 0 |
//! | 2 | 0/1 | inner-0 right / left tick |
//! | 2 | 2/3 | outer-0 right / left tick |
//! | 2 | 4/5 | inner-1 right / left tick |
//! | 2 | 6/7 | outer-1 right / left tick |
//!
//! Feature report (23 bytes): id 0, the four display rows' codes at 1..6,
//! 6..11, 11..16 and 16..21 (side 0 rows first), reserved 0 at 21 and 22.

use crate::{
    DISPLAY_CELLS, DecodeOutcome, DigitCode, Encoder, FEATURE_REPORT_SIZE_RADIOPANEL,
    INPUT_REPORT_ID, INPUT_REPORT_MIN_BYTES, ProflightError, ProflightResult, ResetMode,
    SegmentCharset, Switch, TEXT_WRITE_SIZE_RADIOPANEL,
};
use proflight_hid_common::{HID_REPORT_TYPE_INPUT, ReportBuilder, ReportParser};
use serde::{Deserialize, Serialize};

// byte 0 / byte 1, per side
const MODE_COM1_BIT: u8 = 0x01;
const MODE_COM2_BIT: u8 = 0x02;
const MODE_NAV1_BIT: u8 = 0x04;
const MODE_NAV2_BIT: u8 = 0x08;
const MODE_ADF_BIT: u8 = 0x10;
const MODE_DME_BIT: u8 = 0x20;
const MODE_XPDR_BIT: u8 = 0x40;
const ACT_STBY_BIT: u8 = 0x80;

/// Rendered width of one display row in the status text. Decimal points can
/// expand a 5-cell row up to 10 characters; shorter renders are padded.
pub const RADIO_FIELD_TEXT_WIDTH: usize = 10;

/// Radio mode selector, derived per side each decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadioMode {
    /// No selector bit set. Representable but presumed never to occur on
    /// real hardware.
    #[default]
    None,
    Com1,
    Com2,
    Nav1,
    Nav2,
    Adf,
    Dme,
    Xpdr,
}

impl RadioMode {
    /// First set bit wins, COM1 through XPDR.
    pub fn from_bits(byte: u8) -> Self {
        if byte & MODE_COM1_BIT != 0 {
            Self::Com1
        } else if byte & MODE_COM2_BIT != 0 {
            Self::Com2
        } else if byte & MODE_NAV1_BIT != 0 {
            Self::Nav1
        } else if byte & MODE_NAV2_BIT != 0 {
            Self::Nav2
        } else if byte & MODE_ADF_BIT != 0 {
            Self::Adf
        } else if byte & MODE_DME_BIT != 0 {
            Self::Dme
        } else if byte & MODE_XPDR_BIT != 0 {
            Self::Xpdr
        } else {
            Self::None
        }
    }

    /// Fixed-width (4 character) label used by the status text.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "    ",
            Self::Com1 => "COM1",
            Self::Com2 => "COM2",
            Self::Nav1 => "NAV1",
            Self::Nav2 => "NAV2",
            Self::Adf => "ADF ",
            Self::Dme => "DME ",
            Self::Xpdr => "XPDR",
        }
    }
}

/// One radio stack: selector, ACT/STBY switch, dual knob, two display rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadioSide {
    pub mode: RadioMode,
    pub act_stby: Switch,
    pub inner: Encoder,
    pub outer: Encoder,
    pub displays: [[DigitCode; DISPLAY_CELLS]; 2],
}

/// Full decoded state of one attached Radio Panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadiopanelState {
    pub sides: [RadioSide; 2],
    pub reset_mode: ResetMode,
}

impl RadiopanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one raw input report. Same gate and length contract as the
    /// Multi Panel: foreign id/type passes through, under 3 bytes fails
    /// without mutating.
    ///
    /// # Errors
    /// Returns [`ProflightError::InvalidReportSize`] for short reports.
    pub fn decode(
        &mut self,
        report_id: u8,
        report_type: u8,
        data: &[u8],
    ) -> ProflightResult<DecodeOutcome> {
        if report_id != INPUT_REPORT_ID || report_type != HID_REPORT_TYPE_INPUT {
            return Ok(DecodeOutcome::Passthrough);
        }
        if data.len() < INPUT_REPORT_MIN_BYTES {
            return Err(ProflightError::InvalidReportSize {
                expected: INPUT_REPORT_MIN_BYTES,
                actual: data.len(),
            });
        }

        let mut parser = ReportParser::from_slice(data);
        let side_bytes = [parser.read_u8()?, parser.read_u8()?];
        let knobs = parser.read_u8()?;

        for (side, byte) in self.sides.iter_mut().zip(side_bytes) {
            side.mode = RadioMode::from_bits(byte);
            side.act_stby.update(byte & ACT_STBY_BIT != 0);
        }

        // Four encoder direction pairs, two bits each, side 0 first.
        for (i, side) in self.sides.iter_mut().enumerate() {
            let shift = 4 * i as u8;
            side.inner.update(
                knobs & (0x01 << shift) != 0,
                knobs & (0x02 << shift) != 0,
            );
            side.outer.update(
                knobs & (0x04 << shift) != 0,
                knobs & (0x08 << shift) != 0,
            );
        }

        Ok(DecodeOutcome::Handled)
    }

    /// Format the status text without side effects.
    ///
    /// Header line, fixed offsets: the four display rows rendered to 10
    /// characters each at 0, 11, 22 and 33, reset-mode character at 44 — so
    /// the first 45 characters are a valid text write. A verbose per-side
    /// section follows.
    pub fn format_text(&self) -> String {
        let charset = SegmentCharset::Radiopanel;
        let mut out = String::with_capacity(160);

        for side in &self.sides {
            for field in &side.displays {
                let rendered = charset.render_field(field);
                out.push_str(&format!("{rendered:<RADIO_FIELD_TEXT_WIDTH$}"));
                out.push(' ');
            }
        }
        out.push(self.reset_mode.as_char());
        out.push('\n');

        for (n, side) in self.sides.iter().enumerate() {
            out.push_str(&format!(
                "ACT-STBY-{n}:{}{}\n",
                if side.act_stby.pressed { "ON " } else { "OFF" },
                side.act_stby.presses
            ));
            out.push_str(&format!("INNER-{n}:{:3}\n", side.inner.value));
            out.push_str(&format!("OUTER-{n}:{:3}\n", side.outer.value));
            out.push_str(&format!("MODE-{n}:{}\n", side.mode.label()));
        }

        out
    }

    /// Format the status text, applying the reset-on-read policy afterwards.
    /// The caller must hold the write side of the session lock when the
    /// policy is active.
    pub fn read_text(&mut self) -> String {
        let text = self.format_text();
        if self.reset_mode == ResetMode::ResetOnRead {
            self.reset_accumulators();
        }
        text
    }

    /// Parse a text write: display rows at 0..10, 11..21, 22..32 and 33..43,
    /// reset-mode character at 44 (`'N'`/`'R'`, else unchanged). Separator
    /// positions are skipped, not validated. Excess characters are ignored;
    /// the session layer warns about them.
    ///
    /// # Errors
    /// Returns [`ProflightError::TextTooShort`] for input under 45
    /// characters, leaving the state unmodified.
    pub fn parse_text(&mut self, text: &str) -> ProflightResult<()> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < TEXT_WRITE_SIZE_RADIOPANEL {
            return Err(ProflightError::TextTooShort {
                expected: TEXT_WRITE_SIZE_RADIOPANEL,
                actual: chars.len(),
            });
        }

        let charset = SegmentCharset::Radiopanel;
        for (i, side) in self.sides.iter_mut().enumerate() {
            for (j, field) in side.displays.iter_mut().enumerate() {
                let offset = (2 * i + j) * (RADIO_FIELD_TEXT_WIDTH + 1);
                let raw: String = chars[offset..offset + RADIO_FIELD_TEXT_WIDTH]
                    .iter()
                    .collect();
                *field = charset.encode_field(&raw);
            }
        }

        if let Some(mode) = ResetMode::from_char(chars[44]) {
            self.reset_mode = mode;
        }

        Ok(())
    }

    /// Build the 23-byte feature report driving the four display rows.
    pub fn build_report(&self) -> Vec<u8> {
        let mut builder = ReportBuilder::with_capacity(FEATURE_REPORT_SIZE_RADIOPANEL);
        builder.write_u8(INPUT_REPORT_ID);
        for side in &self.sides {
            for field in &side.displays {
                for cell in field {
                    builder.write_u8(cell.raw());
                }
            }
        }
        builder.pad_to(FEATURE_REPORT_SIZE_RADIOPANEL);
        builder.into_inner()
    }

    /// Zero every accumulator on both sides, preserving edge memory.
    pub fn reset_accumulators(&mut self) {
        for side in &mut self.sides {
            side.act_stby.reset();
            side.inner.reset();
            side.outer.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_priority() {
        assert_eq!(RadioMode::from_bits(0x03), RadioMode::Com1);
        assert_eq!(RadioMode::from_bits(0x60), RadioMode::Dme);
        assert_eq!(RadioMode::from_bits(0x40), RadioMode::Xpdr);
        assert_eq!(RadioMode::from_bits(0x00), RadioMode::None);
        // ACT/STBY bit does not leak into the mode scan.
        assert_eq!(RadioMode::from_bits(0x80), RadioMode::None);
    }

    #[test]
    fn test_sides_decode_independently() {
        let mut state = RadiopanelState::new();

        // Side 0 on NAV1 with ACT/STBY pressed; side 1 on XPDR.
        state.decode(0, 0, &[0x84, 0x40, 0x00]).expect("decode");
        assert_eq!(state.sides[0].mode, RadioMode::Nav1);
        assert!(state.sides[0].act_stby.pressed);
        assert_eq!(state.sides[0].act_stby.presses, 1);
        assert_eq!(state.sides[1].mode, RadioMode::Xpdr);
        assert!(!state.sides[1].act_stby.pressed);
        assert_eq!(state.sides[1].act_stby.presses, 0);
    }

    #[test]
    fn test_encoder_pairs() {
        let mut state = RadiopanelState::new();

        // inner-0 right, outer-0 left, inner-1 left, outer-1 right.
        state.decode(0, 0, &[0x00, 0x00, 0x69]).expect("decode");
        assert_eq!(state.sides[0].inner.value, 1);
        assert_eq!(state.sides[0].outer.value, -1);
        assert_eq!(state.sides[1].inner.value, -1);
        assert_eq!(state.sides[1].outer.value, 1);

        // Held bits do not re-count.
        state.decode(0, 0, &[0x00, 0x00, 0x69]).expect("decode");
        assert_eq!(state.sides[0].inner.value, 1);
        assert_eq!(state.sides[1].outer.value, 1);
    }

    #[test]
    fn test_short_report_fails_without_mutation() {
        let mut state = RadiopanelState::new();
        let before = state.clone();
        assert!(matches!(
            state.decode(0, 0, &[0x01]),
            Err(ProflightError::InvalidReportSize {
                expected: 3,
                actual: 1
            })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_foreign_report_passthrough() {
        let mut state = RadiopanelState::new();
        let before = state.clone();
        let outcome = state
            .decode(3, 0, &[0xFF, 0xFF, 0xFF])
            .expect("passthrough is not an error");
        assert_eq!(outcome, DecodeOutcome::Passthrough);
        assert_eq!(state, before);
    }

    #[test]
    fn test_parse_text_contract() {
        let mut state = RadiopanelState::new();
        let text = "118.25     118.70     1100       12.3       R";
        assert_eq!(text.len(), 45);
        state.parse_text(text).expect("45-char write");

        let charset = SegmentCharset::Radiopanel;
        assert_eq!(state.sides[0].displays[0], charset.encode_field("118.25"));
        assert_eq!(state.sides[0].displays[1], charset.encode_field("118.70"));
        assert_eq!(state.sides[1].displays[0], charset.encode_field("1100"));
        assert_eq!(state.sides[1].displays[1], charset.encode_field("12.3"));
        assert_eq!(state.reset_mode, ResetMode::ResetOnRead);

        let short = &text[..44];
        let mut untouched = RadiopanelState::new();
        assert!(matches!(
            untouched.parse_text(short),
            Err(ProflightError::TextTooShort {
                expected: 45,
                actual: 44
            })
        ));
        assert_eq!(untouched, RadiopanelState::new());
    }

    #[test]
    fn test_build_report_layout() {
        let mut state = RadiopanelState::new();
        state
            .parse_text("118.25     118.70     00000      99999      N")
            .expect("parse");

        let report = state.build_report();
        assert_eq!(report.len(), FEATURE_REPORT_SIZE_RADIOPANEL);
        assert_eq!(report[0], 0x00);
        // "118.25": dot folds onto the 8.
        assert_eq!(&report[1..6], &[0x01, 0x01, 0x88, 0x02, 0x05]);
        assert_eq!(&report[6..11], &[0x01, 0x01, 0x88, 0x07, 0x00]);
        assert_eq!(&report[11..16], &[0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(&report[16..21], &[0x09, 0x09, 0x09, 0x09, 0x09]);
        assert_eq!(report[21], 0x00);
        assert_eq!(report[22], 0x00);
    }

    #[test]
    fn test_format_text_header_round_trips() {
        let mut state = RadiopanelState::new();
        state
            .parse_text("118.25     118.70     1100       12.3       N")
            .expect("parse");

        let text = state.format_text();
        let header = text.lines().next().expect("header line");
        assert_eq!(header.chars().count(), 45);
        assert_eq!(&header[0..10], "118.25    ");
        assert_eq!(&header[44..45], "N");

        let mut other = RadiopanelState::new();
        other.parse_text(header).expect("round trip");
        assert_eq!(other.sides[0].displays, state.sides[0].displays);
        assert_eq!(other.sides[1].displays, state.sides[1].displays);
        assert_eq!(other.reset_mode, state.reset_mode);
    }

    #[test]
    fn test_format_text_verbose_section() {
        let mut state = RadiopanelState::new();
        state.decode(0, 0, &[0x81, 0x20, 0x10]).expect("decode");

        let text = state.format_text();
        assert!(text.contains("ACT-STBY-0:ON 1\n"));
        assert!(text.contains("MODE-0:COM1\n"));
        assert!(text.contains("ACT-STBY-1:OFF0\n"));
        assert!(text.contains("MODE-1:DME \n"));
        assert!(text.contains("INNER-1:  1\n"));
        assert!(text.contains("OUTER-1:  0\n"));
    }

    #[test]
    fn test_read_text_reset_scoped_to_panel() {
        let mut state = RadiopanelState::new();
        state.decode(0, 0, &[0x80, 0x80, 0x11]).expect("decode");
        assert_eq!(state.sides[0].act_stby.presses, 1);
        assert_eq!(state.sides[1].act_stby.presses, 1);

        let _ = state.read_text();
        assert_eq!(state.sides[0].act_stby.presses, 0);
        assert_eq!(state.sides[0].inner.value, 0);
        assert_eq!(state.sides[1].inner.value, 0);
        // Levels survive the reset.
        assert!(state.sides[0].act_stby.pressed);
    }
}
