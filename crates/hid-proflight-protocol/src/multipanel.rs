//! Pro Flight Multi Panel codec
//!
//! Input report (id 0, type 0, 3 bytes, bit 0 = LSB):
//!
//! | Byte | Bits | Meaning |
//! |------|------|---------|
//! | 0 | 0–4 | mode selector, priority ALT > VS > IAS > HDG > CRS |
//! | 0 | 5/6 | knob right / knob left tick |
//! | 0 | 7 | AP switch |
//! | 1 | 0–6 | HDG NAV IAS ALT VS APR REV switches |
//! | 1 | 7 | auto-throttle lever level (sampled, not accumulated) |
//! | 2 | 0/1 | flaps up / down tick |
//! | 2 | 3/2 | pitch-trim up / down tick |
//!
//! The knob bits follow the latest hardware revision (`0x20`/`0x40`); the
//! `0x02`/`0x04` assignment seen in early units is a historical bug and is
//! not supported.
//!
//! Feature report (13 bytes): id 0, display 0 codes at 1..6, display 1 codes
//! at 6..11, LED mask at 11, reserved 0 at 12.

use crate::{
    DISPLAY_CELLS, DecodeOutcome, DigitCode, Encoder, FEATURE_REPORT_SIZE_MULTIPANEL,
    INPUT_REPORT_ID, INPUT_REPORT_MIN_BYTES, ProflightError, ProflightResult, ResetMode,
    SegmentCharset, Switch, TEXT_WRITE_SIZE_MULTIPANEL,
};
use proflight_hid_common::{HID_REPORT_TYPE_INPUT, ReportBuilder, ReportParser};
use serde::{Deserialize, Serialize};

// byte 0
const MODE_ALT_BIT: u8 = 0x01;
const MODE_VS_BIT: u8 = 0x02;
const MODE_IAS_BIT: u8 = 0x04;
const MODE_HDG_BIT: u8 = 0x08;
const MODE_CRS_BIT: u8 = 0x10;
const KNOB_RIGHT_BIT: u8 = 0x20;
const KNOB_LEFT_BIT: u8 = 0x40;
const SWITCH_AP_BIT: u8 = 0x80;

// byte 1
const SWITCH_HDG_BIT: u8 = 0x01;
const SWITCH_NAV_BIT: u8 = 0x02;
const SWITCH_IAS_BIT: u8 = 0x04;
const SWITCH_ALT_BIT: u8 = 0x08;
const SWITCH_VS_BIT: u8 = 0x10;
const SWITCH_APR_BIT: u8 = 0x20;
const SWITCH_REV_BIT: u8 = 0x40;
const AUTO_THROTTLE_BIT: u8 = 0x80;

// byte 2
const FLAPS_UP_BIT: u8 = 0x01;
const FLAPS_DOWN_BIT: u8 = 0x02;
const TRIM_DOWN_BIT: u8 = 0x04;
const TRIM_UP_BIT: u8 = 0x08;

/// LED bit positions in feature-report byte 11, which is also the order of
/// the LED flags in the status text.
pub const LED_BIT_ORDER: [&str; 8] = ["AP", "HDG", "NAV", "IAS", "ALT", "VS", "APR", "REV"];

/// Autopilot mode selector, derived each decode from a fixed-priority scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultipanelMode {
    /// No selector bit set. Representable but presumed never to occur on
    /// real hardware.
    #[default]
    None,
    Alt,
    Vs,
    Ias,
    Hdg,
    Crs,
}

impl MultipanelMode {
    /// First set bit wins, in ALT > VS > IAS > HDG > CRS order.
    pub fn from_bits(byte: u8) -> Self {
        if byte & MODE_ALT_BIT != 0 {
            Self::Alt
        } else if byte & MODE_VS_BIT != 0 {
            Self::Vs
        } else if byte & MODE_IAS_BIT != 0 {
            Self::Ias
        } else if byte & MODE_HDG_BIT != 0 {
            Self::Hdg
        } else if byte & MODE_CRS_BIT != 0 {
            Self::Crs
        } else {
            Self::None
        }
    }

    /// Fixed-width (3 character) label used by the status text.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "   ",
            Self::Alt => "ALT",
            Self::Vs => "VS ",
            Self::Ias => "IAS",
            Self::Hdg => "HDG",
            Self::Crs => "CRS",
        }
    }
}

/// Full decoded state of one attached Multi Panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipanelState {
    pub mode: MultipanelMode,
    pub hdg: Switch,
    pub nav: Switch,
    pub ias: Switch,
    pub alt: Switch,
    pub vs: Switch,
    pub apr: Switch,
    pub rev: Switch,
    pub ap: Switch,
    /// Lever position, sampled directly from the report.
    pub auto_throttle: bool,
    pub flaps: Encoder,
    pub pitch_trim: Encoder,
    pub knob: Encoder,
    pub displays: [[DigitCode; DISPLAY_CELLS]; 2],
    /// Indicator LEDs, in [`LED_BIT_ORDER`]. Never derived from input
    /// reports; set only through the text interface.
    pub leds: [bool; 8],
    pub reset_mode: ResetMode,
}

impl MultipanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one raw input report, accumulating switch and encoder edges.
    ///
    /// Reports with a foreign id or type are passed through untouched; a
    /// report shorter than 3 bytes is a decode failure and mutates nothing.
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
        let b0 = parser.read_u8()?;
        let b1 = parser.read_u8()?;
        let b2 = parser.read_u8()?;

        self.mode = MultipanelMode::from_bits(b0);
        self.knob
            .update(b0 & KNOB_RIGHT_BIT != 0, b0 & KNOB_LEFT_BIT != 0);
        self.ap.update(b0 & SWITCH_AP_BIT != 0);

        self.hdg.update(b1 & SWITCH_HDG_BIT != 0);
        self.nav.update(b1 & SWITCH_NAV_BIT != 0);
        self.ias.update(b1 & SWITCH_IAS_BIT != 0);
        self.alt.update(b1 & SWITCH_ALT_BIT != 0);
        self.vs.update(b1 & SWITCH_VS_BIT != 0);
        self.apr.update(b1 & SWITCH_APR_BIT != 0);
        self.rev.update(b1 & SWITCH_REV_BIT != 0);
        self.auto_throttle = b1 & AUTO_THROTTLE_BIT != 0;

        self.flaps
            .update(b2 & FLAPS_UP_BIT != 0, b2 & FLAPS_DOWN_BIT != 0);
        self.pitch_trim
            .update(b2 & TRIM_UP_BIT != 0, b2 & TRIM_DOWN_BIT != 0);

        Ok(DecodeOutcome::Handled)
    }

    fn switch_entries(&self) -> [(&'static str, &Switch); 8] {
        [
            ("HDG", &self.hdg),
            ("NAV", &self.nav),
            ("IAS", &self.ias),
            ("ALT", &self.alt),
            ("VS", &self.vs),
            ("APR", &self.apr),
            ("REV", &self.rev),
            ("AP", &self.ap),
        ]
    }

    /// Format the status text without side effects.
    ///
    /// Header line, fixed offsets: display 0 at 0..5, display 1 at 6..11,
    /// LED flags at 12..20, reset-mode character at 21, switch levels at
    /// 23..31 — so the first 22 characters are a valid text write. A verbose
    /// section follows with one line per named value.
    pub fn format_text(&self) -> String {
        let charset = SegmentCharset::Multipanel;
        let mut out = String::with_capacity(192);

        out.push_str(&charset.render_field(&self.displays[0]));
        out.push(' ');
        out.push_str(&charset.render_field(&self.displays[1]));
        out.push(' ');
        for led in self.leds {
            out.push(if led { '1' } else { '0' });
        }
        out.push(' ');
        out.push(self.reset_mode.as_char());
        out.push(' ');
        for (_, sw) in self.switch_entries() {
            out.push(if sw.pressed { '1' } else { '0' });
        }
        out.push('\n');

        out.push_str(&format!("MODE:{}\n", self.mode.label()));
        for (name, sw) in self.switch_entries() {
            out.push_str(&format!(
                "{name}:{}{}\n",
                if sw.pressed { "ON " } else { "OFF" },
                sw.presses
            ));
        }
        out.push_str(&format!(
            "AUTO-THROTTLE:{}\n",
            if self.auto_throttle { "ON " } else { "OFF" }
        ));
        out.push_str(&format!("FLAPS:{:3}\n", self.flaps.value));
        out.push_str(&format!("PITCH-TRIM:{:3}\n", self.pitch_trim.value));
        out.push_str(&format!("KNOB:{:3}\n", self.knob.value));

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

    /// Parse a text write: display 0 at 0..5, display 1 at 6..11, LED flags
    /// at 12..20 (`'0'`/`'1'`, anything else leaves that LED unchanged),
    /// reset-mode character at 21 (`'N'`/`'R'`, else unchanged). Separator
    /// positions are skipped, not validated. Excess characters are ignored;
    /// the session layer warns about them.
    ///
    /// # Errors
    /// Returns [`ProflightError::TextTooShort`] for input under 22
    /// characters, leaving the state unmodified.
    pub fn parse_text(&mut self, text: &str) -> ProflightResult<()> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < TEXT_WRITE_SIZE_MULTIPANEL {
            return Err(ProflightError::TextTooShort {
                expected: TEXT_WRITE_SIZE_MULTIPANEL,
                actual: chars.len(),
            });
        }

        let charset = SegmentCharset::Multipanel;
        let field0: String = chars[0..DISPLAY_CELLS].iter().collect();
        let field1: String = chars[6..6 + DISPLAY_CELLS].iter().collect();
        self.displays[0] = charset.encode_field(&field0);
        self.displays[1] = charset.encode_field(&field1);

        for (led, flag) in self.leds.iter_mut().zip(&chars[12..20]) {
            match flag {
                '0' => *led = false,
                '1' => *led = true,
                _ => {}
            }
        }

        if let Some(mode) = ResetMode::from_char(chars[21]) {
            self.reset_mode = mode;
        }

        Ok(())
    }

    /// LED mask for feature-report byte 11.
    pub fn led_mask(&self) -> u8 {
        self.leds
            .iter()
            .enumerate()
            .fold(0, |mask, (i, &on)| if on { mask | (1 << i) } else { mask })
    }

    /// Build the 13-byte feature report driving the displays and LEDs.
    pub fn build_report(&self) -> Vec<u8> {
        let mut builder = ReportBuilder::with_capacity(FEATURE_REPORT_SIZE_MULTIPANEL);
        builder.write_u8(INPUT_REPORT_ID);
        for field in &self.displays {
            for cell in field {
                builder.write_u8(cell.raw());
            }
        }
        builder.write_u8(self.led_mask());
        builder.pad_to(FEATURE_REPORT_SIZE_MULTIPANEL);
        builder.into_inner()
    }

    /// Zero every accumulator (switch press counters and encoder values).
    /// Edge memory is preserved so held bits do not re-count.
    pub fn reset_accumulators(&mut self) {
        self.hdg.reset();
        self.nav.reset();
        self.ias.reset();
        self.alt.reset();
        self.vs.reset();
        self.apr.reset();
        self.rev.reset();
        self.ap.reset();
        self.flaps.reset();
        self.pitch_trim.reset();
        self.knob.reset();
    }
}
