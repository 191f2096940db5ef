//! Edge-triggered, saturating accumulation
//!
//! Both panels count switch presses and encoder ticks the same way: a raw
//! bit transitioning from low to high counts once, a bit held high across
//! reports does not re-count, and the accumulated value saturates at a fixed
//! bound instead of wrapping. The step functions here are pure so the policy
//! is testable on its own; [`Switch`] and [`Encoder`] carry the per-field
//! edge memory the codecs mutate in place.

use serde::{Deserialize, Serialize};

/// Saturation bound for switch press counters.
pub const SWITCH_PRESS_MAX: u8 = 9;
/// Lower saturation bound for encoder values.
pub const ENCODER_VALUE_MIN: i8 = -99;
/// Upper saturation bound for encoder values.
pub const ENCODER_VALUE_MAX: i8 = 99;

/// One step of an unsigned press counter: increments on a rising edge of
/// `raw`, saturating at `bound`. Returns the new edge flag and counter.
pub fn step_count(prev_high: bool, count: u8, raw: bool, bound: u8) -> (bool, u8) {
    let count = if raw && !prev_high {
        count.saturating_add(1).min(bound)
    } else {
        count
    };
    (raw, count)
}

/// One step of a signed accumulator: applies `delta` on a rising edge of
/// `raw`, clamped to `[min, max]`. Returns the new edge flag and value.
pub fn step_adjust(prev_high: bool, value: i8, raw: bool, delta: i8, min: i8, max: i8) -> (bool, i8) {
    let value = if raw && !prev_high {
        value.saturating_add(delta).clamp(min, max)
    } else {
        value
    };
    (raw, value)
}

/// A momentary switch: instantaneous level plus a saturating press counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub pressed: bool,
    pub presses: u8,
}

impl Switch {
    pub fn update(&mut self, raw: bool) {
        let (pressed, presses) = step_count(self.pressed, self.presses, raw, SWITCH_PRESS_MAX);
        self.pressed = pressed;
        self.presses = presses;
    }

    /// Zero the accumulator. The instantaneous level is left alone so a
    /// still-held switch does not re-count on the next report.
    pub fn reset(&mut self) {
        self.presses = 0;
    }
}

/// A rotary encoder: two independently edge-held directions feeding one
/// clamped signed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoder {
    pub value: i8,
    pub inc_held: bool,
    pub dec_held: bool,
}

impl Encoder {
    pub fn update(&mut self, inc_raw: bool, dec_raw: bool) {
        let (inc_held, value) = step_adjust(
            self.inc_held,
            self.value,
            inc_raw,
            1,
            ENCODER_VALUE_MIN,
            ENCODER_VALUE_MAX,
        );
        let (dec_held, value) = step_adjust(
            self.dec_held,
            value,
            dec_raw,
            -1,
            ENCODER_VALUE_MIN,
            ENCODER_VALUE_MAX,
        );
        self.inc_held = inc_held;
        self.dec_held = dec_held;
        self.value = value;
    }

    /// Zero the accumulated value, keeping both directions' edge memory.
    pub fn reset(&mut self) {
        self.value = 0;
    }
}
