//! Response frame decoding.
//!
//! Byte 1 of every response is the discriminator: the controller's current
//! mode in the high nibble and the number of 16-bit payload words in the low
//! nibble. Two values are accepted for polls:
//!
//! - `0x41`: digital frame, buttons at offsets 3 and 4
//! - `0x73`: analog frame, buttons plus sticks and pressures at offsets 5-20
//!
//! Button bytes are active-low: a cleared bit means the button is pressed.

use crate::command::{ANALOG_FRAME_LEN, DIGITAL_FRAME_LEN};
use crate::types::{Button, ButtonState};

/// Offset of the discriminator byte.
pub const DISCRIMINATOR_OFFSET: usize = 1;

/// Offset of the `0x5A` ready marker.
pub const READY_OFFSET: usize = 2;

/// Ready marker the controller sends at offset 2 of every answered command.
pub const READY_MARKER: u8 = 0x5A;

/// Discriminator of a digital-only poll response.
pub const DIGITAL_READY: u8 = 0x41;

/// Discriminator of an extended analog poll response.
pub const ANALOG_READY: u8 = 0x73;

/// Discriminator reported while the controller is in config mode.
pub const CONFIG_READY: u8 = 0xF3;

/// Offset of the first digital button byte.
pub const BUTTONS_LOW_OFFSET: usize = 3;

/// Offset of the second digital button byte.
pub const BUTTONS_HIGH_OFFSET: usize = 4;

/// Bit-to-button mapping of offset 3 (index = bit number).
pub const DIGITAL_BYTE3_MAP: [Button; 8] = [
    Button::Select,
    Button::Left3,
    Button::Right3,
    Button::Start,
    Button::DUp,
    Button::DRight,
    Button::DDown,
    Button::DLeft,
];

/// Bit-to-button mapping of offset 4 (index = bit number).
pub const DIGITAL_BYTE4_MAP: [Button; 8] = [
    Button::Left2,
    Button::Right2,
    Button::Left1,
    Button::Right1,
    Button::Triangle,
    Button::Circle,
    Button::Cross,
    Button::Square,
];

/// A field of the analog part of the response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogField {
    RightX,
    RightY,
    LeftX,
    LeftY,
    /// Pressure of a pressure-sensitive button.
    Pressure(Button),
}

/// Absolute offsets of the analog fields in the 21-byte analog response.
pub const ANALOG_OFFSETS: [(usize, AnalogField); 16] = [
    (5, AnalogField::RightX),
    (6, AnalogField::RightY),
    (7, AnalogField::LeftX),
    (8, AnalogField::LeftY),
    (9, AnalogField::Pressure(Button::DRight)),
    (10, AnalogField::Pressure(Button::DLeft)),
    (11, AnalogField::Pressure(Button::DUp)),
    (12, AnalogField::Pressure(Button::DDown)),
    (13, AnalogField::Pressure(Button::Triangle)),
    (14, AnalogField::Pressure(Button::Circle)),
    (15, AnalogField::Pressure(Button::Cross)),
    (16, AnalogField::Pressure(Button::Square)),
    (17, AnalogField::Pressure(Button::Left1)),
    (18, AnalogField::Pressure(Button::Right1)),
    (19, AnalogField::Pressure(Button::Left2)),
    (20, AnalogField::Pressure(Button::Right2)),
];

/// Shape of a poll response as announced by its discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseKind {
    /// `0x41`: digital buttons only.
    Digital,
    /// `0x73`: digital buttons followed by analog data.
    Analog,
    /// Any other discriminator (or a frame too short to carry one).
    Unexpected(u8),
}

impl ResponseKind {
    /// Classify a response frame by its discriminator byte.
    #[must_use]
    pub fn of(frame: &[u8]) -> Self {
        match frame.get(DISCRIMINATOR_OFFSET) {
            Some(&DIGITAL_READY) => ResponseKind::Digital,
            Some(&ANALOG_READY) => ResponseKind::Analog,
            Some(&other) => ResponseKind::Unexpected(other),
            None => ResponseKind::Unexpected(0x00),
        }
    }

    /// Check whether a discriminator names a frame shape the driver can decode.
    #[inline]
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, ResponseKind::Unexpected(_))
    }
}

/// Decode one active-low button byte using the given bit map.
#[inline]
fn decode_button_byte(byte: u8, map: &[Button; 8], state: &mut ButtonState) {
    for (bit, &button) in map.iter().enumerate() {
        state.set_pressed(button, byte & (1 << bit) == 0);
    }
}

/// Decode the digital buttons from offsets 3 and 4 and set `digital_valid`.
///
/// The caller is responsible for checking the discriminator first.
pub fn decode_digital(buttons_low: u8, buttons_high: u8, state: &mut ButtonState) {
    decode_button_byte(buttons_low, &DIGITAL_BYTE3_MAP, state);
    decode_button_byte(buttons_high, &DIGITAL_BYTE4_MAP, state);
    state.digital_valid = true;
}

/// Decode sticks and pressures from an analog response and set `analog_valid`.
///
/// `frame` must hold at least [`ANALOG_FRAME_LEN`] bytes; shorter frames are
/// left undecoded and `false` is returned.
pub fn decode_analog(frame: &[u8], state: &mut ButtonState) -> bool {
    if frame.len() < ANALOG_FRAME_LEN {
        return false;
    }

    for &(offset, field) in ANALOG_OFFSETS.iter() {
        let value = frame[offset];
        match field {
            AnalogField::RightX => state.analog_right_x = value,
            AnalogField::RightY => state.analog_right_y = value,
            AnalogField::LeftX => state.analog_left_x = value,
            AnalogField::LeftY => state.analog_left_y = value,
            AnalogField::Pressure(button) => {
                if let Some(slot) = pressure_slot(state, button) {
                    *slot = value;
                }
            }
        }
    }

    state.analog_valid = true;
    true
}

/// Decode a complete poll response into `state`.
///
/// Both validity flags are cleared first. Then:
///
/// - `0x41` decodes the digital buttons.
/// - `0x73` is only accepted when `analog_mode` is set. It decodes the
///   digital buttons, and the analog part too when the frame is long enough.
/// - Anything else leaves every other field of `state` untouched.
///
/// Returns the classified response kind, which may be a known kind that was
/// not decoded (`0x73` outside analog mode).
pub fn decode_response(
    frame: &[u8],
    analog_mode: bool,
    state: &mut ButtonState,
) -> ResponseKind {
    state.digital_valid = false;
    state.analog_valid = false;

    if frame.len() < DIGITAL_FRAME_LEN {
        return ResponseKind::Unexpected(frame.get(DISCRIMINATOR_OFFSET).copied().unwrap_or(0));
    }

    let kind = ResponseKind::of(frame);
    match kind {
        ResponseKind::Digital => {
            decode_digital(frame[BUTTONS_LOW_OFFSET], frame[BUTTONS_HIGH_OFFSET], state);
        }
        ResponseKind::Analog if analog_mode => {
            decode_digital(frame[BUTTONS_LOW_OFFSET], frame[BUTTONS_HIGH_OFFSET], state);
            decode_analog(frame, state);
        }
        ResponseKind::Analog | ResponseKind::Unexpected(_) => {}
    }

    kind
}

fn pressure_slot(state: &mut ButtonState, button: Button) -> Option<&mut u8> {
    match button {
        Button::DUp => Some(&mut state.d_up_pressure),
        Button::DRight => Some(&mut state.d_right_pressure),
        Button::DDown => Some(&mut state.d_down_pressure),
        Button::DLeft => Some(&mut state.d_left_pressure),
        Button::Left2 => Some(&mut state.left2_pressure),
        Button::Right2 => Some(&mut state.right2_pressure),
        Button::Left1 => Some(&mut state.left1_pressure),
        Button::Right1 => Some(&mut state.right1_pressure),
        Button::Triangle => Some(&mut state.triangle_pressure),
        Button::Circle => Some(&mut state.circle_pressure),
        Button::Cross => Some(&mut state.cross_pressure),
        Button::Square => Some(&mut state.square_pressure),
        Button::Select | Button::Left3 | Button::Right3 | Button::Start => None,
    }
}
