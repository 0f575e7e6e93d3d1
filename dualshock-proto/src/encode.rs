//! Response frame encoding.
//!
//! Builds the bytes a controller would send for a given [`ButtonState`].
//! Used to drive controller emulators and to exercise the decoder with
//! synthetic frames.

use crate::command::{ANALOG_FRAME_LEN, DIGITAL_FRAME_LEN, MAX_FRAME_LEN};
use crate::decode::{
    AnalogField, ANALOG_OFFSETS, ANALOG_READY, BUTTONS_HIGH_OFFSET,
    BUTTONS_LOW_OFFSET, DIGITAL_BYTE3_MAP, DIGITAL_BYTE4_MAP, DIGITAL_READY,
    DISCRIMINATOR_OFFSET, READY_MARKER, READY_OFFSET,
};
use crate::types::{Button, ButtonState};

/// A response frame, at most [`MAX_FRAME_LEN`] bytes.
pub type Frame = heapless::Vec<u8, MAX_FRAME_LEN>;

/// Idle level of the data line before the controller starts answering.
const IDLE_BYTE: u8 = 0xFF;

fn encode_button_byte(state: &ButtonState, map: &[Button; 8]) -> u8 {
    map.iter()
        .enumerate()
        .fold(0xFF, |byte, (bit, &button)| {
            if state.is_pressed(button) {
                byte & !(1 << bit)
            } else {
                byte
            }
        })
}

/// Encode the digital buttons as the active-low bytes at offsets 3 and 4.
#[must_use]
pub fn encode_digital(state: &ButtonState) -> [u8; 2] {
    [
        encode_button_byte(state, &DIGITAL_BYTE3_MAP),
        encode_button_byte(state, &DIGITAL_BYTE4_MAP),
    ]
}

/// Encode a digital poll response (`xx 41 5A b3 b4`).
#[must_use]
pub fn encode_digital_response(state: &ButtonState) -> Frame {
    let mut frame = Frame::new();
    // Capacities match by construction
    let _ = frame.resize(DIGITAL_FRAME_LEN, 0);
    write_header(&mut frame, DIGITAL_READY, state);
    frame
}

/// Encode an analog poll response with sticks and pressures at offsets 5-20.
#[must_use]
pub fn encode_analog_response(state: &ButtonState) -> Frame {
    let mut frame = Frame::new();
    let _ = frame.resize(ANALOG_FRAME_LEN, 0);
    write_header(&mut frame, ANALOG_READY, state);

    for &(offset, field) in ANALOG_OFFSETS.iter() {
        frame[offset] = match field {
            AnalogField::RightX => state.analog_right_x,
            AnalogField::RightY => state.analog_right_y,
            AnalogField::LeftX => state.analog_left_x,
            AnalogField::LeftY => state.analog_left_y,
            AnalogField::Pressure(button) => state.pressure(button).unwrap_or(0),
        };
    }
    frame
}

fn write_header(frame: &mut Frame, discriminator: u8, state: &ButtonState) {
    let [low, high] = encode_digital(state);
    frame[0] = IDLE_BYTE;
    frame[DISCRIMINATOR_OFFSET] = discriminator;
    frame[READY_OFFSET] = READY_MARKER;
    frame[BUTTONS_LOW_OFFSET] = low;
    frame[BUTTONS_HIGH_OFFSET] = high;
}
