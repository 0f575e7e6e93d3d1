//! Change reporting between consecutive polls.

use dualshock_core::{Button, ButtonState};
use heapless::Vec;

/// A button that went down or came up since the previous poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub struct ButtonChange {
    pub button: Button,
    pub pressed: bool,
}

/// Buttons whose pressed state differs between `prev` and `next`, in wire order.
#[must_use]
pub fn button_changes(prev: &ButtonState, next: &ButtonState) -> Vec<ButtonChange, 16> {
    let mut changes = Vec::new();
    for button in Button::ALL {
        let pressed = next.is_pressed(button);
        if prev.is_pressed(button) != pressed {
            // Capacity matches Button::ALL
            let _ = changes.push(ButtonChange { button, pressed });
        }
    }
    changes
}

/// Whether a stick moved further than `threshold` from its previous value.
#[must_use]
pub fn sticks_moved(prev: &ButtonState, next: &ButtonState, threshold: u8) -> bool {
    [
        (prev.analog_left_x, next.analog_left_x),
        (prev.analog_left_y, next.analog_left_y),
        (prev.analog_right_x, next.analog_right_x),
        (prev.analog_right_y, next.analog_right_y),
    ]
    .into_iter()
    .any(|(a, b)| a.abs_diff(b) > threshold)
}
