//! Controller snapshot types: [`ButtonState`] and the [`Button`] identifiers.

/// Stick value reported by a centred analog stick.
pub const STICK_CENTER: u8 = 0x80;

/// One of the 16 digital buttons on the controller.
///
/// The discriminant order matches the wire order: offset 3 bits 0-7
/// followed by offset 4 bits 0-7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    Select = 0,
    Left3,
    Right3,
    Start,
    DUp,
    DRight,
    DDown,
    DLeft,
    Left2,
    Right2,
    Left1,
    Right1,
    Triangle,
    Circle,
    Cross,
    Square,
}

impl Button {
    /// All buttons in wire order.
    pub const ALL: [Button; 16] = [
        Button::Select,
        Button::Left3,
        Button::Right3,
        Button::Start,
        Button::DUp,
        Button::DRight,
        Button::DDown,
        Button::DLeft,
        Button::Left2,
        Button::Right2,
        Button::Left1,
        Button::Right1,
        Button::Triangle,
        Button::Circle,
        Button::Cross,
        Button::Square,
    ];

    /// Whether this button also reports a pressure value in pressure mode.
    ///
    /// Select, start and the stick clicks are digital only.
    #[inline]
    #[must_use]
    pub const fn is_pressure_sensitive(self) -> bool {
        !matches!(
            self,
            Button::Select | Button::Left3 | Button::Right3 | Button::Start
        )
    }
}

/// Decoded controller snapshot for a single poll.
///
/// The driver writes into one of these per poll. `digital_valid` and
/// `analog_valid` say which part of the snapshot was actually decoded from
/// the last response; fields outside a valid part keep whatever value the
/// slot held before and must not be trusted.
///
/// # Example
///
/// ```
/// use dualshock_proto::{Button, ButtonState};
///
/// let mut state = ButtonState::neutral();
/// state.cross = true;
/// assert!(state.is_pressed(Button::Cross));
/// assert_eq!(state.pressed_count(), 1);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    // Validity flags
    pub digital_valid: bool,
    pub analog_valid: bool,

    // Digital buttons, offset 3
    pub select: bool,
    pub left3: bool,
    pub right3: bool,
    pub start: bool,
    pub d_up: bool,
    pub d_right: bool,
    pub d_down: bool,
    pub d_left: bool,

    // Digital buttons, offset 4
    pub left2: bool,
    pub right2: bool,
    pub left1: bool,
    pub right1: bool,
    pub triangle: bool,
    pub circle: bool,
    pub cross: bool,
    pub square: bool,

    // Analog sticks
    pub analog_left_x: u8,
    pub analog_left_y: u8,
    pub analog_right_x: u8,
    pub analog_right_y: u8,

    // Button pressures
    pub d_up_pressure: u8,
    pub d_right_pressure: u8,
    pub d_down_pressure: u8,
    pub d_left_pressure: u8,
    pub left2_pressure: u8,
    pub right2_pressure: u8,
    pub left1_pressure: u8,
    pub right1_pressure: u8,
    pub triangle_pressure: u8,
    pub circle_pressure: u8,
    pub cross_pressure: u8,
    pub square_pressure: u8,
}

impl ButtonState {
    /// Nothing pressed, sticks centred, no pressure, both validity flags clear.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            digital_valid: false,
            analog_valid: false,
            select: false,
            left3: false,
            right3: false,
            start: false,
            d_up: false,
            d_right: false,
            d_down: false,
            d_left: false,
            left2: false,
            right2: false,
            left1: false,
            right1: false,
            triangle: false,
            circle: false,
            cross: false,
            square: false,
            analog_left_x: STICK_CENTER,
            analog_left_y: STICK_CENTER,
            analog_right_x: STICK_CENTER,
            analog_right_y: STICK_CENTER,
            d_up_pressure: 0,
            d_right_pressure: 0,
            d_down_pressure: 0,
            d_left_pressure: 0,
            left2_pressure: 0,
            right2_pressure: 0,
            left1_pressure: 0,
            right1_pressure: 0,
            triangle_pressure: 0,
            circle_pressure: 0,
            cross_pressure: 0,
            square_pressure: 0,
        }
    }

    /// Check whether a button is pressed.
    ///
    /// Only meaningful when `digital_valid` is set.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Select => self.select,
            Button::Left3 => self.left3,
            Button::Right3 => self.right3,
            Button::Start => self.start,
            Button::DUp => self.d_up,
            Button::DRight => self.d_right,
            Button::DDown => self.d_down,
            Button::DLeft => self.d_left,
            Button::Left2 => self.left2,
            Button::Right2 => self.right2,
            Button::Left1 => self.left1,
            Button::Right1 => self.right1,
            Button::Triangle => self.triangle,
            Button::Circle => self.circle,
            Button::Cross => self.cross,
            Button::Square => self.square,
        }
    }

    /// Set the pressed flag of a button.
    #[inline]
    pub fn set_pressed(&mut self, button: Button, pressed: bool) {
        *self.button_mut(button) = pressed;
    }

    /// Pressure reported for a button, or `None` for digital-only buttons.
    ///
    /// Only meaningful when `analog_valid` is set.
    #[must_use]
    pub fn pressure(&self, button: Button) -> Option<u8> {
        match button {
            Button::DUp => Some(self.d_up_pressure),
            Button::DRight => Some(self.d_right_pressure),
            Button::DDown => Some(self.d_down_pressure),
            Button::DLeft => Some(self.d_left_pressure),
            Button::Left2 => Some(self.left2_pressure),
            Button::Right2 => Some(self.right2_pressure),
            Button::Left1 => Some(self.left1_pressure),
            Button::Right1 => Some(self.right1_pressure),
            Button::Triangle => Some(self.triangle_pressure),
            Button::Circle => Some(self.circle_pressure),
            Button::Cross => Some(self.cross_pressure),
            Button::Square => Some(self.square_pressure),
            Button::Select | Button::Left3 | Button::Right3 | Button::Start => None,
        }
    }

    /// Number of digital buttons currently pressed.
    #[must_use]
    pub fn pressed_count(&self) -> usize {
        Button::ALL
            .iter()
            .filter(|&&button| self.is_pressed(button))
            .count()
    }

    /// Check if no digital button is pressed.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pressed_count() == 0
    }

    fn button_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Select => &mut self.select,
            Button::Left3 => &mut self.left3,
            Button::Right3 => &mut self.right3,
            Button::Start => &mut self.start,
            Button::DUp => &mut self.d_up,
            Button::DRight => &mut self.d_right,
            Button::DDown => &mut self.d_down,
            Button::DLeft => &mut self.d_left,
            Button::Left2 => &mut self.left2,
            Button::Right2 => &mut self.right2,
            Button::Left1 => &mut self.left1,
            Button::Right1 => &mut self.right1,
            Button::Triangle => &mut self.triangle,
            Button::Circle => &mut self.circle,
            Button::Cross => &mut self.cross,
            Button::Square => &mut self.square,
        }
    }
}
