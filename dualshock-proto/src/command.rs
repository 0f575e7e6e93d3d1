//! Fixed command frames sent to the controller.
//!
//! Every frame starts with the `0x01` address byte followed by the command
//! byte. The bytes must go out exactly as listed here; the controller
//! does not tolerate variations.
//!
//! | Command            | Bytes                           |
//! |--------------------|---------------------------------|
//! | digital poll       | `01 42 00 00 00`                |
//! | analog poll        | `01 42 00 00 00` + 16 zero bytes|
//! | enter config       | `01 43 00 01 00`                |
//! | enable analog      | `01 44 00 01 03 00 00 00 00`    |
//! | disable analog     | `01 44 00 00 03 00 00 00 00`    |
//! | enable motor cmds  | `01 4D 00 00 01 FF FF FF FF`    |
//! | configure pressure | `01 4F 00 FF FF 03 00 00 00`    |
//! | exit config        | `01 43 00 00 5A 5A 5A 5A 5A`    |

/// Length of a digital poll exchange.
pub const DIGITAL_FRAME_LEN: usize = 5;

/// Length of an analog poll exchange (header + 2 button bytes + 4 sticks + 12 pressures).
pub const ANALOG_FRAME_LEN: usize = 21;

/// Length of the extended configuration commands.
pub const CONFIG_FRAME_LEN: usize = 9;

/// Longest exchange the driver ever performs.
pub const MAX_FRAME_LEN: usize = ANALOG_FRAME_LEN;

/// Poll byte offset carrying the small (left) motor value once motors are mapped.
pub const RUMBLE_SMALL_OFFSET: usize = 3;

/// Poll byte offset carrying the large (right) motor value once motors are mapped.
pub const RUMBLE_LARGE_OFFSET: usize = 4;

pub const DIGITAL_POLL: [u8; DIGITAL_FRAME_LEN] = [0x01, 0x42, 0x00, 0x00, 0x00];

pub const ANALOG_POLL: [u8; ANALOG_FRAME_LEN] = [
    0x01, 0x42, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub const ENTER_CONFIG: [u8; 5] = [0x01, 0x43, 0x00, 0x01, 0x00];

pub const ENABLE_ANALOG: [u8; CONFIG_FRAME_LEN] =
    [0x01, 0x44, 0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x00];

pub const DISABLE_ANALOG: [u8; CONFIG_FRAME_LEN] =
    [0x01, 0x44, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00];

pub const ENABLE_MOTORS: [u8; CONFIG_FRAME_LEN] =
    [0x01, 0x4D, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF];

pub const CONFIGURE_PRESSURE: [u8; CONFIG_FRAME_LEN] =
    [0x01, 0x4F, 0x00, 0xFF, 0xFF, 0x03, 0x00, 0x00, 0x00];

pub const EXIT_CONFIG: [u8; CONFIG_FRAME_LEN] =
    [0x01, 0x43, 0x00, 0x00, 0x5A, 0x5A, 0x5A, 0x5A, 0x5A];

/// A command the driver can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    DigitalPoll,
    AnalogPoll,
    EnterConfig,
    EnableAnalog,
    DisableAnalog,
    EnableMotors,
    ConfigurePressure,
    ExitConfig,
}

impl Command {
    /// The fixed transmit frame for this command.
    ///
    /// The length of the slice is also the length of the exchange.
    #[must_use]
    pub const fn frame(self) -> &'static [u8] {
        match self {
            Command::DigitalPoll => &DIGITAL_POLL,
            Command::AnalogPoll => &ANALOG_POLL,
            Command::EnterConfig => &ENTER_CONFIG,
            Command::EnableAnalog => &ENABLE_ANALOG,
            Command::DisableAnalog => &DISABLE_ANALOG,
            Command::EnableMotors => &ENABLE_MOTORS,
            Command::ConfigurePressure => &CONFIGURE_PRESSURE,
            Command::ExitConfig => &EXIT_CONFIG,
        }
    }

    /// Number of bytes exchanged for this command.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.frame().len()
    }

    /// The command byte (offset 1 of the transmit frame).
    #[inline]
    #[must_use]
    pub const fn opcode(self) -> u8 {
        self.frame()[1]
    }

    /// Identify a transmit frame by its exact bytes.
    ///
    /// Poll frames with rumble bytes filled in are matched by length and opcode
    /// alone, since offsets 3 and 4 carry motor values.
    #[must_use]
    pub fn identify(frame: &[u8]) -> Option<Command> {
        const EXACT: [Command; 6] = [
            Command::EnterConfig,
            Command::EnableAnalog,
            Command::DisableAnalog,
            Command::EnableMotors,
            Command::ConfigurePressure,
            Command::ExitConfig,
        ];

        if let Some(cmd) = EXACT.into_iter().find(|cmd| cmd.frame() == frame) {
            return Some(cmd);
        }

        match (frame.len(), frame.get(1)) {
            (DIGITAL_FRAME_LEN, Some(0x42)) => Some(Command::DigitalPoll),
            (ANALOG_FRAME_LEN, Some(0x42)) => Some(Command::AnalogPoll),
            _ => None,
        }
    }
}

/// Build the poll frame for the current mode.
///
/// In digital mode the fixed digital poll is returned unchanged and rumble is
/// ignored. In analog mode the motors have been mapped to offsets 3 and 4 by
/// the enable-motor-commands step, so the rumble values are written there.
/// With both rumble values at zero the frame equals [`ANALOG_POLL`].
#[must_use]
pub fn poll_frame(
    analog_mode: bool,
    rumble_small: u8,
    rumble_large: u8,
) -> heapless::Vec<u8, MAX_FRAME_LEN> {
    let mut frame = heapless::Vec::new();
    if analog_mode {
        // Capacities match by construction
        let _ = frame.extend_from_slice(&ANALOG_POLL);
        frame[RUMBLE_SMALL_OFFSET] = rumble_small;
        frame[RUMBLE_LARGE_OFFSET] = rumble_large;
    } else {
        let _ = frame.extend_from_slice(&DIGITAL_POLL);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_byte_exact() {
        assert_eq!(Command::DigitalPoll.frame(), &[0x01, 0x42, 0x00, 0x00, 0x00]);
        assert_eq!(Command::EnterConfig.frame(), &[0x01, 0x43, 0x00, 0x01, 0x00]);
        assert_eq!(
            Command::EnableAnalog.frame(),
            &[0x01, 0x44, 0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            Command::EnableMotors.frame(),
            &[0x01, 0x4D, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            Command::ConfigurePressure.frame(),
            &[0x01, 0x4F, 0x00, 0xFF, 0xFF, 0x03, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            Command::ExitConfig.frame(),
            &[0x01, 0x43, 0x00, 0x00, 0x5A, 0x5A, 0x5A, 0x5A, 0x5A]
        );
        assert_eq!(
            Command::DisableAnalog.frame(),
            &[0x01, 0x44, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            Command::AnalogPoll.frame(),
            &[
                0x01, 0x42, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn test_analog_poll_is_padded_digital_poll() {
        assert_eq!(Command::AnalogPoll.len(), 21);
        assert_eq!(&ANALOG_POLL[..5], &DIGITAL_POLL);
        assert!(ANALOG_POLL[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_identify_every_command() {
        for cmd in [
            Command::DigitalPoll,
            Command::AnalogPoll,
            Command::EnterConfig,
            Command::EnableAnalog,
            Command::DisableAnalog,
            Command::EnableMotors,
            Command::ConfigurePressure,
            Command::ExitConfig,
        ] {
            assert_eq!(Command::identify(cmd.frame()), Some(cmd));
        }
        assert_eq!(Command::identify(&[0x01, 0x45, 0x00]), None);
    }

    #[test]
    fn test_poll_frame_digital_ignores_rumble() {
        assert_eq!(poll_frame(false, 0xFF, 0x80).as_slice(), &DIGITAL_POLL);
    }

    #[test]
    fn test_poll_frame_analog_carries_rumble() {
        assert_eq!(poll_frame(true, 0, 0).as_slice(), &ANALOG_POLL);

        let frame = poll_frame(true, 0xFF, 0x40);
        assert_eq!(frame.len(), ANALOG_FRAME_LEN);
        assert_eq!(frame[RUMBLE_SMALL_OFFSET], 0xFF);
        assert_eq!(frame[RUMBLE_LARGE_OFFSET], 0x40);
        assert_eq!(Command::identify(&frame), Some(Command::AnalogPoll));
    }
}
