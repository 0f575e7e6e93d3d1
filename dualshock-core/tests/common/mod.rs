//! Emulated controller used by the integration tests.

#![allow(dead_code)]

use dualshock_core::proto::{
    encode_analog_response, encode_digital_response, Frame, CONFIG_READY, DIGITAL_READY,
    ANALOG_READY, READY_MARKER,
};
use dualshock_core::{ButtonState, Command, SpiConfig, Transport, TransportError};
use embedded_hal::delay::DelayNs;

/// Behaves like a DualShock on the other end of the bus.
///
/// Tracks config mode, reporting mode and motor mapping the way a real pad
/// does, answers polls from `held`, and records every frame it was sent.
#[derive(Default)]
pub struct EmulatedPad {
    /// Buttons, sticks and pressures the "player" is holding.
    pub held: ButtonState,
    pub config_mode: bool,
    pub analog: bool,
    pub pressures: bool,
    pub motors_mapped: bool,
    /// Last (small, large) motor values received in analog polls.
    pub motors: (u8, u8),
    pub configured: Option<SpiConfig>,
    pub sent: Vec<Vec<u8>>,
    /// Fail the exchange for this command at the transport.
    pub fail_on: Option<Command>,
    /// Answer this command without the ready marker.
    pub nak_on: Option<Command>,
    /// Replace the discriminator of poll replies.
    pub poll_discriminator: Option<u8>,
    /// Nothing on the bus: every byte reads back as 0xFF.
    pub unplugged: bool,
}

impl EmulatedPad {
    pub fn new() -> Self {
        Self {
            held: ButtonState::neutral(),
            ..Self::default()
        }
    }

    /// Commands received, in order.
    pub fn commands(&self) -> Vec<Option<Command>> {
        self.sent.iter().map(|frame| Command::identify(frame)).collect()
    }

    fn mode_id(&self) -> u8 {
        if self.config_mode {
            CONFIG_READY
        } else if self.analog {
            ANALOG_READY
        } else {
            DIGITAL_READY
        }
    }

    fn poll_reply(&mut self, tx: &[u8]) -> Frame {
        if self.analog && self.motors_mapped && tx.len() > 4 {
            self.motors = (tx[3], tx[4]);
        }

        let mut held = self.held;
        if !self.pressures {
            for button in dualshock_core::Button::ALL {
                if button.is_pressure_sensitive() {
                    set_pressure(&mut held, button, 0);
                }
            }
        }

        let mut reply = if self.analog {
            encode_analog_response(&held)
        } else {
            encode_digital_response(&held)
        };
        if let Some(code) = self.poll_discriminator {
            reply[1] = code;
        }
        reply
    }

    fn config_reply(&mut self, cmd: Command) -> Frame {
        let mut reply = Frame::new();
        let _ = reply.extend_from_slice(&[0xFF, self.mode_id(), READY_MARKER]);
        let _ = reply.resize(cmd.len(), 0x00);

        match cmd {
            Command::EnterConfig => self.config_mode = true,
            Command::ExitConfig => self.config_mode = false,
            _ if !self.config_mode => {}
            Command::EnableAnalog => self.analog = true,
            Command::DisableAnalog => {
                self.analog = false;
                self.pressures = false;
            }
            Command::EnableMotors => self.motors_mapped = true,
            Command::ConfigurePressure => self.pressures = true,
            Command::DigitalPoll | Command::AnalogPoll => {}
        }
        reply
    }
}

fn set_pressure(state: &mut ButtonState, button: dualshock_core::Button, value: u8) {
    use dualshock_core::Button;
    match button {
        Button::DUp => state.d_up_pressure = value,
        Button::DRight => state.d_right_pressure = value,
        Button::DDown => state.d_down_pressure = value,
        Button::DLeft => state.d_left_pressure = value,
        Button::Left2 => state.left2_pressure = value,
        Button::Right2 => state.right2_pressure = value,
        Button::Left1 => state.left1_pressure = value,
        Button::Right1 => state.right1_pressure = value,
        Button::Triangle => state.triangle_pressure = value,
        Button::Circle => state.circle_pressure = value,
        Button::Cross => state.cross_pressure = value,
        Button::Square => state.square_pressure = value,
        Button::Select | Button::Left3 | Button::Right3 | Button::Start => {}
    }
}

impl Transport for EmulatedPad {
    fn configure(&mut self, config: &SpiConfig) -> Result<(), TransportError> {
        self.configured = Some(*config);
        Ok(())
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        assert_eq!(tx.len(), rx.len(), "driver must exchange equal lengths");
        self.sent.push(tx.to_vec());

        let cmd = Command::identify(tx);
        if cmd.is_some() && cmd == self.fail_on {
            return Err(TransportError::Timeout);
        }

        rx.fill(0xFF);
        if self.unplugged {
            return Ok(());
        }

        let reply = match cmd {
            Some(Command::DigitalPoll | Command::AnalogPoll) if !self.config_mode => {
                self.poll_reply(tx)
            }
            Some(other) => self.config_reply(other),
            None => return Ok(()),
        };

        for (slot, byte) in rx.iter_mut().zip(reply.iter()) {
            *slot = *byte;
        }
        if cmd.is_some() && cmd == self.nak_on {
            rx[2] = 0x00;
        }
        Ok(())
    }
}

/// Delay provider that records every requested delay in nanoseconds.
#[derive(Default)]
pub struct RecordingDelay {
    pub calls: Vec<u64>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.calls.push(u64::from(us) * 1_000);
    }
}
