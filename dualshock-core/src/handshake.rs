//! Configuration handshake: steps, response validation and inter-step delay.
//!
//! Switching the controller between digital and analog reporting is a
//! sequence of separate exchanges bracketed by enter/exit config. How a
//! response is judged and how long to wait between steps depend on the
//! controller and the bus, so both are injected into the driver:
//!
//! - a [`ResponseValidator`] consulted after every step
//! - an `embedded_hal::delay::DelayNs` plus [`HandshakePolicy::step_delay_us`]
//!
//! The defaults ([`AckValidator`], [`NoDelay`], zero delay) suit most
//! genuine controllers on a slow bus. Calibrate them per hardware.

use dualshock_proto::{Command, CONFIG_READY, READY_MARKER, READY_OFFSET};
use embedded_hal::delay::DelayNs;

use crate::transport::TransportError;

/// One step of a configuration handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigStep {
    EnterConfig,
    EnableAnalog,
    EnableMotors,
    ConfigurePressure,
    DisableAnalog,
    ExitConfig,
}

impl ConfigStep {
    /// The command frame sent for this step.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            ConfigStep::EnterConfig => Command::EnterConfig,
            ConfigStep::EnableAnalog => Command::EnableAnalog,
            ConfigStep::EnableMotors => Command::EnableMotors,
            ConfigStep::ConfigurePressure => Command::ConfigurePressure,
            ConfigStep::DisableAnalog => Command::DisableAnalog,
            ConfigStep::ExitConfig => Command::ExitConfig,
        }
    }
}

/// Steps that switch the controller to analog reporting with pressures and
/// rumble mapped.
pub const ENABLE_ANALOG_SEQUENCE: [ConfigStep; 5] = [
    ConfigStep::EnterConfig,
    ConfigStep::EnableAnalog,
    ConfigStep::EnableMotors,
    ConfigStep::ConfigurePressure,
    ConfigStep::ExitConfig,
];

/// Steps that return the controller to digital-only reporting.
pub const DISABLE_ANALOG_SEQUENCE: [ConfigStep; 3] = [
    ConfigStep::EnterConfig,
    ConfigStep::DisableAnalog,
    ConfigStep::ExitConfig,
];

/// Judges the response to a handshake step.
///
/// Implemented for closures taking `(ConfigStep, &[u8])`.
pub trait ResponseValidator {
    /// Return `true` if `response` confirms that `step` was accepted.
    fn validate(&mut self, step: ConfigStep, response: &[u8]) -> bool;
}

impl<F> ResponseValidator for F
where
    F: FnMut(ConfigStep, &[u8]) -> bool,
{
    fn validate(&mut self, step: ConfigStep, response: &[u8]) -> bool {
        self(step, response)
    }
}

/// Accepts a step when the controller answered with the `0x5A` ready marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AckValidator;

impl ResponseValidator for AckValidator {
    fn validate(&mut self, _step: ConfigStep, response: &[u8]) -> bool {
        response.get(READY_OFFSET) == Some(&READY_MARKER)
    }
}

/// Like [`AckValidator`], and additionally requires the config-mode
/// discriminator (`0xF3`) on every step issued while in config mode.
///
/// The enter-config step is answered in the mode the controller was in, so
/// its discriminator is not checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrictValidator;

impl ResponseValidator for StrictValidator {
    fn validate(&mut self, step: ConfigStep, response: &[u8]) -> bool {
        if !AckValidator.validate(step, response) {
            return false;
        }
        step == ConfigStep::EnterConfig || response.get(1) == Some(&CONFIG_READY)
    }
}

/// Accepts every response. For bring-up only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl ResponseValidator for AcceptAll {
    fn validate(&mut self, _step: ConfigStep, _response: &[u8]) -> bool {
        true
    }
}

/// Delay that returns immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Hardware calibration for the handshake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandshakePolicy {
    /// Settling time between consecutive steps, in microseconds.
    pub step_delay_us: u32,
}

impl HandshakePolicy {
    #[must_use]
    pub const fn with_step_delay_us(step_delay_us: u32) -> Self {
        Self { step_delay_us }
    }
}

/// Why a handshake step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigErrorCause {
    /// The validator rejected the response.
    Rejected,
    /// The exchange itself failed.
    Transport(TransportError),
}

/// A handshake aborted at `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigError {
    pub step: ConfigStep,
    pub cause: ConfigErrorCause,
}

impl ConfigError {
    #[must_use]
    pub const fn rejected(step: ConfigStep) -> Self {
        Self {
            step,
            cause: ConfigErrorCause::Rejected,
        }
    }

    #[must_use]
    pub const fn transport(step: ConfigStep, err: TransportError) -> Self {
        Self {
            step,
            cause: ConfigErrorCause::Transport(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_bracketed_by_config_mode() {
        for seq in [&ENABLE_ANALOG_SEQUENCE[..], &DISABLE_ANALOG_SEQUENCE[..]] {
            assert_eq!(seq.first(), Some(&ConfigStep::EnterConfig));
            assert_eq!(seq.last(), Some(&ConfigStep::ExitConfig));
        }
    }

    #[test]
    fn test_ack_validator() {
        let ok = [0xFF, 0xF3, 0x5A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let nak = [0xFF, 0xF3, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(AckValidator.validate(ConfigStep::EnableAnalog, &ok));
        assert!(!AckValidator.validate(ConfigStep::EnableAnalog, &nak));
        // Too short to carry the marker
        assert!(!AckValidator.validate(ConfigStep::EnterConfig, &[0xFF, 0xF3]));
    }

    #[test]
    fn test_strict_validator_checks_config_discriminator() {
        let enter = [0xFF, 0x41, 0x5A, 0xFF, 0xFF];
        let in_config = [0xFF, 0xF3, 0x5A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let not_config = [0xFF, 0x73, 0x5A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(StrictValidator.validate(ConfigStep::EnterConfig, &enter));
        assert!(StrictValidator.validate(ConfigStep::ExitConfig, &in_config));
        assert!(!StrictValidator.validate(ConfigStep::ConfigurePressure, &not_config));
    }

    #[test]
    fn test_closure_validator() {
        let mut seen = 0;
        let mut validator = |step: ConfigStep, _response: &[u8]| {
            seen += 1;
            step != ConfigStep::EnableMotors
        };
        assert!(validator.validate(ConfigStep::EnterConfig, &[]));
        assert!(!validator.validate(ConfigStep::EnableMotors, &[]));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_step_commands() {
        assert_eq!(ConfigStep::DisableAnalog.command(), Command::DisableAnalog);
        assert_eq!(ConfigStep::ExitConfig.command().len(), 9);
        assert_eq!(ConfigStep::EnterConfig.command().len(), 5);
    }
}
