//! DualShock protocol driver.

use dualshock_proto::{decode_response, poll_frame, ButtonState, ResponseKind, MAX_FRAME_LEN};
use embedded_hal::delay::DelayNs;

use crate::handshake::{
    AckValidator, ConfigError, ConfigStep, HandshakePolicy, NoDelay, ResponseValidator,
    DISABLE_ANALOG_SEQUENCE, ENABLE_ANALOG_SEQUENCE,
};
use crate::transport::{SpiConfig, Transport, TransportError};

/// Discriminator reported for a poll whose exchange failed at the transport.
///
/// An absent controller leaves the data line pulled high, so this is what a
/// real bus reads back in the same situation.
pub const NO_RESPONSE: u8 = 0xFF;

/// Driver for one controller on one exclusively owned transport.
///
/// Every operation is a blocking exchange (or a short sequence of them) and
/// takes `&mut self`, so commands can never interleave.
///
/// # Example
///
/// ```ignore
/// let mut pad = DualShock::new(transport);
/// if pad.connect() && pad.enable_analog_mode() {
///     let state = pad.poll();
///     if state.analog_valid {
///         // sticks and pressures are fresh
///     }
/// }
/// ```
pub struct DualShock<T, V = AckValidator, D = NoDelay> {
    transport: T,
    validator: V,
    delay: D,
    policy: HandshakePolicy,
    connected: bool,
    analog_mode: bool,
}

impl<T: Transport> DualShock<T> {
    /// Bind a driver to `transport` with the default handshake policies.
    ///
    /// The transport is configured with [`SpiConfig::DUALSHOCK`].
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, AckValidator, NoDelay, HandshakePolicy::default())
    }
}

impl<T, V, D> DualShock<T, V, D>
where
    T: Transport,
    V: ResponseValidator,
    D: DelayNs,
{
    /// Bind a driver with an explicit validator, delay provider and policy.
    pub fn with_policy(mut transport: T, validator: V, delay: D, policy: HandshakePolicy) -> Self {
        if let Err(e) = transport.configure(&SpiConfig::DUALSHOCK) {
            // Every exchange will be reported as unexpected from here on
            error!("Transport rejected bus settings: {:?}", e);
        }

        Self {
            transport,
            validator,
            delay,
            policy,
            connected: false,
            analog_mode: false,
        }
    }

    /// Probe the controller with one poll in the current mode.
    ///
    /// Reports connected when the response carries a known discriminator.
    pub fn connect(&mut self) -> bool {
        let mut probe = ButtonState::default();
        let kind = self.poll_into(0, 0, &mut probe);
        self.connected = kind.is_known();

        if self.connected {
            info!("Controller connected ({:?})", kind);
        } else {
            warn!("Controller did not answer connect probe ({:?})", kind);
        }
        self.connected
    }

    /// Mark the controller as not connected. No bus traffic.
    pub fn disconnect(&mut self) {
        self.connected = false;
        debug!("Controller disconnected");
    }

    /// Whether the last connect probe succeeded.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether polls currently use the 21-byte analog exchange.
    #[inline]
    #[must_use]
    pub fn is_analog_mode(&self) -> bool {
        self.analog_mode
    }

    /// Poll without rumble.
    pub fn poll(&mut self) -> ButtonState {
        self.poll_with_rumble(0, 0)
    }

    /// Poll, driving the motors in analog mode.
    ///
    /// `rumble_left` goes to the small motor and `rumble_right` to the large
    /// one. In digital mode the motors are not mapped and both are ignored.
    pub fn poll_with_rumble(&mut self, rumble_left: u8, rumble_right: u8) -> ButtonState {
        let mut state = ButtonState::default();
        self.poll_into(rumble_left, rumble_right, &mut state);
        state
    }

    /// Poll into a caller-owned slot.
    ///
    /// Both validity flags are cleared, then set for whatever part of the
    /// response decoded. On an unexpected discriminator, an analog reply to
    /// a digital poll, or a transport fault no other field is written. Never
    /// fails; the returned kind tells the caller what came back.
    pub fn poll_into(
        &mut self,
        rumble_left: u8,
        rumble_right: u8,
        state: &mut ButtonState,
    ) -> ResponseKind {
        let tx = poll_frame(self.analog_mode, rumble_left, rumble_right);
        let mut rx = [0u8; MAX_FRAME_LEN];
        let rx = &mut rx[..tx.len()];

        if let Err(e) = self.exchange(&tx, rx) {
            warn!("Poll transfer failed: {:?}", e);
            state.digital_valid = false;
            state.analog_valid = false;
            return ResponseKind::Unexpected(NO_RESPONSE);
        }

        let kind = decode_response(rx, self.analog_mode, state);
        match kind {
            ResponseKind::Unexpected(code) => warn!("Unexpected poll response {:#x}", code),
            _ if !state.digital_valid => warn!("{:?} response outside analog mode", kind),
            _ => {}
        }
        kind
    }

    /// Switch the controller to analog reporting with pressures and rumble.
    ///
    /// Returns `false` if any step failed; analog mode is then left off.
    pub fn enable_analog_mode(&mut self) -> bool {
        self.try_enable_analog_mode().is_ok()
    }

    /// Switch the controller to analog reporting, reporting the failing step.
    pub fn try_enable_analog_mode(&mut self) -> Result<(), ConfigError> {
        self.run_sequence(&ENABLE_ANALOG_SEQUENCE)?;
        self.analog_mode = true;
        info!("Analog mode enabled");
        Ok(())
    }

    /// Return the controller to digital-only reporting.
    ///
    /// Returns `false` if any step failed; the mode is then left unchanged.
    pub fn disable_analog_mode(&mut self) -> bool {
        self.try_disable_analog_mode().is_ok()
    }

    /// Return to digital-only reporting, reporting the failing step.
    pub fn try_disable_analog_mode(&mut self) -> Result<(), ConfigError> {
        self.run_sequence(&DISABLE_ANALOG_SEQUENCE)?;
        self.analog_mode = false;
        info!("Analog mode disabled");
        Ok(())
    }

    /// Get the handshake policy.
    pub fn policy(&self) -> &HandshakePolicy {
        &self.policy
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Unbind the driver and give the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    /// Run handshake steps in order, stopping at the first failure.
    fn run_sequence(&mut self, steps: &[ConfigStep]) -> Result<(), ConfigError> {
        let mut rx = [0u8; MAX_FRAME_LEN];

        for (i, &step) in steps.iter().enumerate() {
            if i > 0 && self.policy.step_delay_us > 0 {
                self.delay.delay_us(self.policy.step_delay_us);
            }

            let tx = step.command().frame();
            let rx = &mut rx[..tx.len()];

            if let Err(e) = self.exchange(tx, rx) {
                error!("Handshake step {:?} failed: {:?}", step, e);
                return Err(ConfigError::transport(step, e));
            }

            if !self.validator.validate(step, rx) {
                error!("Handshake step {:?} rejected", step);
                return Err(ConfigError::rejected(step));
            }
        }

        Ok(())
    }

    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        trace!("tx {:?}", tx);
        self.transport.transfer(tx, rx)?;
        trace!("rx {:?}", rx);
        Ok(())
    }
}
