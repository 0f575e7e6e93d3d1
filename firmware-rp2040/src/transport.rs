//! SPI bus plus a manually driven attention line.
//!
//! The controller frames every command with its attention (chip select)
//! line: pulled low for the whole exchange, released afterwards. The RP2040
//! hardware chip select toggles between bytes in mode 3, so the line is a
//! plain GPIO driven around each transfer.
//!
//! # Pins
//!
//! Uses SPI0 by default:
//! - GPIO 16: MISO (controller DATA, needs a pull-up)
//! - GPIO 17: ATT
//! - GPIO 18: SCK (controller CLK)
//! - GPIO 19: MOSI (controller CMD)

use dualshock_core::{SpiConfig, Transport, TransportError};
use embassy_rp::gpio::Output;
use embedded_hal::spi::{Error as _, SpiBus};

/// [`Transport`] over a blocking SPI bus with a GPIO attention line.
pub struct AttentionBus<'d, B> {
    bus: B,
    attention: Output<'d>,
    config: SpiConfig,
}

impl<'d, B: SpiBus> AttentionBus<'d, B> {
    /// Wrap a bus already set up with `config`.
    ///
    /// The attention line is released (driven high) immediately.
    #[must_use]
    pub fn new(bus: B, mut attention: Output<'d>, config: SpiConfig) -> Self {
        attention.set_high();
        Self {
            bus,
            attention,
            config,
        }
    }
}

impl<B: SpiBus> Transport for AttentionBus<'_, B> {
    fn configure(&mut self, config: &SpiConfig) -> Result<(), TransportError> {
        // embassy-rp fixes the bus settings at construction
        if *config == self.config {
            Ok(())
        } else {
            Err(TransportError::Unsupported)
        }
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        if tx.len() != rx.len() {
            return Err(TransportError::LengthMismatch);
        }

        self.attention.set_low();
        let result = self
            .bus
            .transfer(rx, tx)
            .and_then(|()| self.bus.flush())
            .map_err(|e| TransportError::from(e.kind()));
        self.attention.set_high();

        result
    }
}
