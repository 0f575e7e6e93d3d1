//! Serial transport trait, bus configuration and error types.

use embedded_hal::spi::{ErrorKind, SpiDevice};

/// Clock polarity/phase combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// CPOL = 0, CPHA = 0
    Mode0,
    /// CPOL = 0, CPHA = 1
    Mode1,
    /// CPOL = 1, CPHA = 0
    Mode2,
    /// CPOL = 1, CPHA = 1
    Mode3,
}

impl From<SpiMode> for embedded_hal::spi::Mode {
    fn from(mode: SpiMode) -> Self {
        match mode {
            SpiMode::Mode0 => embedded_hal::spi::MODE_0,
            SpiMode::Mode1 => embedded_hal::spi::MODE_1,
            SpiMode::Mode2 => embedded_hal::spi::MODE_2,
            SpiMode::Mode3 => embedded_hal::spi::MODE_3,
        }
    }
}

/// Bit order on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Bus settings applied once when a driver is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    pub mode: SpiMode,
    pub bit_order: BitOrder,
    pub frequency_hz: u32,
}

impl SpiConfig {
    /// Settings the controller expects: mode 3, MSB first, 250 kHz.
    pub const DUALSHOCK: Self = Self {
        mode: SpiMode::Mode3,
        bit_order: BitOrder::MsbFirst,
        frequency_hz: 250_000,
    };
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::DUALSHOCK
    }
}

/// Error type for transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus-level fault (overrun, mode fault, framing).
    Bus,
    /// The exchange did not complete within the transport's bounded wait.
    Timeout,
    /// Chip select / attention line could not be driven.
    ChipSelect,
    /// Transmit and receive buffers differ in length.
    LengthMismatch,
    /// The requested bus settings are not supported.
    Unsupported,
}

impl From<ErrorKind> for TransportError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::ChipSelectFault => TransportError::ChipSelect,
            _ => TransportError::Bus,
        }
    }
}

/// Blocking full-duplex serial transport.
///
/// Implementations own the bus for the driver's whole lifetime; no other
/// code may issue transfers on it, since responses only line up with
/// requests under strict alternation.
pub trait Transport {
    /// Apply bus settings. Called once, when the driver is constructed.
    ///
    /// Transports configured at construction time may keep the default,
    /// which accepts any settings.
    fn configure(&mut self, config: &SpiConfig) -> Result<(), TransportError> {
        let _ = config;
        Ok(())
    }

    /// Exchange `tx.len()` bytes, filling `rx` with the bytes clocked in.
    ///
    /// `rx` has the same length as `tx`. Implementations with a bounded wait
    /// report [`TransportError::Timeout`] instead of blocking forever.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn configure(&mut self, config: &SpiConfig) -> Result<(), TransportError> {
        T::configure(self, config)
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        T::transfer(self, tx, rx)
    }
}

/// [`Transport`] over any `embedded-hal` [`SpiDevice`].
///
/// The device manages the attention (chip select) line per transaction. Bus
/// settings cannot be changed through `SpiDevice`, so the bus must already
/// be set up with [`SpiConfig::DUALSHOCK`] (use `SpiConfig::mode.into()` for
/// the HAL mode); `configure` rejects anything else so a mismatch shows up
/// at construction.
pub struct HalTransport<D> {
    device: D,
    config: SpiConfig,
}

impl<D: SpiDevice> HalTransport<D> {
    /// Wrap a device whose bus was set up with `config`.
    #[must_use]
    pub fn new(device: D, config: SpiConfig) -> Self {
        Self { device, config }
    }

    /// Get a reference to the wrapped device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Give the device back.
    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: SpiDevice> Transport for HalTransport<D> {
    fn configure(&mut self, config: &SpiConfig) -> Result<(), TransportError> {
        if *config == self.config {
            Ok(())
        } else {
            Err(TransportError::Unsupported)
        }
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        use embedded_hal::spi::Error as _;

        if tx.len() != rx.len() {
            return Err(TransportError::LengthMismatch);
        }
        self.device
            .transfer(rx, tx)
            .map_err(|e| TransportError::from(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation};

    /// Loopback device that echoes the inverted transmit bytes.
    struct InvertingDevice {
        transactions: usize,
    }

    impl ErrorType for InvertingDevice {
        type Error = Infallible;
    }

    impl SpiDevice for InvertingDevice {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            self.transactions += 1;
            for op in operations {
                if let Operation::Transfer(read, write) = op {
                    for (r, w) in read.iter_mut().zip(write.iter()) {
                        *r = !*w;
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_dualshock_config_is_mode3_msb_250k() {
        let config = SpiConfig::default();
        assert_eq!(config.mode, SpiMode::Mode3);
        assert_eq!(config.bit_order, BitOrder::MsbFirst);
        assert_eq!(config.frequency_hz, 250_000);
        assert_eq!(
            embedded_hal::spi::Mode::from(config.mode),
            embedded_hal::spi::MODE_3
        );
    }

    #[test]
    fn test_hal_transport_transfers_full_duplex() {
        let mut transport =
            HalTransport::new(InvertingDevice { transactions: 0 }, SpiConfig::DUALSHOCK);
        let mut rx = [0u8; 3];
        transport.transfer(&[0x01, 0x42, 0x00], &mut rx).unwrap();
        assert_eq!(rx, [0xFE, 0xBD, 0xFF]);
        assert_eq!(transport.device().transactions, 1);
    }

    #[test]
    fn test_hal_transport_rejects_length_mismatch() {
        let mut transport =
            HalTransport::new(InvertingDevice { transactions: 0 }, SpiConfig::DUALSHOCK);
        let mut rx = [0u8; 2];
        assert_eq!(
            transport.transfer(&[0x01, 0x42, 0x00], &mut rx),
            Err(TransportError::LengthMismatch)
        );
        assert_eq!(transport.into_inner().transactions, 0);
    }

    #[test]
    fn test_hal_transport_rejects_other_settings() {
        let mut transport =
            HalTransport::new(InvertingDevice { transactions: 0 }, SpiConfig::DUALSHOCK);
        assert_eq!(transport.configure(&SpiConfig::DUALSHOCK), Ok(()));

        let fast = SpiConfig {
            frequency_hz: 1_000_000,
            ..SpiConfig::DUALSHOCK
        };
        assert_eq!(transport.configure(&fast), Err(TransportError::Unsupported));
    }

    #[test]
    fn test_error_kind_conversion() {
        assert_eq!(
            TransportError::from(ErrorKind::ChipSelectFault),
            TransportError::ChipSelect
        );
        assert_eq!(TransportError::from(ErrorKind::Overrun), TransportError::Bus);
    }
}
