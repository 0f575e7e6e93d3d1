//! Platform-agnostic DualShock controller driver.
//!
//! This crate sequences the fixed command frames from [`dualshock_proto`]
//! over a blocking full-duplex serial [`Transport`] and turns the responses
//! into [`ButtonState`] snapshots. It has no platform dependencies and runs
//! both on `no_std` targets and on host for testing.
//!
//! # Overview
//!
//! - [`transport`]: the [`Transport`] capability, bus settings ([`SpiConfig`])
//!   and an adapter for `embedded-hal` SPI devices ([`HalTransport`])
//! - [`handshake`]: configuration steps, injectable [`ResponseValidator`]s and
//!   the inter-step delay policy
//! - [`driver`]: the [`DualShock`] driver itself
//!
//! # Usage
//!
//! ```
//! use dualshock_core::{DualShock, Transport, TransportError};
//!
//! /// A controller stuck with nothing pressed.
//! struct IdlePad;
//!
//! impl Transport for IdlePad {
//!     fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
//!         rx.fill(0xFF);
//!         if tx.len() >= 5 {
//!             rx[1] = 0x41;
//!             rx[2] = 0x5A;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut pad = DualShock::new(IdlePad);
//! assert!(pad.connect());
//!
//! let state = pad.poll();
//! assert!(state.digital_valid);
//! assert!(!state.cross);
//! ```
//!
//! # Error Handling
//!
//! Protocol conditions never panic. A poll that comes back with an unknown
//! discriminator, or whose exchange fails, simply has both validity flags
//! cleared. Handshakes report the failing step through [`ConfigError`]; the
//! boolean wrappers collapse that to `false`.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded targets)
//! - **`log`**: Log through the `log` facade (for host tools)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod driver;
pub mod handshake;
pub mod transport;

pub use driver::{DualShock, NO_RESPONSE};
pub use handshake::{
    AcceptAll, AckValidator, ConfigError, ConfigErrorCause, ConfigStep, HandshakePolicy, NoDelay,
    ResponseValidator, StrictValidator, DISABLE_ANALOG_SEQUENCE, ENABLE_ANALOG_SEQUENCE,
};
pub use transport::{BitOrder, HalTransport, SpiConfig, SpiMode, Transport, TransportError};

// Re-export protocol types so consumers only need this crate
pub use dualshock_proto::{self as proto, Button, ButtonState, Command, ResponseKind};
