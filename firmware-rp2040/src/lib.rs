//! DualShock controller reader for RP2040.
//!
//! This crate wires the platform-agnostic [`dualshock_core`] driver to the
//! RP2040 SPI peripheral and reports controller state over defmt/RTT.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Probes the controller on SPI0 (mode 3, MSB first, 250 kHz)
//! 2. Optionally switches it to analog reporting with pressures and rumble
//! 3. Polls it every 16 ms and logs button changes and stick movement
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | SPI0 MISO | 16  | Controller DATA (pull-up required) |
//! | ATT       | 17  | Controller attention (active low) |
//! | SPI0 SCK  | 18  | Controller CLK |
//! | SPI0 MOSI | 19  | Controller CMD |
//! | LED       | 25  | On-board LED (toggles on failed polls) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two concurrent tasks:
//!
//! - **Poll Task**: Polls the controller on a fixed tick, signals each state
//! - **Report Task**: Receives state signals and logs what changed
//!
//! Communication between tasks uses Embassy's [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics, so a slow reporter never delays polling.
//!
//! # Modules
//!
//! - [`transport`]: SPI bus with a GPIO attention line ([`AttentionBus`])
//! - [`report`]: Change detection between polls
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`analog-mode`** (default): Enable analog reporting after connect
//! - **`rumble-demo`**: Drive the large motor from the Cross button pressure

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

// Re-export driver types for convenience
pub use dualshock_core::{
    AckValidator, Button, ButtonState, ConfigError, DualShock, HandshakePolicy, ResponseKind,
    SpiConfig,
};

pub mod report;
pub mod transport;

pub use report::{button_changes, sticks_moved, ButtonChange};
pub use transport::AttentionBus;

/// Poll period; a 60 Hz frame.
pub const POLL_PERIOD_MS: u64 = 16;

/// Settling time between handshake steps on this board.
pub const HANDSHAKE_STEP_DELAY_US: u32 = 100;
