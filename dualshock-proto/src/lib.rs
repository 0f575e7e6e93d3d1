//! DualShock controller protocol: command frames, response decoding and the
//! decoded button state.
//!
//! This crate is pure data and byte manipulation. It knows nothing about the
//! serial bus; see `dualshock-core` for the driver that sequences these
//! frames over a transport.
//!
//! - **Commands**: [`Command`] and the fixed frame constants in [`command`]
//! - **State**: [`ButtonState`] snapshot and [`Button`] identifiers
//! - **Decoding**: [`decode_response`], [`decode_digital`], [`decode_analog`]
//!   and the explicit offset tables ([`DIGITAL_BYTE3_MAP`],
//!   [`DIGITAL_BYTE4_MAP`], [`ANALOG_OFFSETS`])
//! - **Encoding**: [`encode_digital_response`], [`encode_analog_response`]
//!   for emulators and synthetic test frames
//!
//! # Frame Layout
//!
//! ```text
//! offset:  0    1      2    3     4     5..=8    9..=20
//! tx:      01   42     00   00    00    00...    00...
//! rx:      FF   41/73  5A   btn0  btn1  sticks   pressures
//! ```
//!
//! Offsets 5-20 are only present in the 21-byte analog exchange.
//!
//! # Example
//!
//! ```
//! use dualshock_proto::{decode_response, ButtonState, ResponseKind};
//!
//! let mut state = ButtonState::default();
//! let kind = decode_response(&[0xFF, 0x41, 0x5A, 0xFE, 0xFF], false, &mut state);
//! assert_eq!(kind, ResponseKind::Digital);
//! assert!(state.digital_valid);
//! assert!(state.select);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod command;
pub mod decode;
pub mod encode;
pub mod types;

pub use command::{
    poll_frame, Command, ANALOG_FRAME_LEN, CONFIG_FRAME_LEN, DIGITAL_FRAME_LEN, MAX_FRAME_LEN,
};
pub use decode::{
    decode_analog, decode_digital, decode_response, AnalogField, ResponseKind, ANALOG_OFFSETS,
    ANALOG_READY, CONFIG_READY, DIGITAL_BYTE3_MAP, DIGITAL_BYTE4_MAP, DIGITAL_READY,
    READY_MARKER, READY_OFFSET,
};
pub use encode::{encode_analog_response, encode_digital, encode_digital_response, Frame};
pub use types::{Button, ButtonState, STICK_CENTER};
