//! Keyboard-level firmware hooks for the Keychron K6 RGB with the iton
//! Bluetooth module.
//!
//! The firmware core (matrix scan, keymap, USB/HID, RGB animations, radio
//! driver) calls into [`keyboard::Keyboard`] for:
//!
//! - Bluetooth profile / pairing / battery keys and the macOS desktop keys
//! - the cable/Bluetooth and macOS/Windows DIP switches
//! - status indicators painted over every RGB frame: fn-layer key
//!   highlighting, the profile LED blinking with the link state, and the
//!   battery LED
//!
//! Everything but the `embedded` glue is plain logic and tests on the host:
//!
//! Usage: `cargo test`
//!
//! The `embedded` feature adds the embassy clock, the critical-section
//! shared context and the USB consumer-control interface.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod ble;
pub mod config;
pub mod error;
pub mod hid;
pub mod keyboard;
pub mod keymap;
pub mod rgb;
pub mod timer;

#[cfg(feature = "embedded")]
pub mod shared;
#[cfg(feature = "embedded")]
pub mod usb;

pub use ble::tracker::{ConnectionEvents, LinkIndicator};
pub use ble::{BatteryLevel, BluetoothStack, NoBluetooth, OutputMode, OutputRouter, Profile};
pub use config::IndicatorConfig;
pub use error::Error;
pub use hid::{ConsumerReport, ConsumerSink, ConsumerUsage};
pub use keyboard::Keyboard;
pub use keymap::{CustomKey, KeyPos, Keycode, Keymap};
pub use rgb::indicators::IndicatorRenderer;
pub use rgb::{LedLayout, LedMatrix};
pub use timer::Clock;
