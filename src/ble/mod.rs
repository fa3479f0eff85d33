//! Bluetooth subsystem.
//!
//! The radio itself is an iton module driven by the firmware core. This
//! module describes what we need from it:
//!
//! 1. **Bluetooth stack** - profile switching, pairing, battery queries.
//! 2. **Output router** - where HID reports go (USB, Bluetooth, nowhere).
//! 3. **Tracker** - turns the module's connection callbacks into timed
//!    indicator state for the RGB matrix.

pub mod tracker;

use crate::config::BT_PROFILE_COUNT;
use crate::error::Error;

/// Commands the keyboard sends to the Bluetooth module.
///
/// All calls are fire-and-forget; failures are the module's business and
/// surface later as connection callbacks.
pub trait BluetoothStack {
    /// `false` for keyboards built without a Bluetooth module.
    const PRESENT: bool = true;

    /// (Re)initialise the module.
    fn init(&mut self);

    fn switch_profile(&mut self, profile: Profile);

    fn enter_pairing(&mut self);

    fn reset_pairing(&mut self);

    /// Ask for a battery report; the answer arrives as a battery callback.
    fn query_battery_level(&mut self);
}

/// Null Bluetooth stack for cable-only builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBluetooth;

impl BluetoothStack for NoBluetooth {
    const PRESENT: bool = false;

    fn init(&mut self) {}

    fn switch_profile(&mut self, _profile: Profile) {}

    fn enter_pairing(&mut self) {}

    fn reset_pairing(&mut self) {}

    fn query_battery_level(&mut self) {}
}

/// Destination of outgoing HID reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Nowhere yet (waiting for a Bluetooth connection).
    None,
    Usb,
    Bluetooth,
}

/// Selects where HID reports are routed.
pub trait OutputRouter {
    fn set_output(&mut self, mode: OutputMode);
}

/// One of the Bluetooth pairing slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Profile(u8);

impl Profile {
    /// Returns `None` if `index` is not a valid slot.
    pub const fn new(index: u8) -> Option<Self> {
        if index < BT_PROFILE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Profile {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Profile::new(index).ok_or(Error::InvalidProfile(index))
    }
}

/// Battery tier as reported by the module.
///
/// 4 is full, 1 is nearly empty. Anything else (0 included) is treated as
/// unknown, so the raw byte is kept as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryLevel(pub u8);

impl BatteryLevel {
    pub const UNKNOWN: BatteryLevel = BatteryLevel(0);
    pub const FULL: BatteryLevel = BatteryLevel(4);
}

impl From<u8> for BatteryLevel {
    fn from(raw: u8) -> Self {
        BatteryLevel(raw)
    }
}
