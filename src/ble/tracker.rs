//! Connection event tracker.
//!
//! The Bluetooth module reports connection lifecycle changes through
//! callbacks. Each callback turns into a visual event: a countdown for the
//! one-shot flashes (connected, disconnected, battery) or a latched state
//! for the ongoing ones (connecting, pairing). The indicator renderer reads
//! this state once per tick and decays the countdowns.

use super::{BatteryLevel, BluetoothStack, OutputMode, OutputRouter, Profile};
use crate::config::IndicatorConfig;

/// What the profile LED is currently showing.
///
/// Every connection callback replaces the previous value, so at most one
/// link event is ever active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkIndicator {
    #[default]
    Idle,
    /// Link established; flash for the remaining window.
    Connected { remaining_ms: u32 },
    /// Reconnecting to the host of the active profile.
    Connecting,
    /// Advertising for a new host.
    Pairing,
    /// Link lost; flash for the remaining window.
    Disconnected { remaining_ms: u32 },
}

impl LinkIndicator {
    /// Count timed events down by `elapsed_ms`, falling back to `Idle`
    /// once the window is used up. Latched states are left alone.
    pub fn decay(&mut self, elapsed_ms: u32) {
        let expired = match self {
            LinkIndicator::Connected { remaining_ms } | LinkIndicator::Disconnected { remaining_ms } => {
                *remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                *remaining_ms == 0
            }
            LinkIndicator::Idle | LinkIndicator::Connecting | LinkIndicator::Pairing => false,
        };
        if expired {
            debug!("Link indicator expired");
            *self = LinkIndicator::Idle;
        }
    }
}

/// Process-wide Bluetooth indicator state.
///
/// Created once at boot with everything off and owned by the keyboard
/// context; callbacks and the render tick borrow it in turn.
#[derive(Clone, Debug)]
pub struct ConnectionEvents {
    config: IndicatorConfig,
    link: LinkIndicator,
    battery_timer: u32,
    battery_level: BatteryLevel,
    profile: Profile,
    bluetooth_enabled: bool,
}

impl Default for ConnectionEvents {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}

impl ConnectionEvents {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config,
            link: LinkIndicator::Idle,
            battery_timer: 0,
            battery_level: BatteryLevel::UNKNOWN,
            profile: Profile::default(),
            bluetooth_enabled: false,
        }
    }

    // Callbacks from the Bluetooth module

    /// The module connected to the host of the active profile.
    pub fn on_connection_successful(&mut self, output: &mut impl OutputRouter) {
        info!("BT: connected on profile {}", self.profile.index());
        output.set_output(OutputMode::Bluetooth);
        self.link = LinkIndicator::Connected {
            remaining_ms: self.config.connected_flash_ms,
        };
    }

    pub fn on_pairing_entered(&mut self) {
        info!("BT: pairing on profile {}", self.profile.index());
        self.link = LinkIndicator::Pairing;
    }

    pub fn on_connecting(&mut self) {
        info!("BT: connecting on profile {}", self.profile.index());
        self.link = LinkIndicator::Connecting;
    }

    pub fn on_disconnected(&mut self, output: &mut impl OutputRouter) {
        info!("BT: disconnected");
        output.set_output(OutputMode::Usb);
        self.link = LinkIndicator::Disconnected {
            remaining_ms: self.config.disconnected_flash_ms,
        };
    }

    /// A battery report arrived. Always opens the short report window, even
    /// if a battery check had opened the long one.
    pub fn on_battery_level(&mut self, level: BatteryLevel) {
        info!("BT: battery level {}", level.0);
        self.battery_level = level;
        self.battery_timer = self.config.battery_report_ms;
    }

    // User requests, ignored unless Bluetooth mode is on

    /// Show the battery LED right away and ask the module for a fresh
    /// reading.
    pub fn request_battery_check(&mut self, bt: &mut impl BluetoothStack) {
        if !self.bluetooth_enabled {
            return;
        }
        self.battery_timer = self.config.battery_check_ms;
        bt.query_battery_level();
    }

    pub fn switch_profile(&mut self, profile: Profile, bt: &mut impl BluetoothStack) {
        if !self.bluetooth_enabled {
            return;
        }
        info!("BT: switching to profile {}", profile.index());
        bt.switch_profile(profile);
        self.profile = profile;
    }

    pub fn request_pairing(&mut self, bt: &mut impl BluetoothStack) {
        if self.bluetooth_enabled {
            bt.enter_pairing();
        }
    }

    pub fn request_pairing_reset(&mut self, bt: &mut impl BluetoothStack) {
        if self.bluetooth_enabled {
            info!("BT: resetting pairings");
            bt.reset_pairing();
        }
    }

    // Mode switch

    /// The cable/Bluetooth mode switch moved. `active` means cable mode.
    pub fn on_mode_switch(
        &mut self,
        active: bool,
        bt: &mut impl BluetoothStack,
        output: &mut impl OutputRouter,
    ) {
        self.bluetooth_enabled = !active;
        info!("Mode switch: bluetooth={}", self.bluetooth_enabled);
        if active {
            output.set_output(OutputMode::Usb);
        } else {
            bt.init();
            output.set_output(OutputMode::None);
        }
    }

    // Render-side access

    /// Count all timed events down by `elapsed_ms`, clamping at zero.
    /// The battery tier is forgotten when its window closes.
    pub fn decay(&mut self, elapsed_ms: u32) {
        self.link.decay(elapsed_ms);

        if self.battery_timer > 0 {
            if elapsed_ms >= self.battery_timer {
                debug!("Battery indicator expired");
                self.battery_timer = 0;
                self.battery_level = BatteryLevel::UNKNOWN;
            } else {
                self.battery_timer -= elapsed_ms;
            }
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn link(&self) -> LinkIndicator {
        self.link
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn bluetooth_enabled(&self) -> bool {
        self.bluetooth_enabled
    }

    pub fn connecting(&self) -> bool {
        self.link == LinkIndicator::Connecting
    }

    pub fn pairing(&self) -> bool {
        self.link == LinkIndicator::Pairing
    }

    /// Remaining "connected" window, 0 when inactive.
    pub fn connected_timer(&self) -> u32 {
        match self.link {
            LinkIndicator::Connected { remaining_ms } => remaining_ms,
            _ => 0,
        }
    }

    /// Remaining "disconnected" window, 0 when inactive.
    pub fn disconnected_timer(&self) -> u32 {
        match self.link {
            LinkIndicator::Disconnected { remaining_ms } => remaining_ms,
            _ => 0,
        }
    }

    pub fn battery_timer(&self) -> u32 {
        self.battery_timer
    }

    /// Last reported tier; only meaningful while `battery_timer() > 0`.
    pub fn battery_level(&self) -> BatteryLevel {
        self.battery_level
    }
}
