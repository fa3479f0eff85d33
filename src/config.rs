//! Keyboard-wide constants and runtime indicator configuration.
//!
//! LED indices, layer ids, timer windows and blink rates live here so they
//! can be tuned in one place.

// Indicator windows

/// How long the "connected" flash stays on the profile LED (ms).
pub const CONNECTED_FLASH_MS: u32 = 2500;

/// How long the "disconnected" flash stays on the profile LED (ms).
pub const DISCONNECTED_FLASH_MS: u32 = 2500;

/// How long a battery report from the radio is displayed (ms).
pub const BATTERY_REPORT_MS: u32 = 2500;

/// Optimistic display window opened by the battery-check key (ms).
/// The real report that follows replaces it with [`BATTERY_REPORT_MS`].
pub const BATTERY_CHECK_MS: u32 = 10_000;

// Blink half-periods (ms). The LED is lit while `(now / period) % 2 == 0`.

pub const CONNECTED_BLINK_MS: u32 = 250;
pub const CONNECTING_BLINK_MS: u32 = 125;
pub const PAIRING_BLINK_MS: u32 = 62;
pub const DISCONNECTED_BLINK_MS: u32 = 250;

// LED matrix

/// LED of the first profile key; profile `n` lights `PROFILE_LED_BASE + n`.
pub const PROFILE_LED_BASE: u8 = 16;

/// LED used to show the battery tier.
pub const BATTERY_LED: u8 = 49;

// Layers
//
//   0 = macOS base, 1 = macOS Fn, 2 = Windows base, 3 = Windows Fn

pub const MAC_BASE: u8 = 0;
pub const MAC_FN: u8 = 1;
pub const WIN_BASE: u8 = 2;
pub const WIN_FN: u8 = 3;

// Bluetooth

/// Number of pairing slots on the iton module.
pub const BT_PROFILE_COUNT: u8 = 3;

// DIP switches

/// Switch that selects cable (active) or Bluetooth (inactive) mode.
pub const DIP_BLUETOOTH_MODE: u8 = 0;

/// Switch that selects the macOS (active) or Windows (inactive) base layer.
pub const DIP_OS_LAYER: u8 = 1;

/// Tunables used by the tracker and the indicator renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    pub profile_led_base: u8,
    pub battery_led: u8,
    /// Layers that never get their keys highlighted.
    pub base_layers: [u8; 2],
    pub connected_flash_ms: u32,
    pub disconnected_flash_ms: u32,
    pub battery_report_ms: u32,
    pub battery_check_ms: u32,
    pub connected_blink_ms: u32,
    pub connecting_blink_ms: u32,
    pub pairing_blink_ms: u32,
    pub disconnected_blink_ms: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            profile_led_base: PROFILE_LED_BASE,
            battery_led: BATTERY_LED,
            base_layers: [MAC_BASE, WIN_BASE],
            connected_flash_ms: CONNECTED_FLASH_MS,
            disconnected_flash_ms: DISCONNECTED_FLASH_MS,
            battery_report_ms: BATTERY_REPORT_MS,
            battery_check_ms: BATTERY_CHECK_MS,
            connected_blink_ms: CONNECTED_BLINK_MS,
            connecting_blink_ms: CONNECTING_BLINK_MS,
            pairing_blink_ms: PAIRING_BLINK_MS,
            disconnected_blink_ms: DISCONNECTED_BLINK_MS,
        }
    }
}

impl IndicatorConfig {
    /// Whether `layer` is one of the base layers.
    pub fn is_base_layer(&self, layer: u8) -> bool {
        self.base_layers.contains(&layer)
    }

    /// LED index of the profile key for slot `profile`.
    pub fn profile_led(&self, profile: u8) -> u8 {
        self.profile_led_base.wrapping_add(profile)
    }
}
