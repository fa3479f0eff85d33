//! Status indicators painted over the RGB matrix.
//!
//! Called once per frame by the matrix driver. Two independent layers:
//!
//! - **Layer keys**: on any non-base layer, every key with an actual
//!   binding on that layer lights up white.
//! - **Bluetooth**: the profile key blinks with the link state and the
//!   battery key shows the reported tier. Timed events are decayed by the
//!   wall-clock time elapsed since the previous frame.

use super::{colors, LedLayout, LedMatrix};
use crate::ble::tracker::{ConnectionEvents, LinkIndicator};
use crate::ble::BatteryLevel;
use crate::config::IndicatorConfig;
use crate::keymap::Keymap;
use smart_leds::RGB8;

/// A color that is lit for `half_period_ms`, then dark for as long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blink {
    pub color: RGB8,
    pub half_period_ms: u32,
}

impl Blink {
    /// Color to paint at `now_ms`, `None` during the dark half.
    pub fn at(&self, now_ms: u32) -> Option<RGB8> {
        blink_lit(now_ms, self.half_period_ms).then_some(self.color)
    }
}

/// Blink phase: lit while `(now / half_period) % 2 == 0`.
pub fn blink_lit(now_ms: u32, half_period_ms: u32) -> bool {
    if half_period_ms == 0 {
        return true;
    }
    (now_ms / half_period_ms) % 2 == 0
}

/// Color shown on the battery LED for a reported tier.
pub fn battery_color(level: BatteryLevel) -> RGB8 {
    match level.0 {
        4 => colors::GREEN,
        3 => colors::YELLOW,
        2 => colors::ORANGE,
        1 => colors::RED,
        _ => colors::WHITE,
    }
}

/// Profile-LED pattern for a link state.
pub fn link_blink(link: LinkIndicator, config: &IndicatorConfig) -> Option<Blink> {
    let (color, half_period_ms) = match link {
        LinkIndicator::Idle => return None,
        LinkIndicator::Connected { .. } => (colors::GREEN, config.connected_blink_ms),
        LinkIndicator::Connecting => (colors::YELLOW, config.connecting_blink_ms),
        LinkIndicator::Pairing => (colors::BLUE, config.pairing_blink_ms),
        LinkIndicator::Disconnected { .. } => (colors::RED, config.disconnected_blink_ms),
    };
    Some(Blink {
        color,
        half_period_ms,
    })
}

/// Light every bound key of the highest active layer, unless that layer is
/// a base layer. Only LEDs in `led_min..led_max` are touched.
pub fn highlight_layer_keys<const ROWS: usize, const COLS: usize>(
    keymap: &impl Keymap,
    layout: &LedLayout<ROWS, COLS>,
    config: &IndicatorConfig,
    led_min: u8,
    led_max: u8,
    leds: &mut impl LedMatrix,
) {
    let layer = keymap.highest_layer();
    if config.is_base_layer(layer) {
        return;
    }

    for (pos, led) in layout.keys() {
        if (led_min..led_max).contains(&led) && keymap.keycode_at(layer, pos).is_active() {
            leds.set_color(led, colors::WHITE);
        }
    }
}

/// Bluetooth indicator painter; remembers when it last ran.
#[derive(Clone, Debug, Default)]
pub struct IndicatorRenderer {
    last_update_ms: u32,
}

impl IndicatorRenderer {
    pub const fn new() -> Self {
        Self { last_update_ms: 0 }
    }

    /// Milliseconds since the previous frame, at least 1. A clock that went
    /// backwards (counter wrap, reset) also counts as 1 ms.
    pub fn elapsed_since_last(&mut self, now_ms: u32) -> u32 {
        let elapsed = if now_ms >= self.last_update_ms {
            (now_ms - self.last_update_ms).max(1)
        } else {
            1
        };
        self.last_update_ms = now_ms;
        elapsed
    }

    pub fn last_update_ms(&self) -> u32 {
        self.last_update_ms
    }

    /// Paint the link and battery indicators for `now_ms`, then decay the
    /// tracker's timers. Does nothing in cable mode.
    pub fn render(&mut self, events: &mut ConnectionEvents, now_ms: u32, leds: &mut impl LedMatrix) {
        if !events.bluetooth_enabled() {
            return;
        }

        let elapsed = self.elapsed_since_last(now_ms);
        let config = *events.config();

        if let Some(color) = link_blink(events.link(), &config).and_then(|b| b.at(now_ms)) {
            leds.set_color(config.profile_led(events.profile().index()), color);
        }

        if events.battery_timer() > 0 {
            leds.set_color(config.battery_led, battery_color(events.battery_level()));
        }

        events.decay(elapsed);
    }
}
