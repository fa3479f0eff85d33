//! Keyboard-level hooks.
//!
//! [`Keyboard`] is the application context: it owns the Bluetooth
//! indicator state and every collaborator the hooks need, and exposes the
//! entry points the firmware core calls:
//!
//! - [`Keyboard::process_record`] for every key event
//! - [`Keyboard::dip_switch_update`] when a DIP switch moves
//! - [`Keyboard::rgb_matrix_indicators`] once per RGB frame
//! - the `on_*` callbacks from the Bluetooth module

use crate::ble::tracker::ConnectionEvents;
use crate::ble::{BatteryLevel, BluetoothStack, OutputRouter, Profile};
use crate::config::{IndicatorConfig, DIP_BLUETOOTH_MODE, DIP_OS_LAYER, MAC_BASE, WIN_BASE};
use crate::error::Error;
use crate::hid::{ConsumerReport, ConsumerSink, ConsumerUsage};
use crate::keymap::{CustomKey, Keycode, Keymap};
use crate::rgb::indicators::{highlight_layer_keys, IndicatorRenderer};
use crate::rgb::{LedLayout, LedMatrix};
use crate::timer::Clock;

/// Application context for a `ROWS` x `COLS` keyboard.
pub struct Keyboard<B, O, K, H, C, const ROWS: usize, const COLS: usize> {
    bluetooth: B,
    output: O,
    keymap: K,
    consumer: H,
    clock: C,
    layout: LedLayout<ROWS, COLS>,
    events: ConnectionEvents,
    renderer: IndicatorRenderer,
}

impl<B, O, K, H, C, const ROWS: usize, const COLS: usize> Keyboard<B, O, K, H, C, ROWS, COLS>
where
    B: BluetoothStack,
    O: OutputRouter,
    K: Keymap,
    H: ConsumerSink,
    C: Clock,
{
    pub fn new(
        config: IndicatorConfig,
        layout: LedLayout<ROWS, COLS>,
        bluetooth: B,
        output: O,
        keymap: K,
        consumer: H,
        clock: C,
    ) -> Self {
        Self {
            bluetooth,
            output,
            keymap,
            consumer,
            clock,
            layout,
            events: ConnectionEvents::new(config),
            renderer: IndicatorRenderer::new(),
        }
    }

    /// Handle a key event. Returns `false` when the key was consumed here and
    /// `true` when normal processing should continue.
    pub fn process_record(&mut self, keycode: Keycode, pressed: bool) -> bool {
        let Some(key) = keycode.custom() else {
            return true;
        };

        if key.is_bluetooth() && (!pressed || !B::PRESENT) {
            return true;
        }

        match key {
            CustomKey::BtProfile(index) => {
                if let Some(profile) = Profile::new(index) {
                    self.events.switch_profile(profile, &mut self.bluetooth);
                }
            }
            CustomKey::BtPair => self.events.request_pairing(&mut self.bluetooth),
            CustomKey::BtReset => self.events.request_pairing_reset(&mut self.bluetooth),
            CustomKey::BtBattery => self.events.request_battery_check(&mut self.bluetooth),
            CustomKey::MissionControl => self.send_consumer(ConsumerUsage::MissionControl, pressed),
            CustomKey::Launchpad => self.send_consumer(ConsumerUsage::Launchpad, pressed),
        }
        false
    }

    fn send_consumer(&mut self, usage: ConsumerUsage, pressed: bool) {
        let report = if pressed {
            ConsumerReport::new(usage)
        } else {
            ConsumerReport::empty()
        };
        self.consumer.send_consumer(report);
    }

    /// Handle a DIP switch change. Returns `false` if the switch was handled.
    pub fn dip_switch_update(&mut self, index: u8, active: bool) -> bool {
        match index {
            DIP_OS_LAYER => {
                let layer = if active { MAC_BASE } else { WIN_BASE };
                info!("OS switch: base layer {}", layer);
                self.keymap.move_to_layer(layer);
                false
            }
            DIP_BLUETOOTH_MODE => {
                if !B::PRESENT {
                    return true;
                }
                self.events
                    .on_mode_switch(active, &mut self.bluetooth, &mut self.output);
                false
            }
            _ => {
                warn!("{:?}", Error::UnknownDipSwitch(index));
                true
            }
        }
    }

    /// Paint indicators over the current RGB frame. Only the layer
    /// highlighting is limited to `led_min..led_max`. Always returns `true`
    /// so the default indicators still run.
    pub fn rgb_matrix_indicators(
        &mut self,
        led_min: u8,
        led_max: u8,
        leds: &mut impl LedMatrix,
    ) -> bool {
        highlight_layer_keys(
            &self.keymap,
            &self.layout,
            self.events.config(),
            led_min,
            led_max,
            leds,
        );

        let now = self.clock.now_ms();
        self.renderer.render(&mut self.events, now, leds);
        true
    }

    // Bluetooth module callbacks

    pub fn on_connection_successful(&mut self) {
        self.events.on_connection_successful(&mut self.output);
    }

    pub fn on_pairing_entered(&mut self) {
        self.events.on_pairing_entered();
    }

    pub fn on_connecting(&mut self) {
        self.events.on_connecting();
    }

    pub fn on_disconnected(&mut self) {
        self.events.on_disconnected(&mut self.output);
    }

    pub fn on_battery_level(&mut self, level: u8) {
        self.events.on_battery_level(BatteryLevel::from(level));
    }

    // Accessors

    pub fn events(&self) -> &ConnectionEvents {
        &self.events
    }

    pub fn bluetooth(&self) -> &B {
        &self.bluetooth
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn keymap(&self) -> &K {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut K {
        &mut self.keymap
    }

    pub fn consumer(&self) -> &H {
        &self.consumer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::{NoBluetooth, OutputMode};
    use crate::keymap::KeyPos;
    use crate::rgb::colors;
    use core::cell::Cell;
    use smart_leds::RGB8;

    #[ctor::ctor]
    fn init_log() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    #[derive(Default)]
    struct Radio {
        inits: u32,
        profiles: heapless::Vec<u8, 8>,
        pairing: u32,
        resets: u32,
        queries: u32,
    }

    impl BluetoothStack for Radio {
        fn init(&mut self) {
            self.inits += 1;
        }
        fn switch_profile(&mut self, profile: Profile) {
            let _ = self.profiles.push(profile.index());
        }
        fn enter_pairing(&mut self) {
            self.pairing += 1;
        }
        fn reset_pairing(&mut self) {
            self.resets += 1;
        }
        fn query_battery_level(&mut self) {
            self.queries += 1;
        }
    }

    #[derive(Default)]
    struct Router(Option<OutputMode>);

    impl OutputRouter for Router {
        fn set_output(&mut self, mode: OutputMode) {
            self.0 = Some(mode);
        }
    }

    #[derive(Default)]
    struct Layers {
        highest: u8,
        moves: heapless::Vec<u8, 8>,
    }

    impl Keymap for Layers {
        fn highest_layer(&self) -> u8 {
            self.highest
        }
        fn keycode_at(&self, _layer: u8, pos: KeyPos) -> Keycode {
            if pos.col == 0 {
                Keycode::TRANSPARENT
            } else {
                Keycode(0x1E)
            }
        }
        fn move_to_layer(&mut self, layer: u8) {
            self.highest = layer;
            let _ = self.moves.push(layer);
        }
    }

    #[derive(Default)]
    struct Reports(heapless::Vec<u16, 8>);

    impl ConsumerSink for Reports {
        fn send_consumer(&mut self, report: ConsumerReport) {
            let _ = self.0.push(report.usage);
        }
    }

    #[derive(Default)]
    struct ManualClock(Cell<u32>);

    impl Clock for ManualClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct Frame(heapless::Vec<(u8, RGB8), 16>);

    impl LedMatrix for Frame {
        fn set_color(&mut self, index: u8, color: RGB8) {
            let _ = self.0.push((index, color));
        }
    }

    type TestKeyboard<B> = Keyboard<B, Router, Layers, Reports, ManualClock, 1, 3>;

    fn keyboard<B: BluetoothStack>(bluetooth: B) -> TestKeyboard<B> {
        Keyboard::new(
            IndicatorConfig::default(),
            LedLayout::new([[Some(10), Some(11), None]]),
            bluetooth,
            Router::default(),
            Layers::default(),
            Reports::default(),
            ManualClock::default(),
        )
    }

    fn bluetooth_keyboard() -> TestKeyboard<Radio> {
        let mut kb = keyboard(Radio::default());
        assert!(!kb.dip_switch_update(DIP_BLUETOOTH_MODE, false));
        kb
    }

    #[test]
    fn ordinary_keys_pass_through() {
        let mut kb = bluetooth_keyboard();
        assert!(kb.process_record(Keycode(0x04), true));
        assert!(kb.process_record(Keycode(0x04), false));
    }

    #[test]
    fn profile_keys_switch_on_press_only() {
        let mut kb = bluetooth_keyboard();
        assert!(!kb.process_record(Keycode::BT_PROFILE2, true));
        assert!(kb.process_record(Keycode::BT_PROFILE2, false));
        assert_eq!(kb.bluetooth().profiles.as_slice(), &[1]);
        assert_eq!(kb.events().profile().index(), 1);
    }

    #[test]
    fn bluetooth_keys_are_swallowed_in_cable_mode() {
        let mut kb = keyboard(Radio::default());
        assert!(!kb.process_record(Keycode::BT_PAIR, true));
        assert!(!kb.process_record(Keycode::BT_RESET, true));
        assert!(!kb.process_record(Keycode::BT_BATTERY, true));
        assert_eq!(kb.bluetooth().pairing, 0);
        assert_eq!(kb.bluetooth().resets, 0);
        assert_eq!(kb.bluetooth().queries, 0);
        assert_eq!(kb.events().battery_timer(), 0);
    }

    #[test]
    fn battery_key_opens_long_window() {
        let mut kb = bluetooth_keyboard();
        kb.process_record(Keycode::BT_BATTERY, true);
        assert_eq!(kb.bluetooth().queries, 1);
        assert_eq!(kb.events().battery_timer(), 10_000);
    }

    #[test]
    fn consumer_keys_send_usage_then_release() {
        let mut kb = keyboard(Radio::default());
        assert!(!kb.process_record(Keycode::MISSION_CONTROL, true));
        assert!(!kb.process_record(Keycode::MISSION_CONTROL, false));
        assert!(!kb.process_record(Keycode::LAUNCHPAD, true));
        assert!(!kb.process_record(Keycode::LAUNCHPAD, false));
        assert_eq!(kb.consumer().0.as_slice(), &[0x029F, 0, 0x02A0, 0]);
    }

    #[test]
    fn os_switch_moves_base_layer() {
        let mut kb = keyboard(Radio::default());
        assert!(!kb.dip_switch_update(DIP_OS_LAYER, true));
        assert!(!kb.dip_switch_update(DIP_OS_LAYER, false));
        assert_eq!(kb.keymap().moves.as_slice(), &[MAC_BASE, WIN_BASE]);
    }

    #[test]
    fn mode_switch_toggles_bluetooth() {
        let mut kb = bluetooth_keyboard();
        assert!(kb.events().bluetooth_enabled());
        assert_eq!(kb.output().0, Some(OutputMode::None));
        assert_eq!(kb.bluetooth().inits, 1);

        assert!(!kb.dip_switch_update(DIP_BLUETOOTH_MODE, true));
        assert!(!kb.events().bluetooth_enabled());
        assert_eq!(kb.output().0, Some(OutputMode::Usb));
    }

    #[test]
    fn unknown_dip_switch_is_not_handled() {
        let mut kb = keyboard(Radio::default());
        assert!(kb.dip_switch_update(7, true));
    }

    #[test]
    fn cable_only_build_ignores_mode_switch_and_bluetooth_keys() {
        let mut kb = keyboard(NoBluetooth);
        assert!(kb.dip_switch_update(DIP_BLUETOOTH_MODE, false));
        assert!(!kb.events().bluetooth_enabled());
        assert!(kb.process_record(Keycode::BT_PROFILE1, true));
        assert!(!kb.process_record(Keycode::LAUNCHPAD, true));
    }

    #[test]
    fn indicators_highlight_fn_layer_then_bluetooth() {
        let mut kb = bluetooth_keyboard();
        kb.keymap_mut().highest = 3;
        kb.on_pairing_entered();
        kb.on_battery_level(4);

        let mut frame = Frame::default();
        assert!(kb.rgb_matrix_indicators(0, 64, &mut frame));
        assert_eq!(
            frame.0.as_slice(),
            &[
                (11, colors::WHITE),
                (16, colors::BLUE),
                (49, colors::GREEN)
            ]
        );
    }

    #[test]
    fn indicators_in_cable_mode_only_highlight_layers() {
        let mut kb = keyboard(Radio::default());
        kb.keymap_mut().highest = 1;
        kb.on_battery_level(4);

        let mut frame = Frame::default();
        assert!(kb.rgb_matrix_indicators(0, 64, &mut frame));
        assert_eq!(frame.0.as_slice(), &[(11, colors::WHITE)]);
        assert_eq!(kb.events().battery_timer(), 2500);
    }

    #[test]
    fn indicators_follow_the_clock() {
        let mut kb = bluetooth_keyboard();
        kb.on_disconnected();
        kb.clock().0.set(1000);
        let mut frame = Frame::default();
        kb.rgb_matrix_indicators(0, 64, &mut frame);
        // First tick after boot: 1000 ms elapsed.
        assert_eq!(kb.events().disconnected_timer(), 1500);
        assert_eq!(frame.0.as_slice(), &[(16, colors::RED)]);
    }
}
