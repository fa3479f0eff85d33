//! RGB matrix output.
//!
//! The matrix driver and its animation engine belong to the firmware core;
//! indicators are painted on top of each animation frame through
//! [`LedMatrix`].

pub mod indicators;

use crate::keymap::KeyPos;
use smart_leds::RGB8;

/// Named colors used by the indicators.
pub mod colors {
    use smart_leds::RGB8;

    pub const WHITE: RGB8 = RGB8::new(0xFF, 0xFF, 0xFF);
    pub const RED: RGB8 = RGB8::new(0xFF, 0x00, 0x00);
    pub const ORANGE: RGB8 = RGB8::new(0xFF, 0x80, 0x00);
    pub const YELLOW: RGB8 = RGB8::new(0xFF, 0xFF, 0x00);
    pub const GREEN: RGB8 = RGB8::new(0x00, 0xFF, 0x00);
    pub const BLUE: RGB8 = RGB8::new(0x00, 0x00, 0xFF);
}

/// Per-LED color override on the current frame.
pub trait LedMatrix {
    fn set_color(&mut self, index: u8, color: RGB8);
}

/// Which LED sits under each key of a `ROWS` x `COLS` matrix.
#[derive(Clone, Debug)]
pub struct LedLayout<const ROWS: usize, const COLS: usize> {
    matrix_co: [[Option<u8>; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> LedLayout<ROWS, COLS> {
    /// `None` marks matrix positions without an LED.
    pub const fn new(matrix_co: [[Option<u8>; COLS]; ROWS]) -> Self {
        Self { matrix_co }
    }

    pub fn led_at(&self, pos: KeyPos) -> Option<u8> {
        self.matrix_co
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .flatten()
    }

    /// Every key that has an LED, in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = (KeyPos, u8)> + '_ {
        self.matrix_co.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter().enumerate().filter_map(move |(col, led)| {
                led.map(|led| (KeyPos::new(row as u8, col as u8), led))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: LedLayout<2, 3> = LedLayout::new([
        [Some(0), Some(1), None],
        [Some(2), None, Some(3)],
    ]);

    #[test]
    fn led_lookup() {
        assert_eq!(LAYOUT.led_at(KeyPos::new(0, 1)), Some(1));
        assert_eq!(LAYOUT.led_at(KeyPos::new(0, 2)), None);
        assert_eq!(LAYOUT.led_at(KeyPos::new(5, 0)), None);
    }

    #[test]
    fn keys_skip_positions_without_led() {
        let keys: heapless::Vec<(KeyPos, u8), 8> = LAYOUT.keys().collect();
        assert_eq!(
            keys.as_slice(),
            &[
                (KeyPos::new(0, 0), 0),
                (KeyPos::new(0, 1), 1),
                (KeyPos::new(1, 0), 2),
                (KeyPos::new(1, 2), 3),
            ]
        );
    }
}
