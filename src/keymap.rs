//! Keycodes, key positions and the keymap/layer collaborator.

/// A 16-bit keycode as stored in the keymap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keycode(pub u16);

impl Keycode {
    /// No action.
    pub const NO: Keycode = Keycode(0x0000);
    /// Fall through to the next active layer.
    pub const TRANSPARENT: Keycode = Keycode(0x0001);

    /// Start of the keyboard-level custom keycode range.
    pub const KB_RANGE_START: u16 = 0x7E00;

    pub const BT_PROFILE1: Keycode = Keycode(Self::KB_RANGE_START);
    pub const BT_PROFILE2: Keycode = Keycode(Self::KB_RANGE_START + 1);
    pub const BT_PROFILE3: Keycode = Keycode(Self::KB_RANGE_START + 2);
    pub const BT_PAIR: Keycode = Keycode(Self::KB_RANGE_START + 3);
    pub const BT_RESET: Keycode = Keycode(Self::KB_RANGE_START + 4);
    pub const BT_BATTERY: Keycode = Keycode(Self::KB_RANGE_START + 5);
    pub const MISSION_CONTROL: Keycode = Keycode(Self::KB_RANGE_START + 6);
    pub const LAUNCHPAD: Keycode = Keycode(Self::KB_RANGE_START + 7);

    /// True for anything that actually does something on its layer, i.e.
    /// neither `NO` nor `TRANSPARENT`.
    pub fn is_active(self) -> bool {
        self > Self::TRANSPARENT
    }

    /// Map to a keyboard-level key this crate handles itself.
    pub fn custom(self) -> Option<CustomKey> {
        match self {
            Self::BT_PROFILE1 => Some(CustomKey::BtProfile(0)),
            Self::BT_PROFILE2 => Some(CustomKey::BtProfile(1)),
            Self::BT_PROFILE3 => Some(CustomKey::BtProfile(2)),
            Self::BT_PAIR => Some(CustomKey::BtPair),
            Self::BT_RESET => Some(CustomKey::BtReset),
            Self::BT_BATTERY => Some(CustomKey::BtBattery),
            Self::MISSION_CONTROL => Some(CustomKey::MissionControl),
            Self::LAUNCHPAD => Some(CustomKey::Launchpad),
            _ => None,
        }
    }
}

/// Keys with keyboard-level behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomKey {
    /// Select Bluetooth pairing slot `n` (0-based).
    BtProfile(u8),
    /// Put the current slot into pairing mode.
    BtPair,
    /// Forget all pairings.
    BtReset,
    /// Show the battery tier.
    BtBattery,
    MissionControl,
    Launchpad,
}

impl CustomKey {
    /// Keys that talk to the Bluetooth module and only act on press.
    pub fn is_bluetooth(self) -> bool {
        matches!(
            self,
            CustomKey::BtProfile(_) | CustomKey::BtPair | CustomKey::BtReset | CustomKey::BtBattery
        )
    }
}

/// Matrix position of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Layer state and keymap lookup provided by the firmware core.
pub trait Keymap {
    /// Highest currently active layer.
    fn highest_layer(&self) -> u8;

    /// Keycode stored at `pos` on `layer` (no transparency resolution).
    fn keycode_at(&self, layer: u8, pos: KeyPos) -> Keycode;

    /// Turn on `layer` and turn off every other layer.
    fn move_to_layer(&mut self, layer: u8);
}
