//! Unified error type for k6bt.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The indicator state machine itself never fails; errors only show up
//! where raw values enter from the outside.

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Profile slot outside `0..BT_PROFILE_COUNT`.
    InvalidProfile(u8),

    /// DIP switch index this keyboard does not have.
    UnknownDipSwitch(u8),

    /// The HID report queue was full and the report was dropped.
    ReportQueueFull,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidProfile(p) => write!(f, "invalid bluetooth profile {}", p),
            Error::UnknownDipSwitch(i) => write!(f, "unknown dip switch {}", i),
            Error::ReportQueueFull => f.write_str("hid report queue full"),
        }
    }
}
