//! Consumer Control HID support - the macOS desktop keys.
//!
//! Consumer Control is a separate HID usage page (0x0C). The K6 uses two
//! of its application-control usages for the Mission Control and
//! Launchpad keys; macOS maps them to the matching desktop actions.
//!
//! A usage is sent while the key is held and an empty report on release.

/// Consumer control report size (2 bytes for usage ID).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Consumer control usage codes (Usage Page 0x0C) this keyboard sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerUsage {
    /// Nothing pressed.
    None = 0x0000,
    /// AC Desktop Show All Windows.
    MissionControl = 0x029F,
    /// AC Desktop Show All Applications.
    Launchpad = 0x02A0,
}

impl From<u16> for ConsumerUsage {
    fn from(code: u16) -> Self {
        match code {
            0x029F => ConsumerUsage::MissionControl,
            0x02A0 => ConsumerUsage::Launchpad,
            _ => ConsumerUsage::None,
        }
    }
}

/// Consumer Control HID report.
///
/// Simple 2-byte report containing a single usage code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Active consumer control usage (little-endian u16).
    pub usage: u16,
}

impl ConsumerReport {
    /// Create an empty (no keys pressed) report.
    pub const fn empty() -> Self {
        Self { usage: 0 }
    }

    /// Create a report with a single usage.
    pub const fn new(usage: ConsumerUsage) -> Self {
        Self {
            usage: usage as u16,
        }
    }

    /// Serialize to USB HID report bytes. Returns 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        buf[..CONSUMER_REPORT_SIZE].copy_from_slice(&self.usage.to_le_bytes());
        CONSUMER_REPORT_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.usage == 0
    }

    pub fn get_usage(&self) -> ConsumerUsage {
        ConsumerUsage::from(self.usage)
    }
}

/// Somewhere to send consumer reports (USB endpoint, Bluetooth module...).
pub trait ConsumerSink {
    fn send_consumer(&mut self, report: ConsumerReport);
}

/// USB HID Report Descriptor for Consumer Control.
///
/// This is a minimal descriptor for a single 16-bit usage.
pub const CONSUMER_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];
