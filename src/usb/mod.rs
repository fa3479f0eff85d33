//! USB device glue.
//!
//! The keyboard's USB device is built by the firmware core with
//! `embassy-usb`; we only add the consumer-control HID interface and the
//! task that feeds it.

pub mod hid_device;

pub use hid_device::{consumer_writer, consumer_writer_task, ConsumerChannel, ConsumerQueue};
