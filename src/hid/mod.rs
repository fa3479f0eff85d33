//! HID output the keyboard generates on its own.
//!
//! Regular key reports are built by the firmware core; only the consumer
//! control keys are produced here.

pub mod consumer;

pub use consumer::{ConsumerReport, ConsumerSink, ConsumerUsage};
