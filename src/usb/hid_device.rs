//! USB consumer-control HID interface.
//!
//! The keyboard/NKRO interfaces belong to the firmware core; this adds the
//! consumer-control interface used by the desktop keys and forwards the
//! reports queued by [`ConsumerChannel`] to it.

use crate::error::Error;
use crate::hid::consumer::{ConsumerReport, ConsumerSink, CONSUMER_REPORT_DESCRIPTOR};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::driver::Driver;
use embassy_usb::Builder;
use static_cell::StaticCell;

/// Depth of the consumer report queue.
pub const CONSUMER_QUEUE_DEPTH: usize = 4;

/// USB HID polling interval (ms).
pub const CONSUMER_POLL_MS: u8 = 1;

pub type ConsumerQueue = Channel<CriticalSectionRawMutex, ConsumerReport, CONSUMER_QUEUE_DEPTH>;

static CONSUMER_STATE: StaticCell<State<'static>> = StaticCell::new();

/// [`ConsumerSink`] that queues reports for [`consumer_writer_task`].
///
/// Key events are handled synchronously, so a full queue drops the report
/// instead of waiting.
pub struct ConsumerChannel {
    tx: Sender<'static, CriticalSectionRawMutex, ConsumerReport, CONSUMER_QUEUE_DEPTH>,
}

impl ConsumerChannel {
    pub fn new(queue: &'static ConsumerQueue) -> Self {
        Self {
            tx: queue.sender(),
        }
    }

    /// Queue `report`, failing if the queue is full.
    pub fn try_send(&self, report: ConsumerReport) -> Result<(), Error> {
        self.tx.try_send(report).map_err(|_| Error::ReportQueueFull)
    }
}

impl ConsumerSink for ConsumerChannel {
    fn send_consumer(&mut self, report: ConsumerReport) {
        if let Err(e) = self.try_send(report) {
            warn!("Consumer report {:?} dropped: {:?}", report, e);
        }
    }
}

/// Register the consumer-control HID interface on `builder`.
///
/// Must be called exactly once; the interface state is static.
pub fn consumer_writer<D: Driver<'static>>(
    builder: &mut Builder<'static, D>,
) -> HidWriter<'static, D, 8> {
    let state = CONSUMER_STATE.init(State::new());
    let config = HidConfig {
        report_descriptor: CONSUMER_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: CONSUMER_POLL_MS,
        max_packet_size: 8,
    };
    let writer = HidWriter::new(builder, state, config);

    info!("USB consumer HID interface registered");
    writer
}

/// Consumer report forwarding task - drains the queue into the USB
/// endpoint. Spawn it as a dedicated task.
pub async fn consumer_writer_task<D: Driver<'static>>(
    mut writer: HidWriter<'static, D, 8>,
    rx: Receiver<'static, CriticalSectionRawMutex, ConsumerReport, CONSUMER_QUEUE_DEPTH>,
) -> ! {
    info!("Consumer writer task started");

    let mut buf = [0u8; 8];

    loop {
        let report = rx.receive().await;
        let n = report.serialize(&mut buf);
        if writer.write(&buf[..n]).await.is_err() {
            warn!("USB consumer write failed");
        }
    }
}
