//! Millisecond clock used by the indicator blink and decay logic.

/// Free-running millisecond counter. It may wrap; the renderer copes with
/// a counter that appears to go backwards.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Clock backed by the embassy time driver.
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embedded")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days.
        embassy_time::Instant::now().as_millis() as u32
    }
}
