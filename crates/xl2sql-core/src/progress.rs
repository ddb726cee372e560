//! Progress and status notifications emitted during a run.

/// Receives progress notifications from a batch run.
///
/// Percentages never decrease within a run. Status messages are best-effort
/// and may be coalesced by the consumer.
pub trait ProgressSink {
    fn progress(&mut self, percent: u8);

    fn status(&mut self, message: &str);
}

/// Discards all notifications.
impl ProgressSink for () {
    fn progress(&mut self, _percent: u8) {}

    fn status(&mut self, _message: &str) {}
}

/// Adapts a pair of closures into a [`ProgressSink`].
pub struct FnSink<P, S> {
    on_progress: P,
    on_status: S,
}

impl<P, S> FnSink<P, S>
where
    P: FnMut(u8),
    S: FnMut(&str),
{
    pub fn new(on_progress: P, on_status: S) -> Self {
        Self {
            on_progress,
            on_status,
        }
    }
}

impl<P, S> ProgressSink for FnSink<P, S>
where
    P: FnMut(u8),
    S: FnMut(&str),
{
    fn progress(&mut self, percent: u8) {
        (self.on_progress)(percent);
    }

    fn status(&mut self, message: &str) {
        (self.on_status)(message);
    }
}

/// Rows between two status messages.
pub const STATUS_INTERVAL: usize = 100;

/// `floor(row / total * 100)` for a 1-based row index.
pub fn percent_complete(row: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = row.saturating_mul(100) / total;
    u8::try_from(percent.min(100)).unwrap_or(100)
}
