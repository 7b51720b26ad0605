/// Handle identifying one scheduled tick request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Cooperative single-threaded tick scheduler.
///
/// Models a host frame scheduler: at most one tick request is outstanding at
/// a time, a new request supersedes the old one, and a cancelled handle never
/// fires. Whoever requests a tick owns cancelling it on teardown; a stale
/// handle left behind would otherwise fire into state that no longer wants
/// to advance.
#[derive(Debug, Default)]
pub struct TickDriver {
    last_issued: u64,
    pending: Option<TickHandle>,
}

impl TickDriver {
    /// A driver with no outstanding request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick, superseding any outstanding request.
    ///
    /// Handles are unique across the driver's lifetime.
    pub fn request(&mut self) -> TickHandle {
        self.last_issued += 1;
        let handle = TickHandle(self.last_issued);
        self.pending = Some(handle);
        handle
    }

    /// Cancel `handle` if it is still the outstanding request.
    ///
    /// Cancelling a handle that already fired or was superseded is benign.
    pub fn cancel(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Consume the outstanding request, if any.
    ///
    /// Each request fires at most once; continued ticking requires a fresh
    /// [`request`](Self::request).
    pub fn take_due(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    /// True while a request is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_request_fires_at_most_once() {
        let mut driver = TickDriver::new();
        let handle = driver.request();
        assert_eq!(driver.take_due(), Some(handle));
        assert_eq!(driver.take_due(), None);
    }

    #[test]
    fn newer_requests_supersede_older_ones() {
        let mut driver = TickDriver::new();
        let stale = driver.request();
        let fresh = driver.request();
        assert_ne!(stale, fresh);
        assert_eq!(driver.take_due(), Some(fresh));
        assert_eq!(driver.take_due(), None);
    }

    #[test]
    fn cancelled_handles_never_fire() {
        let mut driver = TickDriver::new();
        let handle = driver.request();
        driver.cancel(handle);
        assert!(!driver.has_pending());
        assert_eq!(driver.take_due(), None);
    }

    #[test]
    fn stale_cancel_leaves_the_outstanding_request_alone() {
        let mut driver = TickDriver::new();
        let stale = driver.request();
        let fresh = driver.request();
        driver.cancel(stale);
        assert!(driver.has_pending());
        assert_eq!(driver.take_due(), Some(fresh));
    }
}
