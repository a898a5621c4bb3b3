//! Platform abstraction layer
//!
//! Capabilities the host hands to a session:
//! - `Clock`: monotonic time
//! - `Scheduler`: ask for the next frame
//! - `SessionHooks`: start/stop notifications for a host platform

/// Monotonic time source
pub trait Clock {
    /// Seconds since an arbitrary fixed origin
    fn now(&self) -> f64;
}

/// Requests the next simulation frame
pub trait Scheduler {
    fn request_frame(&mut self);
}

/// Gameplay start/stop notifications
///
/// Implementations must not block; they cannot touch simulation state.
pub trait SessionHooks {
    fn on_session_start(&mut self) {}
    fn on_session_end(&mut self) {}
}

/// Clock advanced by hand (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }

    pub fn set(&mut self, now: f64) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}

/// Remembers a frame request until the host loop takes it
#[derive(Debug, Clone, Default)]
pub struct PendingFrame {
    pending: bool,
    /// Total requests made (diagnostics)
    pub requests: u64,
}

impl PendingFrame {
    /// Consume the pending request, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Scheduler for PendingFrame {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

/// Hooks that only log, standing in for a host gameplay SDK
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHooks;

impl SessionHooks for LogHooks {
    fn on_session_start(&mut self) {
        log::info!("Platform: gameplay start");
    }

    fn on_session_end(&mut self) {
        log::info!("Platform: gameplay stop");
    }
}

/// `performance.now()` in seconds
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now() / 1000.0,
            None => js_sys::Date::now() / 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new(1.0);
        clock.advance(0.5);
        assert_eq!(clock.now(), 1.5);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn test_pending_frame_take_clears() {
        let mut frames = PendingFrame::default();
        assert!(!frames.take());
        frames.request_frame();
        frames.request_frame();
        assert!(frames.is_pending());
        assert!(frames.take());
        assert!(!frames.take());
        assert_eq!(frames.requests, 2);
    }
}
