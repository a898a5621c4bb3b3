//! Session orchestration
//!
//! Wraps `SimulationState` with the host capabilities and exposes the
//! commands the outside world sends: start, restart, thrust, resize and the
//! per-frame callback.

use crate::platform::{Clock, Scheduler, SessionHooks};
use crate::settings::Settings;
use crate::sim::{RenderSnapshot, SessionPhase, SimulationState, TickOutcome, tick};

/// A game instance driven by an injected clock, scheduler and hooks
pub struct Session<C, S, H> {
    state: SimulationState,
    clock: C,
    scheduler: S,
    hooks: H,
    base_seed: u64,
    /// Sessions started so far
    sessions: u64,
}

impl<C: Clock, S: Scheduler, H: SessionHooks> Session<C, S, H> {
    pub fn new(settings: &Settings, seed: u64, clock: C, scheduler: S, hooks: H) -> Self {
        Self {
            state: SimulationState::new(seed, settings),
            clock,
            scheduler,
            hooks,
            base_seed: seed,
            sessions: 0,
        }
    }

    /// Reset everything and begin playing
    pub fn start(&mut self) {
        let seed = self.base_seed ^ self.sessions.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.sessions += 1;

        let now = self.clock.now();
        self.state.reset(now, seed);
        log::info!(
            "Session {} started (seed {seed}, view {}x{})",
            self.sessions,
            self.state.width,
            self.state.height
        );

        self.hooks.on_session_start();
        self.scheduler.request_frame();
    }

    /// Same as `start`; kept separate for the game-over button
    pub fn restart(&mut self) {
        self.start();
    }

    /// Player input from any source
    pub fn thrust(&mut self) -> bool {
        self.state.thrust()
    }

    /// Viewport changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Scheduled frame callback: run one tick and decide what comes next
    pub fn frame(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let outcome = tick(&mut self.state, now);

        match outcome {
            TickOutcome::Continue => self.scheduler.request_frame(),
            TickOutcome::GameOver(_) => self.hooks.on_session_end(),
            TickOutcome::Idle => {}
        }

        outcome
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        self.state.snapshot()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase == SessionPhase::Playing
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, PendingFrame};

    #[derive(Default)]
    struct CountingHooks {
        starts: u32,
        ends: u32,
    }

    impl SessionHooks for CountingHooks {
        fn on_session_start(&mut self) {
            self.starts += 1;
        }
        fn on_session_end(&mut self) {
            self.ends += 1;
        }
    }

    fn session() -> Session<ManualClock, PendingFrame, CountingHooks> {
        Session::new(
            &Settings::default(),
            99,
            ManualClock::new(100.0),
            PendingFrame::default(),
            CountingHooks::default(),
        )
    }

    #[test]
    fn test_start_requests_frame_and_notifies() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(!s.scheduler().is_pending());

        s.start();
        assert!(s.is_playing());
        assert_eq!(s.hooks().starts, 1);
        assert!(s.scheduler_mut().take());
        assert_eq!(s.state().start_time, 100.0);
    }

    #[test]
    fn test_frame_reschedules_while_playing() {
        let mut s = session();
        s.start();
        s.scheduler_mut().take();

        s.clock_mut().advance(1.0 / 60.0);
        assert_eq!(s.frame(), TickOutcome::Continue);
        assert!(s.scheduler_mut().take());
    }

    #[test]
    fn test_frame_when_idle_does_nothing() {
        let mut s = session();
        assert_eq!(s.frame(), TickOutcome::Idle);
        assert!(!s.scheduler().is_pending());
        assert_eq!(s.hooks().ends, 0);
    }

    #[test]
    fn test_sessions_use_distinct_seeds() {
        let mut s = session();
        s.start();
        let first = s.state().seed;
        s.restart();
        assert_ne!(s.state().seed, first);
        assert_eq!(s.sessions_started(), 2);
        assert_eq!(s.hooks().starts, 2);
    }

    #[test]
    fn test_thrust_ignored_until_started() {
        let mut s = session();
        assert!(!s.thrust());
        s.start();
        assert!(s.thrust());
        assert_eq!(s.snapshot().particles.len(), 5);
    }
}
