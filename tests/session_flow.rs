//! Full sessions driven with a synthetic clock

use orb_runner::platform::{ManualClock, PendingFrame, SessionHooks};
use orb_runner::sim::{CollisionKind, SessionPhase, TickOutcome};
use orb_runner::{Session, Settings};

const FRAME: f64 = 1.0 / 60.0;

#[derive(Default)]
struct RecordingHooks {
    starts: u32,
    ends: u32,
}

impl SessionHooks for RecordingHooks {
    fn on_session_start(&mut self) {
        self.starts += 1;
    }

    fn on_session_end(&mut self) {
        self.ends += 1;
    }
}

type TestSession = Session<ManualClock, PendingFrame, RecordingHooks>;

fn new_session(seed: u64) -> TestSession {
    let mut session = Session::new(
        &Settings::default(),
        seed,
        ManualClock::new(0.0),
        PendingFrame::default(),
        RecordingHooks::default(),
    );
    session.resize(800.0, 600.0);
    session
}

/// Run scheduled frames until the scheduler stops asking
fn run_until_idle(session: &mut TestSession, max_frames: u32) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    while session.scheduler_mut().take() && outcomes.len() < max_frames as usize {
        session.clock_mut().advance(FRAME);
        outcomes.push(session.frame());
    }
    outcomes
}

#[test]
fn free_fall_ends_on_floor_exactly_once() {
    let mut session = new_session(7);
    session.start();

    let outcomes = run_until_idle(&mut session, 10_000);
    let game_overs: Vec<_> = outcomes
        .iter()
        .filter(|o| matches!(o, TickOutcome::GameOver(_)))
        .collect();
    assert_eq!(game_overs, vec![&TickOutcome::GameOver(CollisionKind::Floor)]);
    assert_eq!(outcomes.last(), Some(&TickOutcome::GameOver(CollisionKind::Floor)));

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::GameOver);
    assert!(state.player.pos.y + state.player.radius > state.height);
    assert_eq!(session.hooks().ends, 1);
    assert!(!session.scheduler().is_pending());

    // Frozen afterwards
    let score = state.score;
    let obstacles = state.obstacles.clone();
    let particles = state.particles.clone();
    for _ in 0..10 {
        session.clock_mut().advance(FRAME);
        assert_eq!(session.frame(), TickOutcome::Idle);
    }
    let state = session.state();
    assert_eq!(state.score, score);
    assert_eq!(state.obstacles, obstacles);
    assert_eq!(state.particles, particles);
    assert_eq!(session.hooks().ends, 1);
}

#[test]
fn restart_resets_everything() {
    let mut session = new_session(11);
    session.start();
    let fresh_obstacles = session.state().obstacles.len();

    // Play a while with some inputs so there is state to clear
    for i in 0..40 {
        session.clock_mut().advance(FRAME);
        if i % 10 == 0 {
            session.thrust();
        }
        session.frame();
    }
    session.clock_mut().advance(3.0);
    session.frame();
    assert!(!session.state().particles.is_empty() || session.state().score > 0.0);

    session.restart();
    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Playing);
    assert_eq!(state.obstacles.len(), fresh_obstacles);
    assert!(state.particles.is_empty());
    assert_eq!(state.score, 0.0);
    assert_eq!(state.elapsed_time, 0.0);
    assert_eq!(state.difficulty.factor, 1.0);
    assert_eq!(state.frames, 0);
    assert_eq!(state.player.velocity, 0.0);
    assert_eq!(state.player.pos.y, 300.0);
    assert_eq!(state.end_reason, None);

    // And a second reset in a row lands in the same place
    session.restart();
    let again = session.state();
    assert_eq!(again.obstacles.len(), fresh_obstacles);
    assert!(again.particles.is_empty());
    assert_eq!(again.score, 0.0);
    assert_eq!(again.difficulty.factor, 1.0);
    assert_eq!(session.hooks().starts, 3);
}

#[test]
fn score_tracks_elapsed_time() {
    // Obstacles crawl so none reach the orb in this run
    let mut settings = Settings::default();
    settings.tuning.base_speed = 0.1;
    let mut session = Session::new(
        &settings,
        3,
        ManualClock::new(0.0),
        PendingFrame::default(),
        RecordingHooks::default(),
    );
    session.resize(800.0, 600.0);
    session.start();

    // Hop whenever the orb sinks below the middle of the view
    for _ in 0..741 {
        session.clock_mut().advance(FRAME);
        let player = &session.state().player;
        if player.pos.y > 300.0 && player.velocity >= 0.0 {
            session.thrust();
        }
        session.frame();
        assert!(session.is_playing());
    }

    let state = session.state();
    // 741 frames at 60 Hz = 12.35 s
    assert!((state.elapsed_time - 12.35).abs() < 1e-3);
    assert!((state.score - 12.3).abs() < 1e-4);
    assert!((state.difficulty.factor - (1.0 + 0.02 * state.elapsed_time)).abs() < 1e-5);
}

#[test]
fn thrust_is_last_write_wins() {
    let mut session = new_session(5);
    session.start();
    session.thrust();
    session.thrust();
    session.thrust();
    assert_eq!(session.state().player.velocity, -5.0);
    assert_eq!(session.state().particles.len(), 15);
}

#[test]
fn resize_does_not_touch_in_flight_obstacles() {
    let mut session = new_session(9);
    session.start();
    let before = session.state().obstacles.clone();
    let player_before = session.state().player.pos;

    session.resize(1200.0, 900.0);
    assert_eq!(session.state().obstacles, before);
    assert_eq!(session.state().player.pos, player_before);
    assert_eq!(session.snapshot().width, 1200.0);
}
