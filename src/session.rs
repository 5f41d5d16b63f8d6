//! Gameplay session controller
//!
//! Owns the ship, the asteroid collection, the shared particle emitter and
//! the screen shake, and drives them in a fixed tick order:
//! time counters -> shake -> ship -> asteroids -> reap -> win check.
//!
//! Reaping is two-phase: the update pass only marks (the asteroid's own
//! `destroyed` flag), then a single compaction pass removes the marked
//! entries. The collection is never mutated while it is being iterated.

use crate::asteroid::{self, AsteroidActor};
use crate::formations::TrialLayout;
use crate::particles::ParticleEmitter;
use crate::save::{GameMode, GameStateData};
use crate::shake::ScreenShake;
use crate::ship::{ShipActor, ShipInput, ShipTint};
use glam::Vec2;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

/// Countdown for a regular-mode run, in seconds.
const REGULAR_TIME_LIMIT: f32 = 60.0;
/// Shake pulse fired for every reaped asteroid.
const DESTRUCTION_SHAKE: (f32, f32) = (3.0, 0.15);
/// Spin rate for trial formation asteroids.
const TRIAL_ANGULAR_VELOCITY: f32 = 0.5;
const MAX_PARTICLES: usize = 1000;

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameOutcome {
    /// Regular mode: the countdown hit zero.
    TimeUp { destroyed: u32 },
    /// Time trial: every formation asteroid was destroyed.
    TrialCleared { elapsed: f32 },
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStatus {
    Running,
    Complete(GameOutcome),
}

/// Fire-and-forget cues for the shell; no feedback is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AsteroidDestroyed,
}

pub struct GameSession {
    mode: GameMode,
    ship: ShipActor,
    asteroids: Vec<AsteroidActor>,
    emitter: Rc<RefCell<ParticleEmitter>>,
    shake: ScreenShake,
    screen: Vec2,
    active_time: f32,
    remaining_time: f32,
    current_level: u32,
    total_destroyed: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a fresh regular-mode run at level 0.
    pub fn new_regular(screen_width: f32, screen_height: f32, tint: ShipTint) -> Self {
        let mut session = Self::empty(GameMode::Regular, screen_width, screen_height, tint);
        session.spawn_level_asteroids();
        session
    }

    /// Starts a time trial on the given formation.
    pub fn new_trial(
        layout: TrialLayout,
        screen_width: f32,
        screen_height: f32,
        tint: ShipTint,
    ) -> Self {
        let mut session = Self::empty(GameMode::TimeTrial, screen_width, screen_height, tint);

        session.asteroids = layout
            .positions(screen_width, screen_height)
            .into_iter()
            .map(|position| {
                AsteroidActor::new(
                    position,
                    TRIAL_ANGULAR_VELOCITY,
                    session.emitter.clone(),
                    false,
                )
            })
            .collect();

        session
    }

    /// Rebuilds a session from a snapshot.
    ///
    /// Everything is constructed before anything observable happens, so a
    /// caller can load into a temporary and swap it in only on success. Null
    /// snapshot entries are skipped. The ship respawns at the default spawn
    /// with only its saved tint.
    pub fn from_snapshot(state: &GameStateData, screen_width: f32, screen_height: f32) -> Self {
        let mut session = Self::empty(
            state.game_mode,
            screen_width,
            screen_height,
            state.ship_color,
        );

        session.active_time = state.play_time;
        session.remaining_time = state.remaining_time;
        session.current_level = state.current_level;
        session.total_destroyed = state.total_destroyed;

        session.asteroids = state
            .asteroids
            .iter()
            .flatten()
            .map(|data| AsteroidActor::from_data(data, session.emitter.clone()))
            .collect();

        session
    }

    fn empty(mode: GameMode, screen_width: f32, screen_height: f32, tint: ShipTint) -> Self {
        GameSession {
            mode,
            ship: ShipActor::new(screen_width, screen_height, tint),
            asteroids: Vec::new(),
            emitter: Rc::new(RefCell::new(ParticleEmitter::new(MAX_PARTICLES))),
            shake: ScreenShake::new(),
            screen: Vec2::new(screen_width, screen_height),
            active_time: 0.0,
            remaining_time: REGULAR_TIME_LIMIT,
            current_level: 0,
            total_destroyed: 0,
            events: Vec::new(),
        }
    }

    /// Spawns the asteroid wave for the current level: `10 + 2 * level`
    /// asteroids at random positions. Levels past the first drift.
    fn spawn_level_asteroids(&mut self) {
        let mut rng = rand::thread_rng();
        let count = 10 + 2 * self.current_level;
        let drifting = self.current_level > 0;

        self.asteroids = (0..count)
            .map(|_| {
                let position = Vec2::new(
                    rng.gen_range(0.0..self.screen.x - asteroid::FRAME_WIDTH as f32),
                    rng.gen_range(0.0..self.screen.y - asteroid::FRAME_HEIGHT as f32),
                );
                let mut a = AsteroidActor::new(
                    position,
                    rng.gen_range(0.0..1.0),
                    self.emitter.clone(),
                    drifting,
                );
                if drifting {
                    a.set_screen_bounds(self.screen.x, self.screen.y);
                }
                a
            })
            .collect();
    }

    /// Advances the whole session by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &ShipInput) -> SessionStatus {
        match self.mode {
            GameMode::Regular => {
                self.active_time += dt;
                self.remaining_time -= dt;
            }
            GameMode::TimeTrial => {
                self.active_time += dt;
            }
        }

        let mut rng = rand::thread_rng();
        self.shake.update(dt, &mut rng);
        self.emitter.borrow_mut().update(dt);

        self.ship.update(dt, input);
        let ship_bounds = self.ship.bounds();

        // Update pass: marks only, via each asteroid's destroyed flag
        for a in &mut self.asteroids {
            if a.update(dt, &ship_bounds) {
                self.events.push(GameEvent::AsteroidDestroyed);
            }
        }

        // Compaction pass
        let reaped = self.asteroids.iter().filter(|a| a.destroyed()).count() as u32;
        for _ in 0..reaped {
            self.shake.start(DESTRUCTION_SHAKE.0, DESTRUCTION_SHAKE.1);
        }
        if self.mode == GameMode::Regular {
            self.total_destroyed += reaped;
        }
        self.asteroids.retain(|a| !a.destroyed());

        match self.mode {
            GameMode::Regular => {
                if self.asteroids.is_empty() {
                    self.current_level += 1;
                    self.spawn_level_asteroids();
                }
                if self.remaining_time <= 0.0 {
                    return SessionStatus::Complete(GameOutcome::TimeUp {
                        destroyed: self.total_destroyed,
                    });
                }
            }
            GameMode::TimeTrial => {
                if self.asteroids.is_empty() {
                    return SessionStatus::Complete(GameOutcome::TrialCleared {
                        elapsed: self.active_time,
                    });
                }
            }
        }

        SessionStatus::Running
    }

    /// Builds the serializable snapshot of the current state.
    pub fn save_state(&self) -> GameStateData {
        GameStateData {
            asteroids: self
                .asteroids
                .iter()
                .map(|a| Some(a.save_state()))
                .collect(),
            play_time: self.active_time,
            remaining_time: self.remaining_time,
            ship_color: self.ship.tint(),
            game_mode: self.mode,
            current_level: self.current_level,
            total_destroyed: self.total_destroyed,
        }
    }

    /// Drains the cues accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn ship(&self) -> &ShipActor {
        &self.ship
    }

    pub fn asteroids(&self) -> &[AsteroidActor] {
        &self.asteroids
    }

    pub fn emitter(&self) -> Rc<RefCell<ParticleEmitter>> {
        self.emitter.clone()
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    pub fn active_time(&self) -> f32 {
        self.active_time
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_time
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn total_destroyed(&self) -> u32 {
        self.total_destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 1280.0;
    const H: f32 = 720.0;
    const DT: f32 = 1.0 / 60.0;

    fn idle() -> ShipInput {
        ShipInput::default()
    }

    /// Advances the session up to `ticks` times, stopping early on completion.
    fn run_ticks(session: &mut GameSession, ticks: u32) -> SessionStatus {
        let mut status = SessionStatus::Running;
        for _ in 0..ticks {
            status = session.update(DT, &idle());
            if status != SessionStatus::Running {
                break;
            }
        }
        status
    }

    #[test]
    fn test_regular_session_spawns_level_zero_wave() {
        let session = GameSession::new_regular(W, H, ShipTint::WHITE);
        assert_eq!(session.asteroids().len(), 10);
        assert_eq!(session.current_level(), 0);
        assert_eq!(session.mode(), GameMode::Regular);
    }

    #[test]
    fn test_trial_session_uses_formation() {
        let session = GameSession::new_trial(TrialLayout::Circle, W, H, ShipTint::WHITE);
        let expected = TrialLayout::Circle.positions(W, H);

        assert_eq!(session.asteroids().len(), expected.len());
        for (a, p) in session.asteroids().iter().zip(expected) {
            assert_eq!(a.position(), p);
        }
    }

    #[test]
    fn test_level_progression_size() {
        // Empty the collection through a snapshot edit: restore with no live
        // asteroids at level 2, then one tick must spawn 10 + 2*3
        let session = GameSession::new_regular(W, H, ShipTint::WHITE);
        let mut state = session.save_state();
        state.asteroids.clear();
        state.current_level = 2;

        let mut restored = GameSession::from_snapshot(&state, W, H);
        assert!(restored.asteroids().is_empty());

        restored.update(DT, &idle());

        assert_eq!(restored.current_level(), 3);
        assert_eq!(restored.asteroids().len(), 10 + 2 * 3);
    }

    #[test]
    fn test_regular_mode_times_out() {
        let session = GameSession::new_regular(W, H, ShipTint::WHITE);
        let mut state = session.save_state();
        state.remaining_time = 3.0 * DT;
        let mut restored = GameSession::from_snapshot(&state, W, H);

        let status = run_ticks(&mut restored, 10);

        match status {
            SessionStatus::Complete(GameOutcome::TimeUp { destroyed }) => {
                assert_eq!(destroyed, restored.total_destroyed());
            }
            other => panic!("expected TimeUp, got {:?}", other),
        }
    }

    #[test]
    fn test_trial_completes_when_cleared() {
        let session = GameSession::new_trial(TrialLayout::Maze, W, H, ShipTint::WHITE);
        let mut state = session.save_state();
        // All formation asteroids already destroyed in the snapshot
        for entry in state.asteroids.iter_mut().flatten() {
            entry.destroyed = true;
        }
        let mut restored = GameSession::from_snapshot(&state, W, H);

        let status = restored.update(DT, &idle());

        match status {
            SessionStatus::Complete(GameOutcome::TrialCleared { elapsed }) => {
                assert!(elapsed > 0.0);
            }
            other => panic!("expected TrialCleared, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_round_trip_preserves_asteroids() {
        let mut session = GameSession::new_regular(W, H, ShipTint::new(70, 140, 255));
        // Advance a bit so times are non-trivial
        run_ticks(&mut session, 30);

        let state = session.save_state();
        let restored = GameSession::from_snapshot(&state, W, H);

        assert_eq!(restored.mode(), session.mode());
        assert_eq!(restored.current_level(), session.current_level());
        assert_eq!(restored.total_destroyed(), session.total_destroyed());
        assert_eq!(restored.active_time(), session.active_time());
        assert_eq!(restored.remaining_time(), session.remaining_time());
        assert_eq!(restored.ship().tint(), ShipTint::new(70, 140, 255));
        assert_eq!(restored.asteroids().len(), session.asteroids().len());

        for (a, b) in restored.asteroids().iter().zip(session.asteroids()) {
            assert_eq!(a.save_state(), b.save_state());
        }
    }

    #[test]
    fn test_snapshot_round_trip_preserves_drift_fields() {
        let session = GameSession::new_regular(W, H, ShipTint::WHITE);
        let mut state = session.save_state();
        state.current_level = 1;
        state.asteroids.clear();
        let mut leveled = GameSession::from_snapshot(&state, W, H);
        leveled.update(DT, &idle()); // spawns the drifting level-1 wave

        let saved = leveled.save_state();
        let restored = GameSession::from_snapshot(&saved, W, H);

        for (entry, actor) in saved.asteroids.iter().flatten().zip(restored.asteroids()) {
            assert!(entry.drifting);
            assert_eq!(entry.screen_width, W);
            let back = actor.save_state();
            assert_eq!(back.velocity_x, entry.velocity_x);
            assert_eq!(back.velocity_y, entry.velocity_y);
        }
    }

    #[test]
    fn test_snapshot_skips_null_entries() {
        let session = GameSession::new_regular(W, H, ShipTint::WHITE);
        let mut state = session.save_state();
        state.asteroids.insert(0, None);
        state.asteroids.push(None);
        let live = state.asteroids.iter().flatten().count();

        let restored = GameSession::from_snapshot(&state, W, H);
        assert_eq!(restored.asteroids().len(), live);
    }

    #[test]
    fn test_ship_respawns_on_restore() {
        let mut session = GameSession::new_regular(W, H, ShipTint::WHITE);
        let thrust = ShipInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..60 {
            session.update(DT, &thrust);
        }
        assert_ne!(session.ship().position(), Vec2::new(W / 2.0, H / 2.0));

        let restored = GameSession::from_snapshot(&session.save_state(), W, H);
        assert_eq!(restored.ship().position(), Vec2::new(W / 2.0, H / 2.0));
    }

    #[test]
    fn test_destruction_reaps_counts_and_signals() {
        // Park a single stationary asteroid on the ship spawn so the overlap
        // destroys it, then watch the reap bookkeeping
        let session = GameSession::new_regular(W, H, ShipTint::WHITE);
        let mut state = session.save_state();
        state.asteroids.clear();
        state.asteroids.push(Some(crate::save::AsteroidData {
            // Ship bounds sit at viewport center + (10, 16); center the
            // asteroid's circle there
            position_x: W / 2.0 + 10.0 - 52.0,
            position_y: H / 2.0 + 16.0 - 52.0,
            angular_velocity: 0.2,
            destroyed: false,
            velocity_x: 0.0,
            velocity_y: 0.0,
            drifting: false,
            screen_width: 0.0,
            screen_height: 0.0,
        }));
        let mut restored = GameSession::from_snapshot(&state, W, H);

        let mut events = Vec::new();
        for _ in 0..70 {
            restored.update(DT, &idle());
            events.extend(restored.take_events());
            if restored.total_destroyed() > 0 {
                break;
            }
        }

        assert_eq!(restored.total_destroyed(), 1);
        assert_eq!(events, vec![GameEvent::AsteroidDestroyed]);
        // The wave respawned because the collection emptied
        assert_eq!(restored.current_level(), 1);
        assert!(!restored.asteroids().is_empty());
    }
}
