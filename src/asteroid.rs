//! Asteroid obstacle actor
//!
//! Lifecycle: Alive -> Destroying (overlapping the ship, break-up animation
//! playing) -> Destroyed (terminal; the session compacts it away). Asteroids
//! optionally drift with a random velocity chosen at construction, wrapping
//! toroidally against the configured screen rectangle.
//!
//! Every asteroid shares one particle emitter through a non-owning handle;
//! the burst fires exactly once, on the tick the break-up animation finishes.

use crate::collision::BoundingCircle;
use crate::particles::ParticleEmitter;
use crate::render::{FrameRect, SpriteParams};
use crate::save::AsteroidData;
use glam::Vec2;
use rand::Rng;
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

pub const FRAME_WIDTH: u32 = 96;
pub const FRAME_HEIGHT: u32 = 96;
const FRAME_COUNT: u32 = 8;
const ANIMATION_SPEED: f32 = 0.1;

/// Bounding circle placement relative to the sprite's top-left position.
const BOUNDS_OFFSET: Vec2 = Vec2::new(52.0, 52.0);
const BOUNDS_RADIUS: f32 = 30.0;

/// Slight red tint over the base rock sprite.
const TINT: (u8, u8, u8) = (255, 204, 204);

pub struct AsteroidActor {
    position: Vec2,
    angular_velocity: f32,
    rotation: f32,
    animation_timer: f32,
    animation_frame: u32,
    velocity: Vec2,
    drifting: bool,
    screen_bounds: Option<Vec2>,
    destroyed: bool,
    bounds: BoundingCircle,
    emitter: Rc<RefCell<ParticleEmitter>>,
}

impl AsteroidActor {
    /// Creates an asteroid at `position`.
    ///
    /// A drifting asteroid picks a random speed in [10, 100) and a random
    /// direction once, here; the velocity stays fixed for its lifetime.
    /// Drift does nothing until screen bounds are configured.
    pub fn new(
        position: Vec2,
        angular_velocity: f32,
        emitter: Rc<RefCell<ParticleEmitter>>,
        drifting: bool,
    ) -> Self {
        let velocity = if drifting {
            let mut rng = rand::thread_rng();
            let speed = rng.gen_range(10.0..100.0);
            let angle = rng.gen_range(0.0..TAU);
            Vec2::new(angle.cos(), angle.sin()) * speed
        } else {
            Vec2::ZERO
        };

        AsteroidActor {
            position,
            angular_velocity,
            rotation: 0.0,
            animation_timer: 0.0,
            animation_frame: 0,
            velocity,
            drifting,
            screen_bounds: None,
            destroyed: false,
            bounds: BoundingCircle::new(position + BOUNDS_OFFSET, BOUNDS_RADIUS),
            emitter,
        }
    }

    /// Rebuilds an asteroid from a snapshot entry.
    ///
    /// Animation frame and timer intentionally reset to zero; everything else
    /// round-trips. Zero-sized screen bounds in the data mean "unset".
    pub fn from_data(data: &AsteroidData, emitter: Rc<RefCell<ParticleEmitter>>) -> Self {
        let position = Vec2::new(data.position_x, data.position_y);
        let screen_bounds = if data.screen_width > 0.0 && data.screen_height > 0.0 {
            Some(Vec2::new(data.screen_width, data.screen_height))
        } else {
            None
        };

        AsteroidActor {
            position,
            angular_velocity: data.angular_velocity,
            rotation: 0.0,
            animation_timer: 0.0,
            animation_frame: 0,
            velocity: Vec2::new(data.velocity_x, data.velocity_y),
            drifting: data.drifting,
            screen_bounds,
            destroyed: data.destroyed,
            bounds: BoundingCircle::new(position + BOUNDS_OFFSET, BOUNDS_RADIUS),
            emitter,
        }
    }

    /// Projects this asteroid into a snapshot entry.
    pub fn save_state(&self) -> AsteroidData {
        let (screen_width, screen_height) = match self.screen_bounds {
            Some(bounds) => (bounds.x, bounds.y),
            None => (0.0, 0.0),
        };

        AsteroidData {
            position_x: self.position.x,
            position_y: self.position.y,
            angular_velocity: self.angular_velocity,
            destroyed: self.destroyed,
            velocity_x: self.velocity.x,
            velocity_y: self.velocity.y,
            drifting: self.drifting,
            screen_width,
            screen_height,
        }
    }

    /// Enables drift wrapping against a screen of the given size.
    pub fn set_screen_bounds(&mut self, width: f32, height: f32) {
        self.screen_bounds = Some(Vec2::new(width, height));
    }

    /// Advances the asteroid by `dt` against the ship's bounds.
    ///
    /// Returns `true` on the single tick the asteroid finishes breaking apart.
    /// A destroyed asteroid is a permanent no-op.
    pub fn update(&mut self, dt: f32, ship_bounds: &BoundingCircle) -> bool {
        if self.destroyed {
            return false;
        }

        self.animation_timer += dt;
        // Cosmetic spin, independent of the break-up animation; advances per
        // tick, not per second
        self.rotation += self.angular_velocity / 3.0;

        if self.drifting {
            if let Some(screen) = self.screen_bounds {
                let margin = FRAME_WIDTH as f32;
                let mut next = self.position + self.velocity * dt;

                if next.x < -margin {
                    next.x = screen.x;
                }
                if next.x > screen.x {
                    next.x = -margin;
                }
                if next.y < -margin {
                    next.y = screen.y;
                }
                if next.y > screen.y {
                    next.y = -margin;
                }

                self.position = next;
                self.bounds = BoundingCircle::new(self.position + BOUNDS_OFFSET, BOUNDS_RADIUS);
            }
        }

        if self.bounds.intersects(ship_bounds) && self.animation_timer > ANIMATION_SPEED {
            self.animation_frame += 1;
            if self.animation_frame >= FRAME_COUNT {
                self.destroyed = true;
                self.emitter.borrow_mut().emit(self.bounds.center);
                return true;
            }
            self.animation_timer -= ANIMATION_SPEED;
        }

        false
    }

    /// Draw parameters for the current state. The sheet is a horizontal strip
    /// of `FRAME_COUNT` frames; destroyed asteroids have nothing to draw.
    pub fn sprite_params(&self) -> Option<SpriteParams> {
        if self.destroyed {
            return None;
        }

        let origin = Vec2::new(FRAME_WIDTH as f32 / 2.0, FRAME_HEIGHT as f32 / 2.0);
        Some(SpriteParams {
            position: self.position + origin,
            source: FrameRect::new(
                (self.animation_frame * FRAME_WIDTH) as i32,
                0,
                FRAME_WIDTH,
                FRAME_HEIGHT,
            ),
            rotation: self.rotation,
            tint: TINT,
            origin,
            scale: 1.0,
        })
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn bounds(&self) -> BoundingCircle {
        self.bounds
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_emitter() -> Rc<RefCell<ParticleEmitter>> {
        Rc::new(RefCell::new(ParticleEmitter::new(1000)))
    }

    fn overlapping_ship(asteroid: &AsteroidActor) -> BoundingCircle {
        BoundingCircle::new(asteroid.bounds().center, 16.0)
    }

    fn far_ship() -> BoundingCircle {
        BoundingCircle::new(Vec2::new(-500.0, -500.0), 16.0)
    }

    #[test]
    fn test_destruction_after_full_animation() {
        let emitter = test_emitter();
        let mut asteroid = AsteroidActor::new(Vec2::new(100.0, 100.0), 0.5, emitter.clone(), false);
        let ship = overlapping_ship(&asteroid);

        // 8 frames at 0.1s each; tick at 60 Hz until the sequence completes
        let mut destroyed_ticks = 0;
        for _ in 0..60 {
            if asteroid.update(1.0 / 60.0, &ship) {
                destroyed_ticks += 1;
            }
        }

        assert!(asteroid.destroyed());
        assert_eq!(destroyed_ticks, 1);
        assert!(!emitter.borrow().particles().is_empty());
    }

    #[test]
    fn test_destroyed_update_is_noop() {
        let emitter = test_emitter();
        let mut asteroid = AsteroidActor::new(Vec2::new(100.0, 100.0), 0.5, emitter.clone(), false);
        let ship = overlapping_ship(&asteroid);

        for _ in 0..60 {
            asteroid.update(1.0 / 60.0, &ship);
        }
        assert!(asteroid.destroyed());

        emitter.borrow_mut().clear();
        let again = asteroid.update(1.0 / 60.0, &ship);

        assert!(!again);
        assert!(emitter.borrow().particles().is_empty());
    }

    #[test]
    fn test_no_animation_without_overlap() {
        let emitter = test_emitter();
        let mut asteroid = AsteroidActor::new(Vec2::new(100.0, 100.0), 0.5, emitter, false);

        for _ in 0..120 {
            asteroid.update(1.0 / 60.0, &far_ship());
        }

        assert!(!asteroid.destroyed());
        let params = asteroid.sprite_params().unwrap();
        assert_eq!(params.source.x, 0);
    }

    #[test]
    fn test_rotation_advances_during_destruction() {
        let emitter = test_emitter();
        let mut asteroid = AsteroidActor::new(Vec2::new(100.0, 100.0), 0.9, emitter, false);
        let ship = overlapping_ship(&asteroid);

        asteroid.update(1.0 / 60.0, &ship);
        let early = asteroid.sprite_params().unwrap().rotation;
        asteroid.update(1.0 / 60.0, &ship);
        let later = asteroid.sprite_params().unwrap().rotation;

        assert!(later > early);
    }

    #[test]
    fn test_drift_inert_without_screen_bounds() {
        let emitter = test_emitter();
        let mut asteroid = AsteroidActor::new(Vec2::new(100.0, 100.0), 0.5, emitter, true);
        let start = asteroid.position();

        for _ in 0..30 {
            asteroid.update(1.0 / 60.0, &far_ship());
        }

        assert_eq!(asteroid.position(), start);
    }

    #[test]
    fn test_drift_moves_and_tracks_bounds() {
        let emitter = test_emitter();
        let mut asteroid = AsteroidActor::new(Vec2::new(100.0, 100.0), 0.5, emitter, true);
        asteroid.set_screen_bounds(1280.0, 720.0);
        let start = asteroid.position();

        for _ in 0..30 {
            asteroid.update(1.0 / 60.0, &far_ship());
        }

        assert_ne!(asteroid.position(), start);
        assert_eq!(asteroid.bounds().center, asteroid.position() + BOUNDS_OFFSET);
    }

    #[test]
    fn test_save_state_round_trip() {
        let emitter = test_emitter();
        let mut original = AsteroidActor::new(Vec2::new(250.0, 330.0), 0.75, emitter.clone(), true);
        original.set_screen_bounds(1280.0, 720.0);

        let data = original.save_state();
        let restored = AsteroidActor::from_data(&data, emitter);

        assert_eq!(restored.position(), original.position());
        assert_eq!(restored.angular_velocity, original.angular_velocity);
        assert_eq!(restored.velocity, original.velocity);
        assert_eq!(restored.drifting, original.drifting);
        assert_eq!(restored.screen_bounds, original.screen_bounds);
        assert_eq!(restored.destroyed(), original.destroyed());
        // Animation state resets on load
        assert_eq!(restored.animation_frame, 0);
    }

    #[test]
    fn test_stationary_save_state_has_unset_bounds() {
        let emitter = test_emitter();
        let asteroid = AsteroidActor::new(Vec2::new(10.0, 20.0), 0.1, emitter, false);

        let data = asteroid.save_state();

        assert!(!data.drifting);
        assert_eq!(data.screen_width, 0.0);
        assert_eq!(data.screen_height, 0.0);
        assert_eq!(data.velocity_x, 0.0);
    }
}
