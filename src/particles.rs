//! Asteroid destruction particle bursts
//!
//! One emitter is shared (by handle) across every asteroid in a session.
//! Asteroids only ever call `emit`; the simulation and rendering data live
//! here so the shell can draw the burst without owning any of it.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_4, TAU};

const MIN_BURST: usize = 50;
const MAX_BURST: usize = 100;

/// A single short-lived spark.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    pub color: (u8, u8, u8),
    pub rotation: f32,
    angular_velocity: f32,
    lifetime: f32,
    age: f32,
}

impl Particle {
    /// Scale grows with age, from 0.1 up to 0.35 at end of life.
    pub fn scale(&self) -> f32 {
        let normalized = (self.age / self.lifetime).clamp(0.0, 1.0);
        0.1 + 0.25 * normalized
    }

    /// Remaining life in [0, 1], for fade-out.
    pub fn life_left(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }

    fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Spawns and advances destruction bursts.
///
/// Owned by the gameplay session; asteroids keep a shared non-owning handle
/// and call [`ParticleEmitter::emit`] once when they break apart.
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleEmitter {
    pub fn new(max_particles: usize) -> Self {
        ParticleEmitter {
            particles: Vec::with_capacity(max_particles),
            max_particles,
        }
    }

    /// Emits a burst of sparks centered on `position`.
    ///
    /// Each spark flies outward in a random direction and decelerates to rest
    /// over its lifetime. Bursts past the particle cap are truncated.
    pub fn emit(&mut self, position: Vec2) {
        let mut rng = rand::thread_rng();
        let count = rng.gen_range(MIN_BURST..=MAX_BURST);

        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }

            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(50.0..200.0);
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            let lifetime = rng.gen_range(0.5..1.0);

            // Yellow -> orange ramp
            let t = rng.gen_range(0.0..1.0f32);
            let color = (255, 255 - (90.0 * t) as u8, 0);

            self.particles.push(Particle {
                position,
                velocity,
                acceleration: -velocity / lifetime,
                color,
                rotation: rng.gen_range(0.0..TAU),
                angular_velocity: rng.gen_range(-FRAC_PI_4..FRAC_PI_4),
                lifetime,
                age: 0.0,
            });
        }
    }

    /// Advances every live spark and drops the expired ones.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.velocity += p.acceleration * dt;
            p.position += p.velocity * dt;
            p.rotation += p.angular_velocity * dt;
            p.age += dt;
        }
        self.particles.retain(|p| !p.expired());
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[allow(dead_code)] // Test hook; sessions drop the emitter wholesale
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
