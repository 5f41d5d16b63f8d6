//! The player's ship
//!
//! Continuous physics, no discrete states: held turn keys accumulate angular
//! velocity, thrust accelerates along the facing direction, and the viewport
//! wraps toroidally. The ship's physical state is deliberately not part of a
//! save. A restored game respawns the ship at the default spawn with only
//! its tint carried over.

use crate::collision::BoundingCircle;
use crate::render::{FrameRect, SpriteParams};
use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const FRAME_WIDTH: u32 = 20;
pub const FRAME_HEIGHT: u32 = 32;
const NUM_FRAMES: u32 = 7;
const TIME_PER_FRAME: f32 = 0.1;
const LINEAR_ACCELERATION: f32 = 150.0;
const ANGULAR_ACCELERATION: f32 = 4.0;
const SPRITE_SCALE: f32 = 2.0;

/// Held-state input for one tick, polled by the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
}

/// Cosmetic ship tint. The only piece of ship state that survives a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipTint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ShipTint {
    pub const WHITE: ShipTint = ShipTint::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ShipTint { r, g, b }
    }

    /// Palette offered by the customize screen.
    pub fn palette() -> [(&'static str, ShipTint); 5] {
        [
            ("WHITE", ShipTint::WHITE),
            ("CRIMSON", ShipTint::new(220, 40, 60)),
            ("EMERALD", ShipTint::new(40, 200, 120)),
            ("AZURE", ShipTint::new(70, 140, 255)),
            ("GOLD", ShipTint::new(255, 200, 40)),
        ]
    }
}

impl Default for ShipTint {
    fn default() -> Self {
        ShipTint::WHITE
    }
}

pub struct ShipActor {
    position: Vec2,
    velocity: Vec2,
    direction: Vec2,
    angle: f32,
    angular_velocity: f32,
    bounds: BoundingCircle,
    tint: ShipTint,
    viewport: Vec2,
    animation_frame: u32,
    animation_timer: f32,
}

impl ShipActor {
    /// Spawns the ship at the viewport center, facing up.
    pub fn new(viewport_width: f32, viewport_height: f32, tint: ShipTint) -> Self {
        let position = Vec2::new(viewport_width / 2.0, viewport_height / 2.0);
        ShipActor {
            position,
            velocity: Vec2::ZERO,
            direction: Vec2::new(0.0, -1.0),
            angle: 0.0,
            angular_velocity: 0.0,
            bounds: Self::bounds_at(position),
            tint,
            viewport: Vec2::new(viewport_width, viewport_height),
            animation_frame: 0,
            animation_timer: 0.0,
        }
    }

    fn bounds_at(position: Vec2) -> BoundingCircle {
        BoundingCircle::new(
            position + Vec2::new(FRAME_WIDTH as f32 / 2.0, FRAME_HEIGHT as f32 / 2.0),
            FRAME_HEIGHT as f32 / 2.0,
        )
    }

    /// Advances physics and animation by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &ShipInput) {
        let mut acceleration = Vec2::ZERO;

        if input.turn_left {
            self.angular_velocity -= ANGULAR_ACCELERATION * dt;
        }
        if input.turn_right {
            self.angular_velocity += ANGULAR_ACCELERATION * dt;
        }

        // Angle 0 points up; facing derives from the angle every tick
        self.angle += self.angular_velocity * dt;
        self.direction = Vec2::new(self.angle.sin(), -self.angle.cos());

        self.bounds = Self::bounds_at(self.position);

        if input.thrust {
            acceleration += self.direction * LINEAR_ACCELERATION;
        }

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;

        // Toroidal wrap, each axis independently
        if self.position.y < 0.0 {
            self.position.y = self.viewport.y;
        }
        if self.position.y > self.viewport.y {
            self.position.y = 0.0;
        }
        if self.position.x < 0.0 {
            self.position.x = self.viewport.x;
        }
        if self.position.x > self.viewport.x {
            self.position.x = 0.0;
        }

        self.animation_timer += dt;
        if self.animation_timer > TIME_PER_FRAME {
            self.animation_frame += 1;
            if self.animation_frame >= NUM_FRAMES {
                self.animation_frame = 0;
            }
            self.animation_timer -= TIME_PER_FRAME;
        }
    }

    /// Draw parameters for the current state. The sheet is a vertical strip
    /// of `NUM_FRAMES` frames.
    pub fn sprite_params(&self) -> SpriteParams {
        SpriteParams {
            position: self.position,
            source: FrameRect::new(
                0,
                (self.animation_frame * FRAME_HEIGHT) as i32,
                FRAME_WIDTH,
                FRAME_HEIGHT,
            ),
            rotation: self.angle,
            tint: (self.tint.r, self.tint.g, self.tint.b),
            origin: Vec2::new(FRAME_WIDTH as f32 / 2.0, FRAME_HEIGHT as f32 / 2.0),
            scale: SPRITE_SCALE,
        }
    }

    pub fn bounds(&self) -> BoundingCircle {
        self.bounds
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn tint(&self) -> ShipTint {
        self.tint
    }

    #[cfg(test)]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.bounds = Self::bounds_at(position);
    }
}
