//! Galactic trial formations
//!
//! Each trial starts from a fixed layout of asteroid positions. Generators
//! are pure functions of the screen size (same input, same ordered output),
//! so a trial is the same challenge on every run.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// The five trial layouts, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialLayout {
    Circle,
    Cross,
    Diamond,
    Spiral,
    Maze,
}

impl TrialLayout {
    pub fn all() -> [TrialLayout; 5] {
        [
            TrialLayout::Circle,
            TrialLayout::Cross,
            TrialLayout::Diamond,
            TrialLayout::Spiral,
            TrialLayout::Maze,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrialLayout::Circle => "CIRCLE",
            TrialLayout::Cross => "CROSS",
            TrialLayout::Diamond => "DIAMOND",
            TrialLayout::Spiral => "SPIRAL",
            TrialLayout::Maze => "MAZE",
        }
    }

    /// Generates the asteroid start positions for this layout.
    pub fn positions(&self, screen_width: f32, screen_height: f32) -> Vec<Vec2> {
        match self {
            TrialLayout::Circle => circle_formation(screen_width, screen_height),
            TrialLayout::Cross => cross_formation(screen_width, screen_height),
            TrialLayout::Diamond => diamond_formation(screen_width, screen_height),
            TrialLayout::Spiral => spiral_formation(screen_width, screen_height),
            TrialLayout::Maze => maze_formation(screen_width, screen_height),
        }
    }
}

fn formation_center(screen_width: f32, screen_height: f32) -> Vec2 {
    // Shifted by half a sprite so the ring visually centers on screen
    Vec2::new(screen_width / 2.0 - 40.0, screen_height / 2.0 - 40.0)
}

/// Ten asteroids on a ring of radius 250 around the screen center.
pub fn circle_formation(screen_width: f32, screen_height: f32) -> Vec<Vec2> {
    let center = formation_center(screen_width, screen_height);
    let radius = 250.0;

    (0..10)
        .map(|i| {
            let angle = i as f32 * TAU / 8.0;
            center + Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// A horizontal and a vertical line sharing their center point.
pub fn cross_formation(screen_width: f32, screen_height: f32) -> Vec<Vec2> {
    let center = formation_center(screen_width, screen_height);
    let mut positions = Vec::with_capacity(9);

    for i in 0..5 {
        positions.push(Vec2::new(center.x - 300.0 + i as f32 * 150.0, center.y));
    }
    for i in 0..5 {
        if i == 2 {
            continue; // center already placed by the horizontal line
        }
        positions.push(Vec2::new(center.x, center.y - 300.0 + i as f32 * 150.0));
    }

    positions
}

/// An outer diamond of four points, an inner rotated square, and two flanks.
pub fn diamond_formation(screen_width: f32, screen_height: f32) -> Vec<Vec2> {
    let center = formation_center(screen_width, screen_height);
    let spacing = 160.0;

    vec![
        center + Vec2::new(0.0, -spacing * 2.0),
        center + Vec2::new(spacing * 2.0, 0.0),
        center + Vec2::new(0.0, spacing * 2.0),
        center + Vec2::new(-spacing * 2.0, 0.0),
        center + Vec2::new(spacing, -spacing),
        center + Vec2::new(spacing, spacing),
        center + Vec2::new(-spacing, spacing),
        center + Vec2::new(-spacing, -spacing),
        center + Vec2::new(spacing * 1.5, 0.0),
        center + Vec2::new(-spacing * 1.5, 0.0),
    ]
}

/// Ten asteroids spiralling outward, radius growing 25 per step.
pub fn spiral_formation(screen_width: f32, screen_height: f32) -> Vec<Vec2> {
    let center = formation_center(screen_width, screen_height);
    let angle_step = PI / 4.0;

    let mut positions = Vec::with_capacity(10);
    let mut radius = 120.0;
    let mut angle = 0.0f32;

    for _ in 0..10 {
        positions.push(center + Vec2::new(radius * angle.cos(), radius * angle.sin()));
        angle += angle_step;
        radius += 25.0;
    }

    positions
}

/// Corner anchors plus inner gates the ship has to weave through.
pub fn maze_formation(screen_width: f32, screen_height: f32) -> Vec<Vec2> {
    let center = formation_center(screen_width, screen_height);

    vec![
        center + Vec2::new(-225.0, -225.0),
        center + Vec2::new(225.0, -225.0),
        center + Vec2::new(-225.0, 225.0),
        center + Vec2::new(225.0, 225.0),
        center + Vec2::new(0.0, -125.0),
        center + Vec2::new(0.0, 125.0),
        center + Vec2::new(-125.0, 0.0),
        center + Vec2::new(125.0, 0.0),
        center + Vec2::new(-175.0, -175.0),
        center + Vec2::new(175.0, 175.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formations_are_deterministic() {
        for layout in TrialLayout::all() {
            let a = layout.positions(1280.0, 720.0);
            let b = layout.positions(1280.0, 720.0);
            assert_eq!(a, b, "{:?} must be pure", layout);
        }
    }

    #[test]
    fn test_formation_sizes() {
        assert_eq!(circle_formation(1280.0, 720.0).len(), 10);
        assert_eq!(cross_formation(1280.0, 720.0).len(), 9);
        assert_eq!(diamond_formation(1280.0, 720.0).len(), 10);
        assert_eq!(spiral_formation(1280.0, 720.0).len(), 10);
        assert_eq!(maze_formation(1280.0, 720.0).len(), 10);
    }

    #[test]
    fn test_formations_center_on_screen() {
        // The average of each layout sits near the (shifted) screen center
        let center = formation_center(1280.0, 720.0);
        for layout in TrialLayout::all() {
            let positions = layout.positions(1280.0, 720.0);
            let sum: Vec2 = positions.iter().copied().sum();
            let mean = sum / positions.len() as f32;
            assert!(
                (mean - center).length() < 200.0,
                "{:?} drifted: {:?}",
                layout,
                mean
            );
        }
    }

    #[test]
    fn test_formations_scale_with_screen() {
        let small = circle_formation(800.0, 600.0);
        let large = circle_formation(1920.0, 1080.0);
        assert_ne!(small[0], large[0]);
    }
}
