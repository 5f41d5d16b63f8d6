//! Canvas-facing drawing helpers
//!
//! The simulation never draws. Actors expose [`SpriteParams`], a pure
//! projection of their state, and this module turns those into SDL2 calls.
//! The shake offset is applied here so the whole scene jitters together.

use crate::particles::Particle;
use glam::Vec2;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// A frame within a sprite atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        FrameRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Everything needed to draw one actor frame.
///
/// `position` is where `origin` (in unscaled source pixels) lands on screen;
/// rotation is radians around that origin.
#[derive(Debug, Clone, Copy)]
pub struct SpriteParams {
    pub position: Vec2,
    pub source: FrameRect,
    pub rotation: f32,
    pub tint: (u8, u8, u8),
    pub origin: Vec2,
    pub scale: f32,
}

/// Draws one sprite frame with the given camera offset.
pub fn draw_sprite(
    canvas: &mut Canvas<Window>,
    texture: &Texture,
    params: &SpriteParams,
    camera_offset: Vec2,
) -> Result<(), String> {
    let src = Rect::new(
        params.source.x,
        params.source.y,
        params.source.width,
        params.source.height,
    );

    let scaled_w = (params.source.width as f32 * params.scale) as u32;
    let scaled_h = (params.source.height as f32 * params.scale) as u32;
    let origin_x = params.origin.x * params.scale;
    let origin_y = params.origin.y * params.scale;

    let dst = Rect::new(
        (params.position.x + camera_offset.x - origin_x) as i32,
        (params.position.y + camera_offset.y - origin_y) as i32,
        scaled_w,
        scaled_h,
    );

    canvas
        .copy_ex(
            texture,
            Some(src),
            Some(dst),
            params.rotation.to_degrees() as f64,
            Some(Point::new(origin_x as i32, origin_y as i32)),
            false,
            false,
        )
        .map_err(|e| e.to_string())
}

/// Draws the particle field as additive-looking colored squares.
pub fn draw_particles(
    canvas: &mut Canvas<Window>,
    particles: &[Particle],
    camera_offset: Vec2,
) -> Result<(), String> {
    canvas.set_blend_mode(sdl2::render::BlendMode::Add);

    for p in particles {
        let size = (12.0 * p.scale()).max(1.0) as u32;
        let alpha = (255.0 * p.life_left()) as u8;
        let (r, g, b) = p.color;

        canvas.set_draw_color(Color::RGBA(r, g, b, alpha));
        canvas.fill_rect(Rect::new(
            (p.position.x + camera_offset.x) as i32 - size as i32 / 2,
            (p.position.y + camera_offset.y) as i32 - size as i32 / 2,
            size,
            size,
        ))?;
    }

    canvas.set_blend_mode(sdl2::render::BlendMode::None);
    Ok(())
}

/// Fills the background; the nebula texture stretches a little past the
/// edges so shake never exposes the clear color.
pub fn draw_background(
    canvas: &mut Canvas<Window>,
    texture: &Texture,
    screen_width: u32,
    screen_height: u32,
    camera_offset: Vec2,
) -> Result<(), String> {
    let dst = Rect::new(
        camera_offset.x as i32 - 10,
        camera_offset.y as i32 - 10,
        screen_width + 20,
        screen_height + 20,
    );
    canvas.copy(texture, None, Some(dst))
}
