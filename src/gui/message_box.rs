//! Modal message box
//!
//! A dismissable overlay used for save/load reports ("game saved", "no saved
//! game found", "save file is empty or corrupted"). Any accept key dismisses
//! it; whatever screen was underneath stays put.

use crate::text::{draw_text_centered, text_width};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const TEXT_SCALE: u32 = 2;
const PADDING: u32 = 40;

pub struct MessageBox {
    message: String,
}

impl MessageBox {
    pub fn new(message: impl Into<String>) -> Self {
        MessageBox {
            message: message.into(),
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 170));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let (screen_width, screen_height) = canvas.logical_size();
        let box_width = (text_width(&self.message, TEXT_SCALE) + PADDING * 2).max(360);
        let box_height = 120;
        let box_x = ((screen_width - box_width) / 2) as i32;
        let box_y = ((screen_height - box_height) / 2) as i32;

        canvas.set_draw_color(Color::RGB(16, 12, 36));
        canvas.fill_rect(Rect::new(box_x, box_y, box_width, box_height))?;
        canvas.set_draw_color(Color::RGB(110, 90, 170));
        canvas.draw_rect(Rect::new(box_x, box_y, box_width, box_height))?;

        let center_x = box_x + box_width as i32 / 2;
        draw_text_centered(
            canvas,
            &self.message,
            center_x,
            box_y + 35,
            Color::RGB(255, 255, 255),
            TEXT_SCALE,
        )?;
        draw_text_centered(
            canvas,
            "PRESS ENTER",
            center_x,
            box_y + 80,
            Color::RGB(140, 140, 160),
            1,
        )?;

        Ok(())
    }
}
