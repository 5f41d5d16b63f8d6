//! Base menu component
//!
//! A reusable keyboard-driven list menu: wrapping up/down selection, a title,
//! a selection highlight. Used for the main menu, the trials menu and the
//! pause menu; each screen decides what the selected index means with an
//! explicit match.

use crate::text::{draw_text, draw_text_centered, text_width};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Appearance knobs shared by every menu.
#[derive(Debug, Clone)]
pub struct MenuStyle {
    pub width: u32,
    pub background_color: Color,
    pub border_color: Color,
    pub overlay_alpha: u8,
    pub title_color: Color,
    pub item_color: Color,
    pub selected_item_color: Color,
    pub highlight_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            width: 520,
            background_color: Color::RGB(16, 12, 36),
            border_color: Color::RGB(110, 90, 170),
            overlay_alpha: 180,
            title_color: Color::RGB(240, 220, 160),
            item_color: Color::RGB(150, 150, 170),
            selected_item_color: Color::RGB(255, 255, 255),
            highlight_color: Color::RGB(70, 50, 120),
        }
    }
}

/// A stateful list menu.
pub struct Menu {
    title: String,
    items: Vec<String>,
    selected_index: usize,
    style: MenuStyle,
}

const TITLE_SCALE: u32 = 3;
const ITEM_SCALE: u32 = 2;
const ITEM_HEIGHT: u32 = 40;

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Menu {
            title: title.into(),
            items,
            selected_index: 0,
            style: MenuStyle::default(),
        }
    }

    /// Move selection up (wraps to bottom).
    pub fn select_previous(&mut self) {
        if self.selected_index == 0 {
            self.selected_index = self.items.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down (wraps to top).
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % self.items.len();
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    fn height(&self) -> u32 {
        100 + self.items.len() as u32 * ITEM_HEIGHT + 20
    }

    /// Render the menu centered on screen, over a darkening overlay.
    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let (screen_width, screen_height) = canvas.logical_size();
        let height = self.height();
        let menu_x = ((screen_width - self.style.width) / 2) as i32;
        let menu_y = ((screen_height - height) / 2) as i32;

        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(Rect::new(menu_x, menu_y, self.style.width, height))?;

        // Double border
        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(Rect::new(menu_x, menu_y, self.style.width, height))?;
        canvas.draw_rect(Rect::new(
            menu_x + 2,
            menu_y + 2,
            self.style.width - 4,
            height - 4,
        ))?;

        let center_x = menu_x + self.style.width as i32 / 2;
        draw_text_centered(
            canvas,
            &self.title,
            center_x,
            menu_y + 30,
            self.style.title_color,
            TITLE_SCALE,
        )?;

        let items_y = menu_y + 100;
        for (i, item) in self.items.iter().enumerate() {
            let item_y = items_y + (i as u32 * ITEM_HEIGHT) as i32;
            let is_selected = i == self.selected_index;

            if is_selected {
                canvas.set_draw_color(self.style.highlight_color);
                canvas.fill_rect(Rect::new(
                    menu_x + 15,
                    item_y - 6,
                    self.style.width - 30,
                    ITEM_HEIGHT - 12,
                ))?;
            }

            let color = if is_selected {
                self.style.selected_item_color
            } else {
                self.style.item_color
            };
            draw_text_centered(canvas, item, center_x, item_y, color, ITEM_SCALE)?;

            if is_selected {
                let half = text_width(item, ITEM_SCALE) as i32 / 2;
                draw_text(canvas, ">", center_x - half - 30, item_y, color, ITEM_SCALE)?;
                draw_text(canvas, "<", center_x + half + 18, item_y, color, ITEM_SCALE)?;
            }
        }

        Ok(())
    }
}
