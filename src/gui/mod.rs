//! Screen-space GUI components
//!
//! Overlay widgets rendered with SDL2 primitives and the procedural bitmap
//! font: the reusable list [`Menu`] and the modal [`MessageBox`]. Screens own
//! their widgets and interpret selections with explicit dispatch.

pub mod menu;
pub mod message_box;

pub use menu::Menu;
pub use message_box::MessageBox;
