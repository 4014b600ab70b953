//! Terminal rendering.

mod chat;
mod render;
mod text;
mod theme;

pub use render::render;
