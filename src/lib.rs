// Decorative particle background for a web page: a fixed population of
// translucent dots drifting around the viewport, linked by faint lines when
// close, pulled back toward the center and pushed away from the mouse.
//
// Everything except web.rs is plain Rust and runs natively in tests.

mod utils;

pub mod animator;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod forces;
pub mod particle;
pub mod renderer;
pub mod web;

pub use animator::{Animator, CancellationToken, FrameCallback, Session};
pub use color::Color;
pub use config::FieldConfig;
pub use error::AnimatorError;
pub use field::{connection_opacity, Connection, ParticleField};
pub use particle::Particle;
pub use renderer::{Renderer, Surface};
pub use web::{Canvas2dSurface, ParticleBackground};

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // A second call finds the logger already installed; that's fine
    let _ = console_log::init_with_level(log::Level::Info);
}
