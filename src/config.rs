// Tunables for the particle field. Defaults reproduce the site's background;
// JavaScript can construct one and override any numeric field before attaching.

use crate::color::Color;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub population: u32,
    /// Pairs closer than this many pixels get a connecting line.
    pub connection_distance: f64,
    pub max_line_opacity: f64,
    pub line_width: f64,
    pub repulsion_radius: f64,
    /// Force applied to a particle sitting exactly on the pointer.
    pub repulsion_strength: f64,
    pub center_threshold: f64,
    pub center_force: f64,
    pub max_speed: f64,
    pub jitter: f64,
    pub bounce_damping: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub initial_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    #[wasm_bindgen(skip)]
    pub tint: Color,
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }

    pub fn set_tint(&mut self, rgba: u32) {
        self.tint = Color::from_u32(rgba);
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            population: 150,
            connection_distance: 150.0,
            max_line_opacity: 0.15,
            line_width: 1.0,
            repulsion_radius: 150.0,
            repulsion_strength: 3.0,
            center_threshold: 200.0,
            center_force: 0.02,
            max_speed: 2.0,
            jitter: 0.05,
            bounce_damping: 0.8,
            min_radius: 1.0,
            max_radius: 3.0,
            initial_speed: 1.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            tint: Color::PURPLE,
        }
    }
}
