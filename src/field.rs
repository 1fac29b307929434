// The particle population together with everything a step reads:
// surface extents, the latest pointer position, the config, and the rng.
// Population size is fixed at creation; particles are never added or removed.

use crate::config::FieldConfig;
use crate::forces::{CenterWell, PointerRepulsor};
use crate::particle::Particle;
use rand::Rng;
use vecmath::{vec2_len, vec2_sub, Vector2};

/// A line between two particles closer than the connection distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub opacity: f64,
}

/// Line opacity for a pair `distance` apart: `max_opacity` when touching,
/// fading linearly to zero at `threshold` and staying zero beyond it.
pub fn connection_opacity(distance: f64, threshold: f64, max_opacity: f64) -> f64 {
    if distance >= threshold {
        0.0
    } else {
        max_opacity * (1.0 - distance / threshold)
    }
}

pub struct ParticleField<R: Rng> {
    particles: Vec<Particle>,
    extents: Vector2<f64>,
    pointer: Option<Vector2<f64>>,
    config: FieldConfig,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(width: f64, height: f64, config: FieldConfig, mut rng: R) -> Self {
        let extents = [width, height];
        let particles = (0..config.population)
            .map(|_| Particle::spawn(extents, &config, &mut rng))
            .collect();
        ParticleField {
            particles,
            extents,
            pointer: None,
            config,
            rng,
        }
    }

    // Existing positions are left alone; the next step clamps any strays.
    pub fn resize(&mut self, width: f64, height: f64) {
        log::trace!("particle field resized to {}x{}", width, height);
        self.extents = [width, height];
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    pub fn step(&mut self) {
        let well = CenterWell::new(self.center(), &self.config);
        let repulsor = self
            .pointer
            .map(|pos| PointerRepulsor::new(pos, &self.config));
        for particle in &mut self.particles {
            particle.update(
                self.extents,
                &well,
                repulsor.as_ref(),
                &self.config,
                &mut self.rng,
            );
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn extents(&self) -> Vector2<f64> {
        self.extents
    }

    pub fn center(&self) -> Vector2<f64> {
        [self.extents[0] / 2.0, self.extents[1] / 2.0]
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    // All-pairs pass, O(n^2). Fine for a few hundred particles.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let max_opacity = self.config.max_line_opacity;
        let particles = &self.particles;
        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..].iter().filter_map(move |b| {
                let distance = vec2_len(vec2_sub(a.pos, b.pos));
                if distance < threshold {
                    Some(Connection {
                        from: a.pos,
                        to: b.pos,
                        opacity: connection_opacity(distance, threshold, max_opacity),
                    })
                } else {
                    None
                }
            })
        })
    }
}
