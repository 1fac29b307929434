// Simple particle struct to keep track of individual position, velocity, size, and color

use crate::color::Color;
use crate::config::FieldConfig;
use crate::forces::{CenterWell, PointerRepulsor};
use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, radius: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
        }
    }

    pub fn spawn<R: Rng>(extents: Vector2<f64>, config: &FieldConfig, rng: &mut R) -> Particle {
        let pos_x = rng.gen::<f64>() * extents[0];
        let pos_y = rng.gen::<f64>() * extents[1];
        let vel_x = (rng.gen::<f64>() * 2.0 - 1.0) * config.initial_speed;
        let vel_y = (rng.gen::<f64>() * 2.0 - 1.0) * config.initial_speed;
        let radius = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        let opacity =
            rng.gen::<f64>() * (config.max_opacity - config.min_opacity) + config.min_opacity;
        Particle::new(
            [pos_x, pos_y],
            [vel_x, vel_y],
            radius,
            config.tint.with_opacity(opacity),
        )
    }

    pub fn speed(&self) -> f64 {
        vec2_len(self.vel)
    }

    // One simulation step. Jitter lands before the speed clamp so the particle
    // never leaves this function faster than max_speed.
    pub fn update<R: Rng>(
        &mut self,
        extents: Vector2<f64>,
        well: &CenterWell,
        pointer: Option<&PointerRepulsor>,
        config: &FieldConfig,
        rng: &mut R,
    ) {
        self.vel = vec2_add(self.vel, well.pull_on(self.pos));
        self.pos = vec2_add(self.pos, self.vel);
        if let Some(pointer) = pointer {
            self.vel = vec2_add(self.vel, pointer.push_on(self.pos));
        }
        if config.jitter > 0.0 {
            self.vel[0] += (rng.gen::<f64>() * 2.0 - 1.0) * config.jitter;
            self.vel[1] += (rng.gen::<f64>() * 2.0 - 1.0) * config.jitter;
        }
        self.clamp_speed(config.max_speed);
        for axis in 0..2 {
            self.bounce(axis, extents[axis], config.bounce_damping);
        }
    }

    pub fn clamp_speed(&mut self, max_speed: f64) {
        let speed = self.speed();
        if speed > max_speed {
            self.vel = vec2_scale(self.vel, max_speed / speed);
        }
    }

    pub fn bounce(&mut self, axis: usize, extent: f64, damping: f64) {
        if self.pos[axis] > extent {
            self.pos[axis] = extent;
            self.vel[axis] *= -damping;
        }
        if self.pos[axis] < 0.0 {
            self.pos[axis] = 0.0;
            self.vel[axis] *= -damping;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_config() -> FieldConfig {
        FieldConfig {
            jitter: 0.0,
            ..FieldConfig::default()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let p = Particle::spawn([800.0, 600.0], &config, &mut rng);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0);
            assert!(p.vel[0].abs() <= 1.0 && p.vel[1].abs() <= 1.0);
            assert!(p.radius >= 1.0 && p.radius < 3.0);
            assert!(p.color.a >= 51 && p.color.a <= 179);
            assert_eq!((p.color.r, p.color.g, p.color.b), (147, 51, 234));
        }
    }

    #[test]
    fn bounce_at_right_edge_flips_and_damps() {
        let config = still_config();
        let well = CenterWell::new([400.0, 300.0], &config);
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::new([800.0, 300.0], [1.0, 0.0], 2.0, Color::PURPLE);
        p.update([800.0, 600.0], &well, None, &config, &mut rng);
        // the well pulls 0.02 toward the center before the particle moves
        assert!(approx(p.pos[0], 800.0));
        assert!(approx(p.vel[0], -0.8 * 0.98));
    }

    #[test]
    fn bounce_sign_survives_jitter() {
        let config = FieldConfig::default();
        let well = CenterWell::new([400.0, 300.0], &config);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let mut p = Particle::new([800.0, 300.0], [1.0, 0.0], 2.0, Color::PURPLE);
            p.update([800.0, 600.0], &well, None, &config, &mut rng);
            assert!(p.vel[0] < 0.0);
        }
    }

    #[test]
    fn bounce_at_origin() {
        let mut p = Particle::new([-3.0, -0.5], [-1.5, -0.5], 1.0, Color::PURPLE);
        p.bounce(0, 800.0, 0.8);
        p.bounce(1, 600.0, 0.8);
        assert_eq!(p.pos, [0.0, 0.0]);
        assert!(approx(p.vel[0], 1.2));
        assert!(approx(p.vel[1], 0.4));
    }

    #[test]
    fn clamp_preserves_direction() {
        let mut p = Particle::new([0.0, 0.0], [3.0, 4.0], 1.0, Color::PURPLE);
        p.clamp_speed(2.0);
        assert!(approx(p.speed(), 2.0));
        assert!(approx(p.vel[0], 1.2));
        assert!(approx(p.vel[1], 1.6));

        let mut slow = Particle::new([0.0, 0.0], [0.3, 0.4], 1.0, Color::PURPLE);
        slow.clamp_speed(2.0);
        assert_eq!(slow.vel, [0.3, 0.4]);
    }

    #[test]
    fn pointer_on_particle_kicks_at_full_strength_then_clamps() {
        let config = still_config();
        let well = CenterWell::new([400.0, 300.0], &config);
        let pointer = PointerRepulsor::new([400.0, 300.0], &config);
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::new([400.0, 300.0], [0.0, 0.0], 1.0, Color::PURPLE);
        p.update([800.0, 600.0], &well, Some(&pointer), &config, &mut rng);
        // a kick of 3 along -x, clamped to max speed
        assert!(approx(p.vel[0], -2.0));
        assert!(approx(p.vel[1], 0.0));
    }

    #[test]
    fn speed_never_exceeds_max_after_jitter() {
        let config = FieldConfig::default();
        let well = CenterWell::new([400.0, 300.0], &config);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let mut p = Particle::new([10.0, 10.0], [2.0, 0.0], 1.0, Color::PURPLE);
            p.update([800.0, 600.0], &well, None, &config, &mut rng);
            assert!(p.speed() <= config.max_speed + 1e-12);
        }
    }
}
