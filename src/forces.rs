// The two things that steer particles besides their own momentum:
// a well at the surface center that pulls in stragglers, and the pointer,
// which shoves nearby particles away.

use crate::config::FieldConfig;
use vecmath::{vec2_len, vec2_scale, vec2_sub, Vector2};

pub struct CenterWell {
    pub pos: Vector2<f64>,
    pub threshold: f64,
    pub strength: f64,
}

impl CenterWell {
    pub fn new(pos: Vector2<f64>, config: &FieldConfig) -> Self {
        CenterWell {
            pos,
            threshold: config.center_threshold,
            strength: config.center_force,
        }
    }

    // Constant-magnitude step toward the center, only outside the threshold
    pub fn pull_on(&self, pos: Vector2<f64>) -> Vector2<f64> {
        let to_center = vec2_sub(self.pos, pos);
        let distance = vec2_len(to_center);
        if distance > self.threshold {
            vec2_scale(to_center, self.strength / distance)
        } else {
            [0.0, 0.0]
        }
    }
}

pub struct PointerRepulsor {
    pub pos: Vector2<f64>,
    pub radius: f64,
    pub strength: f64,
}

impl PointerRepulsor {
    pub fn new(pos: Vector2<f64>, config: &FieldConfig) -> Self {
        PointerRepulsor {
            pos,
            radius: config.repulsion_radius,
            strength: config.repulsion_strength,
        }
    }

    // Linear falloff from full strength on the pointer to nothing at the radius.
    // A particle sitting exactly on the pointer has no direction, push it along -x.
    // Written as !(d < r) so a NaN distance pushes nothing.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn push_on(&self, pos: Vector2<f64>) -> Vector2<f64> {
        let away = vec2_sub(pos, self.pos);
        let distance = vec2_len(away);
        if !(distance < self.radius) {
            return [0.0, 0.0];
        }
        let force = (1.0 - distance / self.radius) * self.strength;
        if distance == 0.0 {
            [-force, 0.0]
        } else {
            vec2_scale(away, force / distance)
        }
    }
}
