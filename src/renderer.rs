// Renderer that draws a particle field onto anything implementing Surface:
// clear, one filled circle per particle, then a faded line for each close pair.
// The browser surface lives in web.rs; tests record calls instead of drawing.

use crate::color::Color;
use crate::field::ParticleField;
use rand::Rng;
use vecmath::Vector2;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color);
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        opacity: f64,
    );

    // Called when the viewport changes; canvases need their backing store resized.
    fn resize(&mut self, _width: f64, _height: f64) {}
}

pub struct Renderer<S: Surface> {
    surface: S,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Renderer { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn render<R: Rng>(&mut self, field: &ParticleField<R>) {
        let [width, height] = field.extents();
        self.surface.clear(width, height);

        for p in field.particles() {
            self.surface.fill_circle(p.pos, p.radius, p.color);
        }

        let config = field.config();
        for line in field.connections() {
            self.surface.stroke_line(
                line.from,
                line.to,
                config.line_width,
                config.tint,
                line.opacity,
            );
        }
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{DrawCall, RecordingSurface};
    use super::*;
    use crate::config::FieldConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn frame_clears_then_draws_particles_then_lines() {
        let field = ParticleField::new(
            800.0,
            600.0,
            FieldConfig::default(),
            StdRng::seed_from_u64(8),
        );
        let surface = RecordingSurface::default();
        let mut renderer = Renderer::new(surface.clone());
        renderer.render(&field);

        let calls = surface.calls.borrow();
        assert_eq!(calls[0], DrawCall::Clear(800.0, 600.0));
        let circles = calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle(..)))
            .count();
        assert_eq!(circles, 150);
        assert!(calls[1..=150]
            .iter()
            .all(|c| matches!(c, DrawCall::Circle(..))));

        let lines: Vec<&DrawCall> = calls[151..].iter().collect();
        let expected: Vec<_> = field.connections().collect();
        assert_eq!(lines.len(), expected.len());
        for (line, connection) in lines.into_iter().zip(expected) {
            match line {
                DrawCall::Line(from, to, width, color, opacity) => {
                    assert_eq!(*from, connection.from);
                    assert_eq!(*to, connection.to);
                    assert_eq!(*width, 1.0);
                    assert_eq!(*color, Color::PURPLE);
                    // passed through unrounded
                    assert_eq!(*opacity, connection.opacity);
                    assert!(*opacity > 0.0 && *opacity <= 0.15);
                }
                other => panic!("unexpected draw call {:?}", other),
            }
        }
    }
}
