// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// Canvas styles take CSS strings, so colors render themselves as rgba().

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const PURPLE: Color = Color {
        r: 147,
        g: 51,
        b: 234,
        a: 0xff,
    };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Same hue, alpha taken from an opacity in 0..=1
    pub fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (opacity.max(0.0).min(1.0) * 255.0).round() as u8;
        Color { a: alpha, ..self }
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.opacity()
        )
    }

    // Ignores the stored alpha; faint connection lines need more than 8 bits
    pub fn to_css_with_opacity(&self, opacity: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, opacity)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::PURPLE
    }
}
