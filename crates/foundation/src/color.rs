/// Linear RGBA colour, components in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Rgba = Rgba([0.0, 0.0, 0.0, 1.0]);
    pub const RED: Rgba = Rgba([1.0, 0.0, 0.0, 1.0]);
    pub const YELLOW: Rgba = Rgba([1.0, 1.0, 0.0, 1.0]);
    pub const GREEN: Rgba = Rgba([0.0, 1.0, 0.0, 1.0]);

    pub fn with_alpha(self, a: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if !(s.len() == 6 || s.len() == 8) || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&s[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let a = if s.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self([channel(0)?, channel(2)?, channel(4)?, a]))
    }

    /// Lowercase `#rrggbb`; alpha is dropped.
    pub fn to_hex(&self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.0[0]), q(self.0[1]), q(self.0[2]))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn hex_parses_css_strings() {
        assert_eq!(Rgba::from_hex("#00FF00"), Some(Rgba::GREEN));
        assert_eq!(Rgba::from_hex("ff0000"), Some(Rgba::RED));
        assert_eq!(Rgba::from_hex("#000000ff"), Some(Rgba::BLACK));
        assert_eq!(Rgba::from_hex("#abc"), None);
        assert_eq!(Rgba::from_hex("#gg0000"), None);
    }

    #[test]
    fn hex_formats_without_alpha() {
        assert_eq!(Rgba::YELLOW.to_hex(), "#ffff00");
        assert_eq!(Rgba::BLACK.with_alpha(0.6).to_hex(), "#000000");
    }
}
