use foundation::Rgba;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerticalOrigin {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_size_px: f32,
    pub color: [f32; 4],
    pub halo_color: [f32; 4],
    pub halo_width_px: f32,
    /// Opaque-enough plate drawn behind the text; `None` draws no plate.
    pub background: Option<Rgba>,
    pub pixel_offset: [f32; 2],
    pub vertical_origin: VerticalOrigin,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 14.0,
            color: [1.0, 1.0, 1.0, 1.0],
            halo_color: [0.0, 0.0, 0.0, 1.0],
            halo_width_px: 2.0,
            background: Some(Rgba::BLACK.with_alpha(0.6)),
            pixel_offset: [0.0, -15.0],
            vertical_origin: VerticalOrigin::Bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub text: String,
    pub style: LabelStyle,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LabelStyle::default(),
        }
    }

    pub fn has_background(&self) -> bool {
        self.style.background.is_some_and(|c| c.alpha() > 0.0)
    }

    /// Rough on-screen extent; the host does real shaping.
    pub fn estimated_size_px(&self) -> [f32; 2] {
        let count = self.text.chars().count().max(1) as f32;
        [self.style.font_size_px * 0.6 * count, self.style.font_size_px]
    }
}
