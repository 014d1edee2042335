//! Styling data attached to node descriptors.
//!
//! Purely declarative: the compositing backend decides what, if anything,
//! to do with it. The demo uses it to mirror the original styling without
//! binding a layout engine.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    size: Option<Size>,
    padding: EdgeInsets,
    background: Option<Color>,
    corner_radius: f32,
    fill_max_width: bool,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn size_points(self, width: f32, height: f32) -> Self {
        self.size(Size::new(width, height))
    }

    pub fn padding(mut self, value: f32) -> Self {
        self.padding = EdgeInsets::uniform(value);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn rounded_corners(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_width = true;
        self
    }

    pub fn explicit_size(&self) -> Option<Size> {
        self.size
    }

    pub fn padding_values(&self) -> EdgeInsets {
        self.padding
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    pub fn corner_radius_value(&self) -> f32 {
        self.corner_radius
    }

    pub fn fills_max_width(&self) -> bool {
        self.fill_max_width
    }
}
