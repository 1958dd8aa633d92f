#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub visible: bool,
    /// Blend factor applied to the whole layer.
    pub alpha: f32,
}

impl LayerStyle {
    pub const fn new(visible: bool, alpha: f32) -> Self {
        Self { visible, alpha }
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            visible: true,
            alpha: 1.0,
        }
    }
}
