#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// Anything the viewer draws as a unit: an imagery source or the vector overlay.
pub trait Layer {
    fn id(&self) -> LayerId;

    fn kind(&self) -> &'static str;
}
