use foundation::math::Vec2;

/// Pointer gestures the viewer surface reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    LeftClick,
    MiddleClick,
    RightClick,
}

impl PointerEventKind {
    /// Maps a DOM-style button index (0=left, 1=middle, 2=right).
    pub fn from_button(button: i32) -> Option<Self> {
        match button {
            0 => Some(Self::LeftClick),
            1 => Some(Self::MiddleClick),
            2 => Some(Self::RightClick),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Pixel position relative to the render surface's top-left corner.
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub fn left_click(x_px: f64, y_px: f64) -> Self {
        Self::new(PointerEventKind::LeftClick, Vec2::new(x_px, y_px))
    }

    pub fn right_click(x_px: f64, y_px: f64) -> Self {
        Self::new(PointerEventKind::RightClick, Vec2::new(x_px, y_px))
    }
}

/// Registration token returned by [`InputRouter::register`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone)]
struct Listener {
    id: ListenerId,
    kinds: Vec<PointerEventKind>,
}

/// Listener registry scoped to one render surface.
///
/// The router does not own callbacks; it decides which registrations an
/// event is addressed to and the owner of each registration handles it.
/// Ids are never reused, so a disposed registration cannot receive events
/// addressed to a newer one.
#[derive(Debug, Default)]
pub struct InputRouter {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kinds: &[PointerEventKind]) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let mut kinds = kinds.to_vec();
        kinds.dedup();
        self.listeners.push(Listener { id, kinds });
        id
    }

    /// Disposes a registration. Returns `false` if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Registrations interested in `event`, in registration order.
    pub fn route(&self, event: &PointerEvent) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|l| l.kinds.contains(&event.kind))
            .map(|l| l.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{InputRouter, PointerEvent, PointerEventKind};

    #[test]
    fn routes_only_to_interested_listeners() {
        let mut router = InputRouter::new();
        let clicks = router.register(&[PointerEventKind::LeftClick, PointerEventKind::RightClick]);
        let middle = router.register(&[PointerEventKind::MiddleClick]);

        assert_eq!(router.route(&PointerEvent::left_click(1.0, 2.0)), vec![clicks]);
        assert_eq!(router.route(&PointerEvent::right_click(1.0, 2.0)), vec![clicks]);
        let wheel = PointerEvent::new(PointerEventKind::MiddleClick, Default::default());
        assert_eq!(router.route(&wheel), vec![middle]);
    }

    #[test]
    fn unregister_stops_delivery() {
        let mut router = InputRouter::new();
        let id = router.register(&[PointerEventKind::LeftClick]);
        assert!(router.unregister(id));
        assert!(!router.unregister(id));
        assert!(!router.is_registered(id));
        assert!(router.route(&PointerEvent::left_click(0.0, 0.0)).is_empty());
        assert_eq!(router.listener_count(), 0);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut router = InputRouter::new();
        let a = router.register(&[PointerEventKind::LeftClick]);
        router.unregister(a);
        let b = router.register(&[PointerEventKind::LeftClick]);
        assert_ne!(a, b);
    }

    #[test]
    fn button_indices_map_to_kinds() {
        assert_eq!(PointerEventKind::from_button(0), Some(PointerEventKind::LeftClick));
        assert_eq!(PointerEventKind::from_button(2), Some(PointerEventKind::RightClick));
        assert_eq!(PointerEventKind::from_button(7), None);
    }
}
