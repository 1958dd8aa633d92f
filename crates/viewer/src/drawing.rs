//! Click-to-draw polygon capture.
//!
//! A [`DrawingSession`] is either idle or capturing. While capturing it owns
//! two resources on the host: a preview entity whose geometry is read live
//! from the session's point list, and an input listener for left and right
//! clicks. Both are acquired together and released together on every path
//! back to idle.

use std::cell::RefCell;
use std::rc::Rc;

use foundation::math::Vec3;
use runtime::{ListenerId, PointerEvent, PointerEventKind};
use scene::components::{
    Color, HierarchyProvider, HierarchySource, PolygonGraphics, PolygonHierarchy,
};
use scene::entity::{Entity, EntityId};
use tracing::{debug, trace};

use crate::host::DrawingHost;

/// Fewest picks a committed polygon may have.
pub const MIN_POLYGON_POINTS: usize = 3;
/// Below this the preview resolves to an empty hierarchy.
pub const MIN_PREVIEW_POINTS: usize = 2;

const CAPTURE_EVENTS: [PointerEventKind; 2] =
    [PointerEventKind::LeftClick, PointerEventKind::RightClick];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawingState {
    Idle,
    Capturing,
}

/// Result of feeding one pointer event to a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawingOutcome {
    /// Not capturing, an off-globe pick, or an event kind drawing ignores.
    Ignored,
    /// A pick was appended; carries the new point count.
    PointAdded(usize),
    /// A polygon was committed.
    Completed(EntityId),
    /// Capture ended without committing anything.
    Cancelled,
}

/// Point list shared between the session and its preview geometry.
#[derive(Debug, Clone, Default)]
pub struct SharedPoints(Rc<RefCell<Vec<Vec3>>>);

impl SharedPoints {
    pub fn push(&self, p: Vec3) {
        self.0.borrow_mut().push(p);
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Vec3> {
        self.0.borrow().clone()
    }
}

/// Preview geometry: reads the shared points each time it is resolved.
#[derive(Debug)]
struct PreviewHierarchy {
    points: SharedPoints,
}

impl HierarchyProvider for PreviewHierarchy {
    fn hierarchy(&self) -> PolygonHierarchy {
        if self.points.len() >= MIN_PREVIEW_POINTS {
            PolygonHierarchy::new(self.points.snapshot())
        } else {
            PolygonHierarchy::empty()
        }
    }
}

/// Fill and outline colors for in-progress and committed polygons.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawingStyle {
    pub preview_fill: Color,
    pub preview_outline: Color,
    pub complete_fill: Color,
    pub complete_outline: Color,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            preview_fill: Color::YELLOW.with_alpha(0.5),
            preview_outline: Color::WHITE,
            complete_fill: Color::BLUE.with_alpha(0.5),
            complete_outline: Color::WHITE,
        }
    }
}

/// Host resources held while capturing. One value, so neither can exist
/// without the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Capture {
    preview: EntityId,
    listener: ListenerId,
}

#[derive(Debug, Default)]
pub struct DrawingSession {
    points: SharedPoints,
    capture: Option<Capture>,
    style: DrawingStyle,
    completed: Vec<EntityId>,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: DrawingStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn state(&self) -> DrawingState {
        if self.capture.is_some() {
            DrawingState::Capturing
        } else {
            DrawingState::Idle
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.capture.is_some()
    }

    pub fn points(&self) -> Vec<Vec3> {
        self.points.snapshot()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn preview_entity(&self) -> Option<EntityId> {
        self.capture.map(|c| c.preview)
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.capture.map(|c| c.listener)
    }

    /// Polygons this session committed, oldest first.
    pub fn completed(&self) -> &[EntityId] {
        &self.completed
    }

    pub fn style(&self) -> &DrawingStyle {
        &self.style
    }

    /// Idle -> Capturing.
    ///
    /// Returns `false` and changes nothing if already capturing, so a second
    /// call can never leave two listeners or two previews behind.
    pub fn enter_edit_mode<H: DrawingHost>(&mut self, host: &mut H) -> bool {
        if self.capture.is_some() {
            debug!("edit mode already active");
            return false;
        }

        self.points.clear();
        let preview_graphics = PolygonGraphics::new(HierarchySource::Live(Rc::new(
            PreviewHierarchy {
                points: self.points.clone(),
            },
        )))
        .with_material(self.style.preview_fill)
        .with_outline(self.style.preview_outline);
        let preview = host.add_entity(
            Entity::polygon(preview_graphics)
                .with_name("polygon-preview")
                .with_property("kind", "preview"),
        );
        let listener = host.register_input(&CAPTURE_EVENTS);
        self.capture = Some(Capture { preview, listener });

        debug!(%preview, listener = listener.0, "edit mode entered");
        true
    }

    /// Feeds a pointer event addressed to this session's listener.
    pub fn on_pointer_event<H: DrawingHost>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> DrawingOutcome {
        if self.capture.is_none() {
            return DrawingOutcome::Ignored;
        }

        match event.kind {
            PointerEventKind::LeftClick => self.add_pick(host, event),
            PointerEventKind::RightClick => {
                if self.points.len() >= MIN_POLYGON_POINTS {
                    self.complete(host)
                } else {
                    self.cancel_edit_mode(host);
                    DrawingOutcome::Cancelled
                }
            }
            PointerEventKind::MiddleClick => DrawingOutcome::Ignored,
        }
    }

    /// Capturing -> Idle without committing. A no-op when idle.
    pub fn cancel_edit_mode<H: DrawingHost>(&mut self, host: &mut H) {
        if let Some(capture) = self.capture {
            host.remove_entity(capture.preview);
        }
        self.points.clear();
        self.exit_edit_mode(host);
    }

    /// Enters edit mode when idle; cancels (never completes) when capturing.
    pub fn toggle_edit_mode<H: DrawingHost>(&mut self, host: &mut H) -> DrawingState {
        if self.capture.is_some() {
            self.cancel_edit_mode(host);
        } else {
            self.enter_edit_mode(host);
        }
        self.state()
    }

    fn add_pick<H: DrawingHost>(&mut self, host: &mut H, event: &PointerEvent) -> DrawingOutcome {
        let Some(position) = host.pick_ellipsoid(event.position) else {
            trace!(x = event.position.x, y = event.position.y, "pick missed the globe");
            return DrawingOutcome::Ignored;
        };
        self.points.push(position);
        DrawingOutcome::PointAdded(self.points.len())
    }

    fn complete<H: DrawingHost>(&mut self, host: &mut H) -> DrawingOutcome {
        let Some(capture) = self.capture else {
            return DrawingOutcome::Ignored;
        };

        let positions = self.points.snapshot();
        let vertex_count = positions.len();
        let graphics = PolygonGraphics::new(PolygonHierarchy::new(positions))
            .with_material(self.style.complete_fill)
            .with_outline(self.style.complete_outline);
        let committed = host.add_entity(
            Entity::polygon(graphics)
                .with_name(format!("polygon-{}", self.completed.len() + 1))
                .with_property("kind", "drawn")
                .with_property("vertices", vertex_count.to_string()),
        );
        self.completed.push(committed);

        host.remove_entity(capture.preview);
        self.points.clear();
        self.exit_edit_mode(host);

        debug!(%committed, vertex_count, "polygon completed");
        DrawingOutcome::Completed(committed)
    }

    fn exit_edit_mode<H: DrawingHost>(&mut self, host: &mut H) {
        if let Some(capture) = self.capture.take() {
            host.unregister_input(capture.listener);
            debug!("edit mode exited");
        }
    }
}
