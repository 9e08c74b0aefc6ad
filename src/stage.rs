//! Stage - the document surface the controller consumes.
//!
//! The controller never owns elements. It reads them through this trait:
//! live bounding boxes, hit testing at a point, parent links for the
//! ancestor walk, and the registered-target marker. The host implements
//! `Stage` over whatever its document actually is.

use crate::types::{ElementId, Rect, Size, Vec2};

/// Presence check for the overlay structure the effect needs: a wrapper,
/// a center dot, and exactly four corner markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySpec {
    pub has_dot: bool,
    pub corner_count: usize,
}

impl OverlaySpec {
    /// Whether the structure is complete enough to attach.
    pub fn is_complete(&self) -> bool {
        self.has_dot && self.corner_count == 4
    }
}

/// The document surface consumed by the controller.
///
/// Bounds are in viewport coordinates and are expected to change under the
/// controller's feet (scroll, resize, layout shifts) - they are re-read
/// every frame while a target is engaged. `bounds_of` returning `None`
/// means the element has left the document.
pub trait Stage {
    /// Current viewport dimensions.
    fn viewport(&self) -> Size;

    /// Live bounding box of an element, or `None` if it is gone.
    fn bounds_of(&self, element: ElementId) -> Option<Rect>;

    /// Topmost element at a viewport point, if any.
    fn element_at(&self, point: Vec2) -> Option<ElementId>;

    /// Parent of an element; `None` at the document root.
    fn parent_of(&self, element: ElementId) -> Option<ElementId>;

    /// Whether an element carries the interactive-target marker.
    fn is_target(&self, element: ElementId) -> bool;

    /// The cursor overlay structure, or `None` if it is absent.
    fn overlay(&self) -> Option<OverlaySpec>;

    /// Show or hide the native pointer cursor.
    fn set_native_cursor_hidden(&mut self, hidden: bool);
}

/// Nearest ancestor-or-self of `element` that is a registered target.
///
/// Walks parent links up to the document root and stops there; an element
/// outside any registered target resolves to `None`.
pub fn resolve_target<S: Stage + ?Sized>(stage: &S, element: ElementId) -> Option<ElementId> {
    let mut current = Some(element);
    while let Some(id) = current {
        if stage.is_target(id) {
            return Some(id);
        }
        current = stage.parent_of(id);
    }
    None
}
