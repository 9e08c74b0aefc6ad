//! Core types for reticle.
//!
//! Plain geometry that flows through the whole crate: viewport points,
//! element bounding boxes, and the corner-offset math that shapes the
//! bracket around a framed target.

// =============================================================================
// Geometry
// =============================================================================

/// A point or offset in viewport coordinates (CSS-pixel space, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Linear interpolation toward `other` by fraction `t`.
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        Vec2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center point of the viewport.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An element's bounding box in viewport coordinates.
///
/// Mirrors what a bounding-client-rect query returns: position of the
/// top-left edge plus extent. Re-read every frame while a target is
/// engaged, so scroll and layout shifts are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Half the box width.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Half the box height.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Whether a viewport point falls inside the box.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

// =============================================================================
// Element Identity
// =============================================================================

/// Opaque handle to a document element owned by the host.
///
/// The controller never creates or destroys elements; it only queries them
/// through the [`Stage`](crate::stage::Stage) trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

// =============================================================================
// Corners
// =============================================================================

/// The four corner markers, in the fixed order they are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners in marker order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Marker index (0-3) of this corner.
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }
}

/// Corner-marker offsets framing a target box, relative to the box center.
///
/// Each marker sits just outside the box edge (`border_width` inset), and
/// right/bottom markers are pulled back by the marker's own size so the
/// bracket wraps around the box rather than sitting on top of it.
pub fn frame_corner_offsets(rect: Rect, border_width: f64, corner_size: f64) -> [Vec2; 4] {
    let hw = rect.half_width();
    let hh = rect.half_height();
    [
        Vec2::new(-hw - border_width, -hh - border_width),
        Vec2::new(hw + border_width - corner_size, -hh - border_width),
        Vec2::new(hw + border_width - corner_size, hh + border_width - corner_size),
        Vec2::new(-hw - border_width, hh + border_width - corner_size),
    ]
}

/// Corner-marker offsets for the idle cluster: a small square hugging the
/// overlay's own origin, shown whenever no target is engaged.
pub fn idle_corner_offsets(corner_size: f64) -> [Vec2; 4] {
    [
        Vec2::new(-corner_size * 1.5, -corner_size * 1.5),
        Vec2::new(corner_size * 0.5, -corner_size * 1.5),
        Vec2::new(corner_size * 0.5, corner_size * 0.5),
        Vec2::new(-corner_size * 1.5, corner_size * 0.5),
    ]
}
