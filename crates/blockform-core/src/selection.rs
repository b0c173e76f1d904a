//! Resize handles and the pointer interaction state.

use crate::geometry::WidgetRect;
use crate::registry::WidgetId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default half-extent of a handle's hit zone, in device units.
pub const HANDLE_SIZE: f64 = 8.0;

/// One of the eight resize handles on a selected widget's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    /// Hit-test order. Where zones overlap on small widgets the first match
    /// wins.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// The corner or edge midpoint this handle sits on.
    pub fn anchor(self, rect: &WidgetRect) -> Point {
        let left = rect.x as f64;
        let top = rect.y as f64;
        let right = rect.right() as f64;
        let bottom = rect.bottom() as f64;
        let mid_x = left + rect.width as f64 / 2.0;
        let mid_y = top + rect.height as f64 / 2.0;
        match self {
            ResizeHandle::TopLeft => Point::new(left, top),
            ResizeHandle::Top => Point::new(mid_x, top),
            ResizeHandle::TopRight => Point::new(right, top),
            ResizeHandle::Right => Point::new(right, mid_y),
            ResizeHandle::BottomRight => Point::new(right, bottom),
            ResizeHandle::Bottom => Point::new(mid_x, bottom),
            ResizeHandle::BottomLeft => Point::new(left, bottom),
            ResizeHandle::Left => Point::new(left, mid_y),
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::BottomLeft | ResizeHandle::Left
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::BottomRight | ResizeHandle::Right
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopRight | ResizeHandle::Top
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::BottomRight | ResizeHandle::Bottom
        )
    }

    pub fn cursor(self) -> CursorHint {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => CursorHint::ResizeDiagonal,
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => CursorHint::ResizeAntiDiagonal,
            ResizeHandle::Top | ResizeHandle::Bottom => CursorHint::ResizeVertical,
            ResizeHandle::Left | ResizeHandle::Right => CursorHint::ResizeHorizontal,
        }
    }
}

/// Pointer cursor the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorHint {
    #[default]
    Default,
    /// Top-left to bottom-right.
    ResizeDiagonal,
    /// Top-right to bottom-left.
    ResizeAntiDiagonal,
    ResizeVertical,
    ResizeHorizontal,
}

/// Find the handle under `point`.
///
/// Each zone is a square of side `2 * handle_size` centred on the handle's
/// anchor: both axis distances must be within `handle_size`.
pub fn hit_test_handle(rect: &WidgetRect, point: Point, handle_size: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL.into_iter().find(|handle| {
        let anchor = handle.anchor(rect);
        (point.x - anchor.x).abs() <= handle_size && (point.y - anchor.y).abs() <= handle_size
    })
}

/// Squares to paint for the eight handles, `handle_size` on a side.
pub fn handle_rects(rect: &WidgetRect, handle_size: f64) -> [(ResizeHandle, Rect); 8] {
    let half = handle_size / 2.0;
    ResizeHandle::ALL.map(|handle| {
        let c = handle.anchor(rect);
        (handle, Rect::new(c.x - half, c.y - half, c.x + half, c.y + half))
    })
}

/// Rectangle produced by dragging `handle` by `(dx, dy)` from where the
/// gesture started.
///
/// Each moving edge is proposed from `start`. A proposal that would leave
/// that axis shorter than `min_size` is dropped and the edge stays where it
/// is in `current`. Left and top edges stop at 0.
pub fn resize_rect(
    start: &WidgetRect,
    current: &WidgetRect,
    handle: ResizeHandle,
    dx: i32,
    dy: i32,
    min_size: i32,
) -> WidgetRect {
    let mut left = start.x;
    let mut top = start.y;
    let mut right = start.right();
    let mut bottom = start.bottom();

    if handle.moves_left() {
        let proposed = start.x.saturating_add(dx).max(0);
        left = if right.saturating_sub(proposed) >= min_size { proposed } else { current.x };
    }
    if handle.moves_right() {
        let proposed = start.right().saturating_add(dx);
        right = if proposed.saturating_sub(left) >= min_size { proposed } else { current.right() };
    }
    if handle.moves_top() {
        let proposed = start.y.saturating_add(dy).max(0);
        top = if bottom.saturating_sub(proposed) >= min_size { proposed } else { current.y };
    }
    if handle.moves_bottom() {
        let proposed = start.bottom().saturating_add(dy);
        bottom = if proposed.saturating_sub(top) >= min_size { proposed } else { current.bottom() };
    }

    WidgetRect::from_edges(left, top, right, bottom)
}

/// What the pointer is currently doing on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pressed on a widget body; not yet moved past the drag threshold.
    ArmedForDrag {
        widget: WidgetId,
        /// Press position relative to the widget origin.
        grab_offset: Vec2,
        press: Point,
    },
    Dragging {
        widget: WidgetId,
        grab_offset: Vec2,
    },
    Resizing {
        widget: WidgetId,
        handle: ResizeHandle,
        start_rect: WidgetRect,
        start_point: Point,
    },
}

impl InteractionState {
    /// Widget the current gesture acts on.
    pub fn widget(&self) -> Option<WidgetId> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::ArmedForDrag { widget, .. }
            | InteractionState::Dragging { widget, .. }
            | InteractionState::Resizing { widget, .. } => Some(widget),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}
