//! Integer widget geometry and grid snapping.

use crate::error::CanvasError;
use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// Default grid spacing in device units.
pub const DEFAULT_GRID_SIZE: i32 = 10;

/// Smallest width or height a placed widget may settle at.
pub const MIN_WIDGET_SIZE: i32 = 10;

/// Axis-aligned widget rectangle in canvas device units.
///
/// Serialized as four named integer fields so project files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WidgetRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WidgetRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive). Saturates at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive). Saturates at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner as a kurbo point.
    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Same size, new top-left corner.
    pub fn with_position(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Move by an offset, keeping the size.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Build a rectangle from its four edges.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Force the stored invariants: size at least `min_size`, origin
    /// non-negative and far enough from `i32::MAX` for the far edges to fit.
    pub fn normalized(self, min_size: i32) -> Self {
        let width = self.width.max(min_size).max(0);
        let height = self.height.max(min_size).max(0);
        Self {
            x: self.x.clamp(0, i32::MAX - width),
            y: self.y.clamp(0, i32::MAX - height),
            width,
            height,
        }
    }

    pub fn to_kurbo(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.right() as f64,
            self.bottom() as f64,
        )
    }

    /// Whether a canvas point lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        self.to_kurbo().contains(point)
    }
}

/// Round a single coordinate to the nearest grid multiple.
///
/// Halves round away from zero.
pub fn snap_coord(value: f64, grid_size: i32) -> i32 {
    let g = grid_size as f64;
    ((value / g).round() * g) as i32
}

/// Snap a point to the nearest grid intersection.
pub fn snap_point(point: Point, grid_size: i32) -> Point {
    Point::new(
        snap_coord(point.x, grid_size) as f64,
        snap_coord(point.y, grid_size) as f64,
    )
}

/// Snap a rectangle to the grid.
///
/// The origin is snapped independently of the size. Width and height are
/// snapped too and never drop below one grid unit.
pub fn snap_rect(rect: WidgetRect, grid_size: i32) -> WidgetRect {
    WidgetRect {
        x: snap_coord(rect.x as f64, grid_size),
        y: snap_coord(rect.y as f64, grid_size),
        width: snap_coord(rect.width as f64, grid_size).max(grid_size),
        height: snap_coord(rect.height as f64, grid_size).max(grid_size),
    }
}

/// Grid settings of one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid spacing, always > 0.
    pub size: i32,
    /// Snap positions and sizes to the grid.
    pub snap: bool,
    /// Paint grid lines.
    pub show: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            snap: true,
            show: true,
        }
    }
}

impl GridConfig {
    /// Change the grid spacing. Non-positive sizes are rejected and the
    /// current spacing is kept.
    pub fn set_size(&mut self, size: i32) -> Result<(), CanvasError> {
        if size <= 0 {
            return Err(CanvasError::InvalidConfiguration(format!(
                "grid size must be positive, got {size}"
            )));
        }
        self.size = size;
        Ok(())
    }

    /// Snap a point if snapping is on.
    pub fn apply_to_point(&self, point: Point) -> Point {
        if self.snap {
            snap_point(point, self.size)
        } else {
            point
        }
    }

    /// Snap a rectangle if snapping is on.
    pub fn apply_to_rect(&self, rect: WidgetRect) -> WidgetRect {
        if self.snap { snap_rect(rect, self.size) } else { rect }
    }

    /// Grid lines covering a `width` x `height` canvas, verticals first.
    ///
    /// Empty when the grid is hidden.
    pub fn lines(&self, width: f64, height: f64) -> impl Iterator<Item = Line> + '_ {
        let step = self.size.max(1) as usize;
        let (cols, rows) = if self.show {
            (width.max(0.0).ceil() as usize, height.max(0.0).ceil() as usize)
        } else {
            (0, 0)
        };
        let verticals = (0..cols).step_by(step).map(move |x| {
            let x = x as f64;
            Line::new((x, 0.0), (x, height))
        });
        let horizontals = (0..rows).step_by(step).map(move |y| {
            let y = y as f64;
            Line::new((0.0, y), (width, y))
        });
        verticals.chain(horizontals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_coord_rounds_to_nearest() {
        assert_eq!(snap_coord(23.0, 10), 20);
        assert_eq!(snap_coord(27.0, 10), 30);
        assert_eq!(snap_coord(113.0, 10), 110);
        assert_eq!(snap_coord(96.0, 10), 100);
    }

    #[test]
    fn test_snap_coord_half_away_from_zero() {
        assert_eq!(snap_coord(15.0, 10), 20);
        assert_eq!(snap_coord(-15.0, 10), -20);
        assert_eq!(snap_coord(25.0, 10), 30);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for grid in [1, 3, 7, 10, 16, 25] {
            for raw in -120..=120 {
                let p = Point::new(raw as f64 * 1.7, raw as f64 * -0.9);
                let once = snap_point(p, grid);
                assert_eq!(snap_point(once, grid), once, "grid {grid}, point {p:?}");
            }
        }
    }

    #[test]
    fn test_snap_rect_floors_size_to_grid() {
        let r = snap_rect(WidgetRect::new(12, 19, 3, 44), 10);
        assert_eq!(r, WidgetRect::new(10, 20, 10, 40));
    }

    #[test]
    fn test_snap_rect_idempotent() {
        let r = snap_rect(WidgetRect::new(37, 41, 118, 29), 8);
        assert_eq!(snap_rect(r, 8), r);
    }

    #[test]
    fn test_grid_rejects_non_positive_size() {
        let mut grid = GridConfig::default();
        assert!(grid.set_size(0).is_err());
        assert!(grid.set_size(-5).is_err());
        assert_eq!(grid.size, DEFAULT_GRID_SIZE);
        grid.set_size(25).unwrap();
        assert_eq!(grid.size, 25);
    }

    #[test]
    fn test_grid_apply_respects_snap_flag() {
        let mut grid = GridConfig::default();
        let p = Point::new(14.0, 26.0);
        assert_eq!(grid.apply_to_point(p), Point::new(10.0, 30.0));
        grid.snap = false;
        assert_eq!(grid.apply_to_point(p), p);
    }

    #[test]
    fn test_grid_lines() {
        let grid = GridConfig::default();
        let lines: Vec<Line> = grid.lines(30.0, 20.0).collect();
        // x = 0, 10, 20 and y = 0, 10
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], Line::new((10.0, 0.0), (10.0, 20.0)));
        assert_eq!(lines[4], Line::new((0.0, 10.0), (30.0, 10.0)));

        let hidden = GridConfig { show: false, ..GridConfig::default() };
        assert_eq!(hidden.lines(30.0, 20.0).count(), 0);
    }

    #[test]
    fn test_rect_edges_and_contains() {
        let r = WidgetRect::new(100, 100, 120, 30);
        assert_eq!(r.right(), 220);
        assert_eq!(r.bottom(), 130);
        assert!(r.contains(Point::new(100.0, 100.0)));
        assert!(r.contains(Point::new(219.0, 129.0)));
        assert!(!r.contains(Point::new(220.0, 110.0)));
        assert_eq!(WidgetRect::from_edges(10, 20, 40, 70), WidgetRect::new(10, 20, 30, 50));
    }

    #[test]
    fn test_normalized() {
        let r = WidgetRect::new(-4, 7, 3, 0).normalized(MIN_WIDGET_SIZE);
        assert_eq!(r, WidgetRect::new(0, 7, 10, 10));
    }

    #[test]
    fn test_normalized_keeps_far_edges_in_range() {
        let r = WidgetRect::new(2_147_483_600, i32::MAX, 100, 30).normalized(MIN_WIDGET_SIZE);
        assert_eq!(r, WidgetRect::new(i32::MAX - 100, i32::MAX - 30, 100, 30));
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);

        let huge = WidgetRect::new(50, 50, i32::MAX, i32::MAX).normalized(MIN_WIDGET_SIZE);
        assert_eq!(huge.origin(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_edge_arithmetic_saturates() {
        let r = WidgetRect::new(i32::MAX - 5, i32::MAX - 5, 100, 30);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
        assert_eq!(r.translate(20, 20).origin(), Point::new(i32::MAX as f64, i32::MAX as f64));
        assert_eq!(WidgetRect::from_edges(i32::MIN, 0, i32::MAX, 10).width, i32::MAX);
    }

    #[test]
    fn test_grid_apply_to_rect_respects_snap_flag() {
        let mut grid = GridConfig::default();
        let r = WidgetRect::new(13, 27, 104, 3);
        assert_eq!(grid.apply_to_rect(r), WidgetRect::new(10, 30, 100, 10));
        grid.snap = false;
        assert_eq!(grid.apply_to_rect(r), r);
    }
}
