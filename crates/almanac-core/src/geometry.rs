//! Geometric primitives for timeline layout.
//!
//! This module provides the pixel-space types every layout strategy produces
//! and the collision tests the placement passes rely on.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate on the canvas
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle anchored at its top-left corner
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the canvas, X grows rightward and Y
//! grows downward, matching SVG and raster image conventions.

use serde::Serialize;

/// A 2D point on the canvas.
///
/// # Examples
///
/// ```
/// # use almanac_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle defined by its top-left corner and size.
///
/// Width and height are never negative: constructors clamp them at zero.
///
/// # Examples
///
/// ```
/// # use almanac_core::geometry::Rect;
/// let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
/// assert_eq!(rect.right(), 110.0);
/// assert_eq!(rect.bottom(), 60.0);
/// assert_eq!(rect.center_x(), 60.0);
/// assert_eq!(rect.center_y(), 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Creates a rectangle of the given size centered on `center`
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Returns the left edge
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the top edge
    pub fn y(self) -> f32 {
        self.y
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the right edge (`x + width`)
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`)
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Returns a copy with a new height, clamped at zero
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Moves the rectangle by the given offset, keeping its size.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac_core::geometry::{Point, Rect};
    /// let rect = Rect::new(10.0, 20.0, 50.0, 30.0);
    /// let moved = rect.translate(Point::new(100.0, -5.0));
    /// assert_eq!(moved.x(), 110.0);
    /// assert_eq!(moved.y(), 15.0);
    /// assert_eq!(moved.width(), 50.0);
    /// ```
    pub fn translate(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Returns the smallest rectangle containing both rectangles
    pub fn merge(self, other: Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Shrinks the rectangle by the given insets, never below zero size
    pub fn inset(self, insets: Insets) -> Self {
        Self::new(
            self.x + insets.left(),
            self.y + insets.top(),
            self.width - insets.horizontal_sum(),
            self.height - insets.vertical_sum(),
        )
    }

    /// Padded axis-aligned intersection test.
    ///
    /// Rectangles collide when the gap between them on both axes is smaller
    /// than `padding`. The comparison is strict, so a gap of exactly
    /// `padding` does not collide.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac_core::geometry::Rect;
    /// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// let b = Rect::new(14.0, 0.0, 10.0, 10.0);
    /// assert!(!a.intersects(&b, 0.0));
    /// assert!(!a.intersects(&b, 4.0));
    /// assert!(a.intersects(&b, 5.0));
    /// ```
    pub fn intersects(&self, other: &Rect, padding: f32) -> bool {
        self.x < other.right() + padding
            && self.right() + padding > other.x
            && self.y < other.bottom() + padding
            && self.bottom() + padding > other.y
    }

    /// How far the x extents overlap once `padding` is added, or zero
    ///
    /// A positive result means the rectangles are closer than `padding`
    /// horizontally.
    pub fn horizontal_overlap(&self, other: &Rect, padding: f32) -> f32 {
        (self.right().min(other.right()) + padding - self.x.max(other.x)).max(0.0)
    }
}

/// Spacing around an element with potentially different values per side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_rect_negative_dimensions_clamped() {
        let rect = Rect::new(5.0, 5.0, -10.0, -1.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
        assert_eq!(rect.right(), 5.0);
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(Point::new(50.0, 50.0), Size::new(16.0, 16.0));
        assert_eq!(rect.x(), 42.0);
        assert_eq!(rect.y(), 42.0);
        assert_eq!(rect.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_rect_touching_does_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below, 0.0));
        assert!(!a.intersects(&right, 0.0));
    }

    #[test]
    fn test_rect_padding_creates_collision() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(15.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b, 3.0));
        assert!(!a.intersects(&b, 5.0));
        assert!(a.intersects(&b, 6.0));
    }

    #[test]
    fn test_rect_padding_applies_once_vertically() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 18.0, 10.0, 10.0);
        assert!(!a.intersects(&b, 8.0));
        assert!(a.intersects(&b, 9.0));
        assert!(b.intersects(&a, 9.0));
    }

    #[test]
    fn test_rect_overlapping_intersects_symmetrically() {
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(a.intersects(&b, 0.0));
        assert!(b.intersects(&a, 0.0));
    }

    #[test]
    fn test_rect_horizontal_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 10.0);
        let b = Rect::new(70.0, 500.0, 100.0, 10.0);
        let c = Rect::new(200.0, 0.0, 10.0, 10.0);
        assert_approx_eq!(f32, a.horizontal_overlap(&b, 0.0), 30.0);
        assert_approx_eq!(f32, b.horizontal_overlap(&a, 0.0), 30.0);
        assert_eq!(a.horizontal_overlap(&c, 0.0), 0.0);

        // 100px gap to c
        assert_eq!(a.horizontal_overlap(&c, 100.0), 0.0);
        assert_approx_eq!(f32, a.horizontal_overlap(&c, 110.0), 10.0);
        assert_approx_eq!(f32, a.horizontal_overlap(&b, 5.0), 35.0);
    }

    #[test]
    fn test_rect_merge() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 20.0);
        let merged = a.merge(b);
        assert_eq!(merged, Rect::new(0.0, 0.0, 30.0, 25.0));
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0).inset(Insets::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(rect, Rect::new(40.0, 10.0, 140.0, 60.0));
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn rect_strategy() -> impl Strategy<Value = Rect> {
            (
                -500.0f32..500.0,
                -500.0f32..500.0,
                0.0f32..200.0,
                0.0f32..200.0,
            )
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        fn check_intersects_symmetric(a: Rect, b: Rect, padding: f32) -> Result<(), TestCaseError> {
            prop_assert_eq!(a.intersects(&b, padding), b.intersects(&a, padding));
            Ok(())
        }

        fn check_merge_contains_both(a: Rect, b: Rect) -> Result<(), TestCaseError> {
            let merged = a.merge(b);
            prop_assert!(merged.x() <= a.x() && merged.x() <= b.x());
            prop_assert!(merged.y() <= a.y() && merged.y() <= b.y());
            prop_assert!(merged.right() >= a.right() - 1e-3);
            prop_assert!(merged.right() >= b.right() - 1e-3);
            prop_assert!(merged.bottom() >= a.bottom() - 1e-3);
            prop_assert!(merged.bottom() >= b.bottom() - 1e-3);
            Ok(())
        }

        fn check_overlap_bounded(a: Rect, b: Rect, padding: f32) -> Result<(), TestCaseError> {
            let overlap = a.horizontal_overlap(&b, padding);
            prop_assert!(overlap >= 0.0);
            prop_assert!(overlap <= a.width().min(b.width()) + padding + 1e-3);
            prop_assert!((overlap - b.horizontal_overlap(&a, padding)).abs() < 1e-3);
            Ok(())
        }

        fn check_overlap_agrees_with_intersects(a: Rect, padding: f32, dx: f32) -> Result<(), TestCaseError> {
            // Same row, so only the x gap decides
            let b = Rect::new(a.right() + dx, a.y(), a.width(), a.height());
            let overlapping = a.horizontal_overlap(&b, padding) > 0.0;
            prop_assert_eq!(overlapping, a.intersects(&b, padding));
            Ok(())
        }

        proptest! {
            #[test]
            fn intersects_symmetric(a in rect_strategy(), b in rect_strategy(), padding in 0.0f32..20.0) {
                check_intersects_symmetric(a, b, padding)?;
            }

            #[test]
            fn merge_contains_both(a in rect_strategy(), b in rect_strategy()) {
                check_merge_contains_both(a, b)?;
            }

            #[test]
            fn overlap_bounded(a in rect_strategy(), b in rect_strategy(), padding in 0.0f32..20.0) {
                check_overlap_bounded(a, b, padding)?;
            }

            #[test]
            fn overlap_agrees_with_intersects(a in rect_strategy(), padding in 0.0f32..20.0, dx in 0.0f32..40.0) {
                check_overlap_agrees_with_intersects(a, padding, dx)?;
            }
        }
    }
}
