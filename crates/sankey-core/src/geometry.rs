//! Geometric primitives for flow layout and positioning.
//!
//! This module provides the geometric types used to describe where a laid out
//! node sits and how a link band curves between two nodes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in layout space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`CubicCurve`] - A cubic Bézier segment, the centre line of a link band
//!
//! # Coordinate System
//!
//! Layout coordinates follow the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X   (breadth)
//!     │
//!     │
//!     ▼
//!    +Y                  (depth)
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward, in the direction of flow
//! - **Y-axis**: Increases downward

use serde::Serialize;
use svg::node::{Value, element::path::Data};

/// A 2D point representing a position in layout coordinate space.
///
/// # Examples
///
/// ```
/// # use sankey_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let half = p1.lerp(p2, 0.5);
/// assert_eq!(half.x(), 7.5);
/// assert_eq!(half.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates
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

    /// Linearly interpolates between this point and `other`.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Creates bounds with this point as the top-left corner and the given size
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// A two-dimensional size with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width of the size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height of the size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}

/// A cubic Bézier segment from `start` to `end`.
///
/// Link bands are drawn along this centre line with a stroke width equal to
/// the link thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicCurve {
    start: Point,
    control1: Point,
    control2: Point,
    end: Point,
}

impl CubicCurve {
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn control1(&self) -> Point {
        self.control1
    }

    pub fn control2(&self) -> Point {
        self.control2
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns SVG path data (`M … C …`) for this curve.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sankey_core::geometry::{CubicCurve, Point};
    /// let curve = CubicCurve::new(
    ///     Point::new(0.0, 10.0),
    ///     Point::new(50.0, 10.0),
    ///     Point::new(50.0, 30.0),
    ///     Point::new(100.0, 30.0),
    /// );
    /// let data = curve.to_path_data();
    /// assert!(data.starts_with('M'));
    /// assert!(data.contains('C'));
    /// ```
    pub fn to_path_data(&self) -> String {
        let data = Data::new()
            .move_to((self.start.x, self.start.y))
            .cubic_curve_to((
                self.control1.x,
                self.control1.y,
                self.control2.x,
                self.control2.y,
                self.end.x,
                self.end.y,
            ));
        Value::from(data).to_string()
    }
}
