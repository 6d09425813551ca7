//! Points, vectors, oriented frames and rectangles in 3D.

use std::ops::{Add, Mul, Neg, Sub};

use serde::Serialize;

use crate::error::GeometryError;

/// Below this length a direction vector is treated as zero.
const ZERO_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a (near) zero or
    /// non-finite vector.
    pub fn normalized(self) -> Option<Vector3> {
        let len = self.length();
        if !len.is_finite() || len < ZERO_TOLERANCE {
            return None;
        }
        Some(Vector3::new(self.x / len, self.y / len, self.z / len))
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;
    fn add(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Vector3;
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// An oriented plane: origin plus two orthonormal in-plane axes.
///
/// Axes are fixed at construction. Translating a frame only moves its
/// origin, so every cell frame of a grid shares the base orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    origin: Point3,
    x_axis: Vector3,
    y_axis: Vector3,
}

impl Frame {
    /// Build a frame from an origin and two in-plane directions.
    ///
    /// `x_dir` is normalized; `y_dir` has its `x_dir` component removed and
    /// is then normalized, so the axes are orthonormal even when the inputs
    /// are only roughly perpendicular.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidFrame`] if either direction is zero or the
    /// two are parallel.
    pub fn new(origin: Point3, x_dir: Vector3, y_dir: Vector3) -> Result<Self, GeometryError> {
        let x_axis = x_dir.normalized().ok_or(GeometryError::InvalidFrame)?;
        let y_axis = (y_dir - x_axis * y_dir.dot(x_axis))
            .normalized()
            .ok_or(GeometryError::InvalidFrame)?;
        Ok(Self {
            origin,
            x_axis,
            y_axis,
        })
    }

    /// The world XY plane at the origin.
    pub const fn world_xy() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vector3::X,
            y_axis: Vector3::Y,
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn x_axis(&self) -> Vector3 {
        self.x_axis
    }

    pub fn y_axis(&self) -> Vector3 {
        self.y_axis
    }

    /// Plane normal, `x_axis × y_axis`.
    pub fn z_axis(&self) -> Vector3 {
        self.x_axis.cross(self.y_axis)
    }

    /// Same orientation, origin moved by `offset`.
    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            origin: self.origin + offset,
            ..*self
        }
    }

    /// The point at plane coordinates `(u, v)`.
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin + (self.x_axis * u + self.y_axis * v)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::world_xy()
    }
}

/// A rectangle spanning `[0, width] × [0, height]` in its frame's plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    frame: Frame,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// # Errors
    ///
    /// [`GeometryError::InvalidDimension`] unless both sides are finite and
    /// strictly positive.
    pub fn new(frame: Frame, width: f64, height: f64) -> Result<Self, GeometryError> {
        check_dimensions(width, height)?;
        Ok(Self {
            frame,
            width,
            height,
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point3 {
        self.frame.point_at(self.width / 2.0, self.height / 2.0)
    }

    /// Corners counter-clockwise starting at the frame origin.
    pub fn corners(&self) -> [Point3; 4] {
        [
            self.frame.point_at(0.0, 0.0),
            self.frame.point_at(self.width, 0.0),
            self.frame.point_at(self.width, self.height),
            self.frame.point_at(0.0, self.height),
        ]
    }
}

pub(crate) fn check_dimensions(width: f64, height: f64) -> Result<(), GeometryError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_world_xy() {
        let frame = Frame::world_xy();
        assert_eq!(frame.origin(), Point3::ORIGIN);
        assert_eq!(frame.x_axis(), Vector3::X);
        assert_eq!(frame.y_axis(), Vector3::Y);
        assert_eq!(frame.z_axis(), Vector3::Z);
        assert_eq!(Frame::default(), frame);
    }

    #[test]
    fn test_new_orthonormalizes() {
        let frame = Frame::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 5.0, 0.0),
        )
        .unwrap();

        assert!(approx(frame.x_axis(), Vector3::X));
        assert!(approx(frame.y_axis(), Vector3::Y));
        assert!(frame.x_axis().dot(frame.y_axis()).abs() < 1e-12);
        assert!((frame.y_axis().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_degenerate_axes() {
        let o = Point3::ORIGIN;
        assert_eq!(
            Frame::new(o, Vector3::default(), Vector3::Y),
            Err(GeometryError::InvalidFrame)
        );
        assert_eq!(
            Frame::new(o, Vector3::X, Vector3::new(-3.0, 0.0, 0.0)),
            Err(GeometryError::InvalidFrame)
        );
        assert_eq!(
            Frame::new(o, Vector3::new(f64::NAN, 0.0, 0.0), Vector3::Y),
            Err(GeometryError::InvalidFrame)
        );
    }

    #[test]
    fn test_translated_keeps_axes() {
        let base = Frame::new(
            Point3::ORIGIN,
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let moved = base.translated(Vector3::new(4.0, -1.0, 2.5));

        assert_eq!(moved.origin(), Point3::new(4.0, -1.0, 2.5));
        assert_eq!(moved.x_axis(), base.x_axis());
        assert_eq!(moved.y_axis(), base.y_axis());
    }

    #[test]
    fn test_rectangle_rejects_non_positive() {
        let frame = Frame::world_xy();
        for (w, h) in [(0.0, 1.0), (1.0, -2.0), (f64::INFINITY, 1.0), (1.0, f64::NAN)] {
            assert!(matches!(
                Rectangle::new(frame, w, h),
                Err(GeometryError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn test_rectangle_corners_and_center() {
        let frame = Frame::world_xy().translated(Vector3::new(10.0, 0.0, 0.0));
        let rect = Rectangle::new(frame, 4.0, 2.0).unwrap();

        assert_eq!(
            rect.corners(),
            [
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(14.0, 0.0, 0.0),
                Point3::new(14.0, 2.0, 0.0),
                Point3::new(10.0, 2.0, 0.0),
            ]
        );
        assert_eq!(rect.center(), Point3::new(12.0, 1.0, 0.0));
        assert_eq!(rect.area(), 8.0);
    }
}
