use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Width and height on the 2D drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension2D {
    pub width: f64,
    pub height: f64,
}

impl Dimension2D {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Extent of a box in world units along x (width), y (height) and z (depth).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension3D {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimension3D {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Length of the box's space diagonal.
    pub fn diagonal_length(&self) -> f64 {
        (self.width * self.width + self.height * self.height + self.depth * self.depth).sqrt()
    }
}

/// Translation on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset2D {
    pub dx: f64,
    pub dy: f64,
}

impl Offset2D {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Add for Offset2D {
    type Output = Offset2D;
    fn add(self, rhs: Self) -> Self::Output {
        Offset2D::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Translation in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset3D {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Offset3D {
    pub const ZERO: Self = Self {
        dx: 0.0,
        dy: 0.0,
        dz: 0.0,
    };

    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }
}
