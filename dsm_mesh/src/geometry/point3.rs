//! Vertex position in model space.

/// A 3D point in double precision, as written to the PLY vertex block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates in x, y, z order.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}
