//! Geometry primitives and the grid to model coordinate convention.

mod point3;

pub use point3::Point3;

/// Maps the DSM cell at (`row`, `col`) with the given height to model space.
///
/// Planar coordinates are divided by `resolution` in single precision. The
/// axes are permuted for the downstream viewers: x is the grid row, y is the
/// negated grid column and z is the raw height.
pub fn grid_to_model(row: usize, col: usize, height: f32, resolution: f32) -> Point3 {
    let along = f64::from(row as f32 / resolution);
    let across = f64::from(col as f32 / resolution);
    Point3::new(along, -across, f64::from(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_negative_zero_column() {
        let p = grid_to_model(0, 0, 5.0, 1.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert!(p.y.is_sign_negative());
        assert_eq!(p.z, 5.0);
    }

    #[test]
    fn row_becomes_x_and_column_becomes_negated_y() {
        let p = grid_to_model(3, 7, -2.5, 2.0);
        assert_eq!(p, Point3::new(1.5, -3.5, -2.5));
    }

    #[test]
    fn array_keeps_axis_order() {
        assert_eq!(Point3::new(1.0, -2.0, 3.0).to_array(), [1.0, -2.0, 3.0]);
        assert_eq!(Point3::default().to_array(), [0.0; 3]);
    }

    #[test]
    fn resolution_is_applied_in_single_precision() {
        let p = grid_to_model(1, 0, 0.0, 0.37);
        assert_eq!(p.x, f64::from(1.0f32 / 0.37f32));
    }
}
