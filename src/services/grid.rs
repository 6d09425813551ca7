//! Grid geometry: one translated frame and one rectangle per cell.

use std::collections::BTreeMap;

use crate::error::GeometryError;
use crate::models::geometry::check_dimensions;
use crate::models::{Frame, GridIndex, Rectangle};

/// Frame and tile footprint of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub frame: Frame,
    pub rectangle: Rectangle,
}

/// Lay out `columns × rows` cells of `width × height` on `base`.
///
/// Cell `(i, j)` sits at `base.origin + x_axis * (i * width) + y_axis * (j * height)`
/// with the base orientation. A zero column or row count yields an empty map.
///
/// # Errors
///
/// [`GeometryError::InvalidDimension`] if `width` or `height` is not a
/// positive finite number, whether or not the grid is empty.
pub fn generate(
    base: &Frame,
    width: f64,
    height: f64,
    columns: usize,
    rows: usize,
) -> Result<BTreeMap<GridIndex, GridCell>, GeometryError> {
    check_dimensions(width, height)?;

    let x_axis = base.x_axis();
    let y_axis = base.y_axis();
    let mut cells = BTreeMap::new();

    for i in 0..columns {
        for j in 0..rows {
            let offset = x_axis * (i as f64 * width) + y_axis * (j as f64 * height);
            let frame = base.translated(offset);
            let rectangle = Rectangle::new(frame, width, height)?;
            cells.insert(GridIndex::new(i, j), GridCell { frame, rectangle });
        }
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point3, Vector3};

    #[test]
    fn test_cell_count_and_indices() {
        for (columns, rows) in [(0, 0), (0, 4), (3, 0), (1, 1), (3, 4), (7, 2)] {
            let cells = generate(&Frame::world_xy(), 1.0, 1.0, columns, rows).unwrap();
            assert_eq!(cells.len(), columns * rows);
            for index in cells.keys() {
                assert!(index.column < columns);
                assert!(index.row < rows);
            }
        }
    }

    #[test]
    fn test_origins_on_world_plane() {
        let cells = generate(&Frame::world_xy(), 10.0, 10.0, 2, 2).unwrap();
        let origins: Vec<Point3> = cells.values().map(|c| c.frame.origin()).collect();

        assert_eq!(
            origins,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 10.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_origins_follow_base_axes() {
        // Base plane is the world YZ plane shifted to (5, 0, 0).
        let base = Frame::new(Point3::new(5.0, 0.0, 0.0), Vector3::Y, Vector3::Z).unwrap();
        let cells = generate(&base, 2.0, 3.0, 3, 2).unwrap();

        for (index, cell) in &cells {
            let expected = Point3::new(
                5.0,
                index.column as f64 * 2.0,
                index.row as f64 * 3.0,
            );
            assert_eq!(cell.frame.origin(), expected);
            assert_eq!(cell.rectangle.frame(), &cell.frame);
            assert_eq!(cell.frame.x_axis(), base.x_axis());
            assert_eq!(cell.frame.y_axis(), base.y_axis());
        }
    }

    #[test]
    fn test_rectangle_dimensions() {
        let cells = generate(&Frame::world_xy(), 2.5, 4.0, 2, 3).unwrap();
        for cell in cells.values() {
            assert_eq!(cell.rectangle.width(), 2.5);
            assert_eq!(cell.rectangle.height(), 4.0);
        }
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        let base = Frame::world_xy();
        assert_eq!(
            generate(&base, -1.0, 10.0, 2, 2),
            Err(GeometryError::InvalidDimension {
                width: -1.0,
                height: 10.0
            })
        );
        assert!(generate(&base, 10.0, 0.0, 2, 2).is_err());
        // Still rejected for an empty grid.
        assert!(generate(&base, -1.0, 1.0, 0, 0).is_err());
    }
}
