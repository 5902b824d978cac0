//! Regular grids for snapshot data.

use crate::{
    geometry::{Dim3, Idx3, In3D, Point3, Vec3},
    num::BFloat,
};
use num;
use std::cmp;

/// A quantity found inside the grid, or a marker that the queried point
/// lies outside the grid extent.
#[derive(Clone, Debug, PartialEq)]
pub enum GridPointQuery3<T> {
    Inside(T),
    Outside,
}

/// A 3D grid with uniform cell spacing in each dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularGrid3<F> {
    shape: In3D<usize>,
    lower_bounds: Vec3<F>,
    upper_bounds: Vec3<F>,
    cell_extents: Vec3<F>,
}

impl<F: BFloat> RegularGrid3<F> {
    /// Creates a new grid spanning the given bounds with the given number
    /// of cells in each dimension.
    pub fn new(shape: In3D<usize>, lower_bounds: Vec3<F>, upper_bounds: Vec3<F>) -> Self {
        for &dim in &Dim3::slice() {
            assert!(
                shape[dim] > 0,
                "Grid must have at least one cell in every dimension"
            );
            assert!(
                upper_bounds[dim] > lower_bounds[dim],
                "Grid upper bounds must exceed lower bounds"
            );
        }
        let cell_extents = Vec3::with_each_component(|dim| {
            (upper_bounds[dim] - lower_bounds[dim])
                / F::from_usize(shape[dim]).expect("Conversion failed")
        });
        Self {
            shape,
            lower_bounds,
            upper_bounds,
            cell_extents,
        }
    }

    /// Returns the 3D shape of the grid.
    pub fn shape(&self) -> &In3D<usize> {
        &self.shape
    }

    /// Returns the lower corner of the grid extent.
    pub fn lower_bounds(&self) -> &Vec3<F> {
        &self.lower_bounds
    }

    /// Returns the upper corner of the grid extent.
    pub fn upper_bounds(&self) -> &Vec3<F> {
        &self.upper_bounds
    }

    /// Returns the extent of a grid cell in each dimension.
    pub fn cell_extents(&self) -> &Vec3<F> {
        &self.cell_extents
    }

    /// Returns the coordinate of the center of the grid cell with the
    /// given index along the given dimension.
    pub fn cell_center_coord(&self, dim: Dim3, idx: usize) -> F {
        let half = F::from_f64(0.5).expect("Conversion failed");
        self.lower_bounds[dim]
            + (F::from_usize(idx).expect("Conversion failed") + half) * self.cell_extents[dim]
    }

    /// Whether the given point lies inside the grid extent.
    pub fn contains_point(&self, point: &Point3<F>) -> bool {
        Dim3::slice().iter().all(|&dim| {
            point[dim] >= self.lower_bounds[dim] && point[dim] <= self.upper_bounds[dim]
        })
    }

    /// Finds the 3D index of the grid cell containing the given point,
    /// or reports that the point lies outside the grid extent.
    pub fn find_grid_cell(&self, point: &Point3<F>) -> GridPointQuery3<Idx3<usize>> {
        if !self.contains_point(point) {
            return GridPointQuery3::Outside;
        }
        GridPointQuery3::Inside(Idx3::with_each_component(|dim| {
            self.cell_idx(dim, point[dim])
        }))
    }

    fn cell_idx(&self, dim: Dim3, coord: F) -> usize {
        let offset = ((coord - self.lower_bounds[dim]) / self.cell_extents[dim]).floor();
        let idx: usize = num::cast(offset).expect("Conversion failed");
        // A coordinate exactly on the upper bound belongs to the last cell.
        cmp::min(idx, self.shape[dim] - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dim3::{X, Y, Z};
    use approx::assert_relative_eq;

    fn create_grid() -> RegularGrid3<f64> {
        RegularGrid3::new(
            In3D::new(4, 2, 8),
            Vec3::new(-2.0, 0.0, 1.0),
            Vec3::new(2.0, 1.0, 5.0),
        )
    }

    #[test]
    fn cell_extents_follow_shape_and_bounds() {
        let grid = create_grid();
        assert_relative_eq!(grid.cell_extents()[X], 1.0);
        assert_relative_eq!(grid.cell_extents()[Y], 0.5);
        assert_relative_eq!(grid.cell_extents()[Z], 0.5);
        assert_relative_eq!(grid.cell_center_coord(X, 0), -1.5);
        assert_relative_eq!(grid.cell_center_coord(Z, 7), 4.75);
    }

    #[test]
    fn points_on_the_boundary_are_contained() {
        let grid = create_grid();
        assert!(grid.contains_point(&Point3::new(-2.0, 0.0, 1.0)));
        assert!(grid.contains_point(&Point3::new(2.0, 1.0, 5.0)));
        assert!(!grid.contains_point(&Point3::new(2.0 + 1e-12, 1.0, 5.0)));
    }

    #[test]
    fn grid_cells_are_found_for_interior_and_boundary_points() {
        let grid = create_grid();
        assert_eq!(
            grid.find_grid_cell(&Point3::new(-1.5, 0.25, 1.25)),
            GridPointQuery3::Inside(Idx3::new(0, 0, 0))
        );
        assert_eq!(
            grid.find_grid_cell(&Point3::new(2.0, 1.0, 5.0)),
            GridPointQuery3::Inside(Idx3::new(3, 1, 7))
        );
        assert_eq!(
            grid.find_grid_cell(&Point3::new(0.0, -0.1, 3.0)),
            GridPointQuery3::Outside
        );
    }
}
