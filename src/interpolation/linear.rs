//! First order (trilinear) interpolation.

use super::Interpolator3;
use crate::{
    field::{ScalarField3, VectorField3},
    geometry::{
        Dim3::{self, X, Y, Z},
        In3D, Point3, Vec3,
    },
    grid::{GridPointQuery3, RegularGrid3},
    num::BFloat,
};
use ndarray::prelude::*;
use num;
use std::cmp;

/// A 3D interpolator using trilinear interpolation between the eight
/// surrounding grid cell centers.
///
/// Points lying between the grid boundary and the outermost layer of
/// cell centers take the boundary cell value, so every point inside the
/// grid extent is evaluable.
#[derive(Clone, Copy, Debug)]
pub struct LinearInterpolator3;

impl LinearInterpolator3 {
    fn interp<F: BFloat>(grid: &RegularGrid3<F>, values: &Array3<F>, interp_point: &Point3<F>) -> F {
        let mut lower_idx = In3D::same(0_usize);
        let mut upper_idx = In3D::same(0_usize);
        let mut frac = Vec3::zero();
        for &dim in &Dim3::slice() {
            let (idx, offset) = Self::find_center_interval(grid, dim, interp_point[dim]);
            lower_idx[dim] = idx;
            upper_idx[dim] = cmp::min(idx + 1, grid.shape()[dim] - 1);
            frac[dim] = offset;
        }

        let one = F::one();
        let mut value = F::zero();
        for &(i, weight_x) in &[(lower_idx[X], one - frac[X]), (upper_idx[X], frac[X])] {
            for &(j, weight_y) in &[(lower_idx[Y], one - frac[Y]), (upper_idx[Y], frac[Y])] {
                for &(k, weight_z) in &[(lower_idx[Z], one - frac[Z]), (upper_idx[Z], frac[Z])] {
                    value = value + weight_x * weight_y * weight_z * values[[i, j, k]];
                }
            }
        }
        value
    }

    /// Finds the index of the cell center at or below the coordinate and
    /// the fractional position of the coordinate within the center
    /// interval, clamping within the boundary half-cells.
    fn find_center_interval<F: BFloat>(grid: &RegularGrid3<F>, dim: Dim3, coord: F) -> (usize, F) {
        let n_cells = grid.shape()[dim];
        // A single-cell axis has no center interval; the value is
        // constant along it.
        if n_cells < 2 {
            return (0, F::zero());
        }
        let half = F::from_f64(0.5).expect("Conversion failed");
        let center_offset =
            (coord - grid.lower_bounds()[dim]) / grid.cell_extents()[dim] - half;
        if center_offset <= F::zero() {
            (0, F::zero())
        } else {
            let lower = center_offset.floor();
            let idx: usize = num::cast(lower).expect("Conversion failed");
            if idx >= n_cells - 1 {
                (n_cells - 2, F::one())
            } else {
                (idx, center_offset - lower)
            }
        }
    }
}

impl<F: BFloat> Interpolator3<F> for LinearInterpolator3 {
    fn interp_scalar_field(
        &self,
        field: &ScalarField3<F>,
        interp_point: &Point3<F>,
    ) -> GridPointQuery3<F> {
        if field.grid().contains_point(interp_point) {
            GridPointQuery3::Inside(Self::interp(field.grid(), field.values(), interp_point))
        } else {
            GridPointQuery3::Outside
        }
    }

    fn interp_vector_field(
        &self,
        field: &VectorField3<F>,
        interp_point: &Point3<F>,
    ) -> GridPointQuery3<Vec3<F>> {
        if field.grid().contains_point(interp_point) {
            GridPointQuery3::Inside(Vec3::with_each_component(|dim| {
                Self::interp(field.grid(), field.values(dim), interp_point)
            }))
        } else {
            GridPointQuery3::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn create_linear_field() -> ScalarField3<f64> {
        let grid = Arc::new(RegularGrid3::new(
            In3D::new(4, 4, 4),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 4.0, 4.0),
        ));
        // Value varies linearly with all three coordinates of the cell center.
        let values = Array::from_shape_fn((4, 4, 4), |(i, j, k)| {
            2.0 * grid.cell_center_coord(X, i) - grid.cell_center_coord(Y, j)
                + 0.5 * grid.cell_center_coord(Z, k)
        });
        ScalarField3::new("q".to_string(), grid, values)
    }

    fn linear_function(point: &Point3<f64>) -> f64 {
        2.0 * point[X] - point[Y] + 0.5 * point[Z]
    }

    #[test]
    fn linear_fields_are_reproduced_exactly_between_centers() {
        let field = create_linear_field();
        let interpolator = LinearInterpolator3;
        for point in [
            Point3::new(1.3, 2.7, 0.9),
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(3.49, 1.0, 3.1),
        ] {
            match interpolator.interp_scalar_field(&field, &point) {
                GridPointQuery3::Inside(value) => {
                    assert_relative_eq!(value, linear_function(&point), max_relative = 1e-12);
                }
                GridPointQuery3::Outside => panic!("Interior point reported outside"),
            }
        }
    }

    #[test]
    fn boundary_half_cells_take_the_boundary_value() {
        let field = create_linear_field();
        let interpolator = LinearInterpolator3;
        let clamped = Point3::new(0.1, 0.1, 0.1);
        let boundary_center = Point3::new(0.5, 0.5, 0.5);
        assert_eq!(
            interpolator.interp_scalar_field(&field, &clamped),
            GridPointQuery3::Inside(linear_function(&boundary_center))
        );
    }

    #[test]
    fn single_cell_axes_take_the_cell_value() {
        let grid = Arc::new(RegularGrid3::new(
            In3D::new(1, 2, 2),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 2.0),
        ));
        let values = Array::from_shape_fn((1, 2, 2), |(_, j, k)| (j + 10 * k) as f64);
        let field = ScalarField3::new("q".to_string(), grid, values);
        let interpolator = LinearInterpolator3;
        assert_eq!(
            interpolator.interp_scalar_field(&field, &Point3::new(0.5, 1.0, 0.5)),
            GridPointQuery3::Inside(0.5)
        );
        assert_eq!(
            interpolator.interp_scalar_field(&field, &Point3::new(0.9, 0.5, 1.5)),
            GridPointQuery3::Inside(10.0)
        );
    }

    #[test]
    fn points_outside_the_grid_are_rejected() {
        let field = create_linear_field();
        let interpolator = LinearInterpolator3;
        assert_eq!(
            interpolator.interp_scalar_field(&field, &Point3::new(4.1, 1.0, 1.0)),
            GridPointQuery3::Outside
        );
    }
}
