//! Zeroth order interpolation.

use super::Interpolator3;
use crate::{
    field::{ScalarField3, VectorField3},
    geometry::{
        Dim3::{X, Y, Z},
        Point3, Vec3,
    },
    grid::GridPointQuery3,
    num::BFloat,
};

/// A 3D interpolator that evaluates a field by looking up the value
/// stored for the grid cell containing the interpolation point.
#[derive(Clone, Copy, Debug)]
pub struct NearestInterpolator3;

impl<F: BFloat> Interpolator3<F> for NearestInterpolator3 {
    fn interp_scalar_field(
        &self,
        field: &ScalarField3<F>,
        interp_point: &Point3<F>,
    ) -> GridPointQuery3<F> {
        match field.grid().find_grid_cell(interp_point) {
            GridPointQuery3::Inside(idx) => {
                GridPointQuery3::Inside(field.values()[[idx[X], idx[Y], idx[Z]]])
            }
            GridPointQuery3::Outside => GridPointQuery3::Outside,
        }
    }

    fn interp_vector_field(
        &self,
        field: &VectorField3<F>,
        interp_point: &Point3<F>,
    ) -> GridPointQuery3<Vec3<F>> {
        match field.grid().find_grid_cell(interp_point) {
            GridPointQuery3::Inside(idx) => GridPointQuery3::Inside(Vec3::with_each_component(
                |dim| field.values(dim)[[idx[X], idx[Y], idx[Z]]],
            )),
            GridPointQuery3::Outside => GridPointQuery3::Outside,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::In3D, grid::RegularGrid3};
    use ndarray::prelude::*;
    use std::sync::Arc;

    fn create_field() -> ScalarField3<f64> {
        let grid = Arc::new(RegularGrid3::new(
            In3D::new(2, 2, 2),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        ));
        let values = Array::from_shape_fn((2, 2, 2), |(i, j, k)| (4 * i + 2 * j + k) as f64);
        ScalarField3::new("q".to_string(), grid, values)
    }

    #[test]
    fn value_of_containing_cell_is_returned() {
        let field = create_field();
        let interpolator = NearestInterpolator3;
        assert_eq!(
            interpolator.interp_scalar_field(&field, &Point3::new(0.5, 0.5, 1.5)),
            GridPointQuery3::Inside(1.0)
        );
        assert_eq!(
            interpolator.interp_scalar_field(&field, &Point3::new(1.9, 1.9, 0.1)),
            GridPointQuery3::Inside(6.0)
        );
    }

    #[test]
    fn points_outside_the_grid_are_rejected() {
        let field = create_field();
        let interpolator = NearestInterpolator3;
        assert_eq!(
            interpolator.interp_scalar_field(&field, &Point3::new(-0.1, 0.5, 0.5)),
            GridPointQuery3::Outside
        );
    }
}
