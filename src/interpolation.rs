//! Interpolation of scalar and vector fields.

pub mod linear;
pub mod nearest;

use self::{linear::LinearInterpolator3, nearest::NearestInterpolator3};
use crate::{
    field::{ScalarField3, VectorField3},
    geometry::{Point3, Vec3},
    grid::GridPointQuery3,
    num::BFloat,
};

/// Defines the properties of a 3D interpolator.
pub trait Interpolator3<F: BFloat>: Sync + Send {
    /// Computes the interpolated value of a scalar field at the given point.
    ///
    /// # Returns
    ///
    /// A `GridPointQuery3<F>` which is either:
    ///
    /// - `Inside`: Contains the interpolated field value.
    /// - `Outside`: The interpolation point was outside the grid extent.
    fn interp_scalar_field(
        &self,
        field: &ScalarField3<F>,
        interp_point: &Point3<F>,
    ) -> GridPointQuery3<F>;

    /// Computes the interpolated vector of a vector field at the given point.
    ///
    /// # Returns
    ///
    /// A `GridPointQuery3<Vec3<F>>` which is either:
    ///
    /// - `Inside`: Contains the interpolated field vector.
    /// - `Outside`: The interpolation point was outside the grid extent.
    fn interp_vector_field(
        &self,
        field: &VectorField3<F>,
        interp_point: &Point3<F>,
    ) -> GridPointQuery3<Vec3<F>>;
}

/// Creates an interpolator sampling fields at the given interpolation
/// order (0 = nearest cell, 1 = trilinear), or `None` if the order is
/// not supported.
pub fn create_interpolator<F: BFloat>(order: u32) -> Option<Box<dyn Interpolator3<F>>> {
    match order {
        0 => Some(Box::new(NearestInterpolator3)),
        1 => Some(Box::new(LinearInterpolator3)),
        _ => None,
    }
}
