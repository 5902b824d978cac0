//! Scalar and vector fields sampled on a regular grid.

use crate::{
    geometry::{
        Dim3::{self, X, Y, Z},
        In3D,
    },
    grid::RegularGrid3,
    num::BFloat,
};
use ndarray::prelude::*;
use std::sync::Arc;

/// A 3D scalar field holding the values of a single physical quantity
/// at every cell of a regular grid.
#[derive(Clone, Debug)]
pub struct ScalarField3<F> {
    name: String,
    grid: Arc<RegularGrid3<F>>,
    values: Array3<F>,
}

impl<F: BFloat> ScalarField3<F> {
    /// Creates a new scalar field from the given grid and values.
    pub fn new(name: String, grid: Arc<RegularGrid3<F>>, values: Array3<F>) -> Self {
        let shape = grid.shape();
        assert_eq!(
            values.shape(),
            [shape[X], shape[Y], shape[Z]],
            "Field value shape differs from grid shape"
        );
        Self { name, grid, values }
    }

    /// Returns the name of the quantity the field holds.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the grid the field is sampled on.
    pub fn grid(&self) -> &RegularGrid3<F> {
        &self.grid
    }

    /// Returns a new atomic reference counted pointer to the grid.
    pub fn arc_with_grid(&self) -> Arc<RegularGrid3<F>> {
        Arc::clone(&self.grid)
    }

    /// Returns a reference to the field values.
    pub fn values(&self) -> &Array3<F> {
        &self.values
    }
}

/// A 3D vector field whose component values share a single regular grid.
#[derive(Clone, Debug)]
pub struct VectorField3<F> {
    name: String,
    grid: Arc<RegularGrid3<F>>,
    components: In3D<Array3<F>>,
}

impl<F: BFloat> VectorField3<F> {
    /// Creates a new vector field from three scalar component fields
    /// defined on grids of identical shape and extent.
    pub fn from_scalar_components(name: String, components: In3D<ScalarField3<F>>) -> Self {
        let (x, y, z) = components.into_components();
        assert_eq!(
            x.grid(),
            y.grid(),
            "Vector field components must share a grid"
        );
        assert_eq!(
            x.grid(),
            z.grid(),
            "Vector field components must share a grid"
        );
        let grid = x.arc_with_grid();
        Self {
            name,
            grid,
            components: In3D::new(x.values, y.values, z.values),
        }
    }

    /// Returns the name of the quantity the field holds.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the grid the field is sampled on.
    pub fn grid(&self) -> &RegularGrid3<F> {
        &self.grid
    }

    /// Returns a reference to the values of the given vector component.
    pub fn values(&self, dim: Dim3) -> &Array3<F> {
        &self.components[dim]
    }
}
