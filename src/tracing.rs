//! Tracing field lines of a vector field with the midpoint method.

use crate::{
    field::VectorField3,
    geometry::{Dim3, Point3, Vec3},
    grid::{GridPointQuery3, RegularGrid3},
    interpolation::Interpolator3,
    num::BFloat,
};
use num;
use std::{error, fmt};

/// Floating-point precision to use for tracing.
#[allow(non_camel_case_types)]
pub type ftr = f64;

/// Default minimum distance from the coordinate origin at which
/// tracing is permitted.
pub const DEFAULT_EXCLUSION_RADIUS: ftr = 1.0;

/// A fatal condition encountered while tracing a field line.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    /// A visited or candidate position lies outside the bounding volume.
    OutOfBounds(Point3<ftr>),
    /// The field could not be evaluated at the given position.
    BadSamplePoint(Point3<ftr>),
    /// The field vector sampled at the given position has zero magnitude,
    /// so no step direction exists.
    DegenerateField(Point3<ftr>),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(position) => {
                write!(f, "position {} is outside the tracing region", position)
            }
            Self::BadSamplePoint(position) => {
                write!(f, "the field could not be evaluated at {}", position)
            }
            Self::DegenerateField(position) => {
                write!(f, "the field vector at {} has zero magnitude", position)
            }
        }
    }
}

impl error::Error for TraceError {}

/// The spatial region in which tracing is permitted: a box given by two
/// corners, minus a sphere of the exclusion radius around the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingVolume {
    lower_corner: Point3<ftr>,
    upper_corner: Point3<ftr>,
    exclusion_radius: ftr,
}

impl BoundingVolume {
    /// Creates a new bounding volume with the given corners and
    /// exclusion radius.
    pub fn new(lower_corner: Point3<ftr>, upper_corner: Point3<ftr>, exclusion_radius: ftr) -> Self {
        for &dim in &Dim3::slice() {
            assert!(
                lower_corner[dim] <= upper_corner[dim],
                "Lower corner of bounding volume must not exceed upper corner"
            );
        }
        Self {
            lower_corner,
            upper_corner,
            exclusion_radius,
        }
    }

    /// Creates a bounding volume from optional caller limits intersected
    /// with the native extent of the given grid.
    ///
    /// On each axis the tighter of the caller bound and the grid bound
    /// wins, for minimum and maximum bounds alike. Without caller limits
    /// the native extent is used verbatim.
    pub fn from_limits_and_grid<F: BFloat>(
        limits: Option<(&Point3<ftr>, &Point3<ftr>)>,
        grid: &RegularGrid3<F>,
        exclusion_radius: ftr,
    ) -> Self {
        let cast = |value: F| num::cast::<F, ftr>(value).expect("Conversion failed");
        let grid_lower = Point3::with_each_component(|dim| cast(grid.lower_bounds()[dim]));
        let grid_upper = Point3::with_each_component(|dim| cast(grid.upper_bounds()[dim]));
        let (lower_corner, upper_corner) = match limits {
            Some((lower, upper)) => (
                Point3::with_each_component(|dim| ftr::max(lower[dim], grid_lower[dim])),
                Point3::with_each_component(|dim| ftr::min(upper[dim], grid_upper[dim])),
            ),
            None => (grid_lower, grid_upper),
        };
        Self::new(lower_corner, upper_corner, exclusion_radius)
    }

    /// Returns the lower corner of the volume.
    pub fn lower_corner(&self) -> &Point3<ftr> {
        &self.lower_corner
    }

    /// Returns the upper corner of the volume.
    pub fn upper_corner(&self) -> &Point3<ftr> {
        &self.upper_corner
    }

    /// Returns the exclusion radius of the volume.
    pub fn exclusion_radius(&self) -> ftr {
        self.exclusion_radius
    }

    /// Whether the given position lies inside the volume.
    ///
    /// The position must lie within the corner bounds on every axis and
    /// at least the exclusion radius away from the coordinate origin.
    pub fn contains(&self, position: &Point3<ftr>) -> bool {
        let mut inside = true;
        for &dim in &Dim3::slice() {
            inside = inside
                && position[dim] >= self.lower_corner[dim]
                && position[dim] <= self.upper_corner[dim];
        }
        inside && position.to_vec3().length() >= self.exclusion_radius
    }
}

/// Configuration parameters for the midpoint tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Signed step length; a negative value traces against the field
    /// direction.
    pub step_length: ftr,
    /// Number of steps to perform before terminating successfully.
    pub max_steps: u32,
}

/// Traces a single field line through the given vector field using the
/// midpoint method.
///
/// Each iteration samples the field at the current position, advances
/// half a step along the normalized field vector, samples again at the
/// resulting midpoint and advances the full step from the current
/// position along the corrected direction.
///
/// # Parameters
///
/// - `field`: Vector field to trace.
/// - `interpolator`: Interpolator to use for every field sample.
/// - `bounding_volume`: Region in which tracing is permitted.
/// - `config`: Step length and step budget for the trace.
/// - `start_position`: Position where the tracing should start.
/// - `callback`: Closure called with the start position and with each
///   advanced position.
///
/// # Returns
///
/// A `Result` which is either:
///
/// - `Ok`: Contains the number of advanced positions; the step budget
///   was exhausted without a fatal condition.
/// - `Err`: Contains the `TraceError` that terminated the trace.
pub fn trace_field_line<F: BFloat>(
    field: &VectorField3<F>,
    interpolator: &dyn Interpolator3<F>,
    bounding_volume: &BoundingVolume,
    config: &TracerConfig,
    start_position: &Point3<ftr>,
    callback: &mut dyn FnMut(&Point3<ftr>),
) -> Result<u32, TraceError> {
    if !bounding_volume.contains(start_position) {
        return Err(TraceError::OutOfBounds(start_position.clone()));
    }
    callback(start_position);

    let half_step_length = config.step_length * 0.5;
    let mut position = start_position.clone();
    let mut n_advanced = 0;

    for _ in 0..=config.max_steps {
        let direction = compute_field_direction(field, interpolator, &position)?;
        let midpoint = &position + &direction * half_step_length;
        // Re-check the current position rather than the midpoint, to
        // catch drift accumulated over earlier iterations.
        if !bounding_volume.contains(&position) {
            return Err(TraceError::OutOfBounds(position));
        }
        let midpoint_direction = compute_field_direction(field, interpolator, &midpoint)?;
        let next_position = &position + &midpoint_direction * config.step_length;
        if !bounding_volume.contains(&next_position) {
            return Err(TraceError::OutOfBounds(next_position));
        }
        callback(&next_position);
        position = next_position;
        n_advanced += 1;
    }
    Ok(n_advanced)
}

/// Samples the field at the given position and normalizes the sampled
/// vector to a unit direction.
fn compute_field_direction<F: BFloat>(
    field: &VectorField3<F>,
    interpolator: &dyn Interpolator3<F>,
    position: &Point3<ftr>,
) -> Result<Vec3<ftr>, TraceError> {
    match interpolator.interp_vector_field(field, &Point3::from(position)) {
        GridPointQuery3::Inside(vector) => {
            let direction = Vec3::from(&vector);
            if direction.is_zero() {
                Err(TraceError::DegenerateField(position.clone()))
            } else {
                let length = direction.length();
                Ok(&direction / length)
            }
        }
        GridPointQuery3::Outside => Err(TraceError::BadSamplePoint(position.clone())),
    }
}
