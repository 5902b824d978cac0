//! End-to-end traces through snapshot files written to disk.

use fieldtrace::{
    geometry::{
        Dim3::{X, Y, Z},
        In3D, Point3, Vec3,
    },
    grid::RegularGrid3,
    interpolation,
    io::{
        snapshot::{self, fsd, PhysicalConstants, SnapshotReader3},
        Endianness,
    },
    tracing::{self, BoundingVolume, TraceError, TracerConfig},
    variables,
};
use approx::assert_relative_eq;
use ndarray::Array3;
use std::path::PathBuf;
use tempfile::tempdir;

const SHAPE: (usize, usize, usize) = (4, 4, 4);
const HALF_WIDTH: fsd = 3e7;

fn write_test_snapshot(file_path: &PathBuf, field_vector: [fsd; 3]) {
    let grid = RegularGrid3::new(
        In3D::new(SHAPE.0, SHAPE.1, SHAPE.2),
        Vec3::equal_components(-HALF_WIDTH),
        Vec3::equal_components(HALF_WIDTH),
    );
    let constants = PhysicalConstants {
        adiabatic_index: 5.0 / 3.0,
        inverse_vacuum_permeability: 1.0 / (4e-7 * std::f64::consts::PI),
        particle_mass: 1.672_621_9e-27,
    };
    let variables = vec![
        ("rho".to_string(), Array3::from_elem(SHAPE, 1e-20)),
        ("B0xB1".to_string(), Array3::from_elem(SHAPE, field_vector[0])),
        ("B0yB1".to_string(), Array3::from_elem(SHAPE, field_vector[1])),
        ("B0zB1".to_string(), Array3::from_elem(SHAPE, field_vector[2])),
    ];
    snapshot::write_snapshot(file_path, &grid, &constants, &variables, Endianness::Little)
        .unwrap();
}

fn resolve_field_components(reader: &SnapshotReader3, token: &str) -> In3D<String> {
    let name_list = variables::expand_variable_token(token);
    let positions = variables::find_catalogue_positions(reader.variable_names(), &name_list);
    assert_eq!(positions.len(), 3);
    In3D::with_each_component(|dim| reader.variable_names()[positions[dim.num()]].clone())
}

#[test]
fn uniform_field_trace_follows_the_field_with_fixed_spacing() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("uniform.snap");
    write_test_snapshot(&file_path, [2.5e-9, 0.0, 0.0]);

    let reader = SnapshotReader3::open(&file_path).unwrap();
    let component_names = resolve_field_components(&reader, "B0");
    let field = reader.read_vector_field(&component_names).unwrap();

    let volume = BoundingVolume::from_limits_and_grid(None, reader.grid(), 1.0);
    let interpolator = interpolation::create_interpolator(1).unwrap();
    let config = TracerConfig {
        step_length: 4e4,
        max_steps: 400,
    };
    let start = Point3::new(3e6, 0.0, 0.0);

    let mut traced = Vec::new();
    let n_advanced = tracing::trace_field_line(
        &field,
        interpolator.as_ref(),
        &volume,
        &config,
        &start,
        &mut |position: &Point3<fsd>| traced.push(position.clone()),
    )
    .unwrap();

    assert_eq!(n_advanced, 401);
    assert_eq!(traced.len(), 402);
    for (step, position) in traced.iter().enumerate() {
        assert_relative_eq!(position[X], 3e6 + step as fsd * 4e4, max_relative = 1e-12);
        assert_eq!(position[Y], 0.0);
        assert_eq!(position[Z], 0.0);
    }
    for window in traced.windows(2) {
        let displacement = &window[1] - &window[0];
        assert_relative_eq!(displacement.length(), 4e4, max_relative = 1e-12);
    }
}

#[test]
fn zero_field_snapshot_terminates_after_the_start_position() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("degenerate.snap");
    write_test_snapshot(&file_path, [0.0, 0.0, 0.0]);

    let reader = SnapshotReader3::open(&file_path).unwrap();
    let component_names = resolve_field_components(&reader, "B1");
    let field = reader.read_vector_field(&component_names).unwrap();

    let volume = BoundingVolume::from_limits_and_grid(None, reader.grid(), 1.0);
    let interpolator = interpolation::create_interpolator(1).unwrap();
    let config = TracerConfig {
        step_length: 4e4,
        max_steps: 400,
    };
    let start = Point3::new(3e6, 0.0, 0.0);

    let mut traced = Vec::new();
    let result = tracing::trace_field_line(
        &field,
        interpolator.as_ref(),
        &volume,
        &config,
        &start,
        &mut |position: &Point3<fsd>| traced.push(position.clone()),
    );

    assert_eq!(result, Err(TraceError::DegenerateField(start)));
    assert_eq!(traced.len(), 1);
}

#[test]
fn caller_limits_are_intersected_with_the_snapshot_extent() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("limits.snap");
    write_test_snapshot(&file_path, [2.5e-9, 0.0, 0.0]);

    let reader = SnapshotReader3::open(&file_path).unwrap();
    let lower = Point3::new(-1e7, -1e9, -HALF_WIDTH);
    let upper = Point3::new(1e9, 1e7, HALF_WIDTH);
    let volume =
        BoundingVolume::from_limits_and_grid(Some((&lower, &upper)), reader.grid(), 1.0);

    assert_eq!(
        volume.lower_corner(),
        &Point3::new(-1e7, -HALF_WIDTH, -HALF_WIDTH)
    );
    assert_eq!(
        volume.upper_corner(),
        &Point3::new(HALF_WIDTH, 1e7, HALF_WIDTH)
    );
}
