//! Function for running the command line program.

use super::{build, utils as cli_utils};
use crate::{
    exit_on_error, exit_on_false, exit_with_error,
    geometry::{
        Dim3::{X, Y, Z},
        In3D, Point3,
    },
    interpolation,
    io::snapshot::SnapshotReader3,
    tracing::{self, ftr, BoundingVolume, TracerConfig},
    variables,
};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

/// Runs the `ft` command line program.
pub fn run() {
    let command = build::create_ft_command();
    run_with_args(command.get_matches());
}

/// Runs the `ft` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    run_trace(&arguments);
}

fn run_trace(arguments: &ArgMatches) {
    let variable_token = arguments
        .value_of("VARIABLE")
        .expect("No value for required argument");
    let start_coords: Vec<ftr> = cli_utils::parse_coordinate_list(
        "START_POINT",
        arguments
            .value_of("START_POINT")
            .expect("No value for required argument"),
        3,
    );
    let start_position = Point3::new(start_coords[0], start_coords[1], start_coords[2]);
    let snapshot_path = PathBuf::from(
        arguments
            .value_of("SNAPSHOT_FILE")
            .expect("No value for required argument"),
    );

    let interpolation_order = if arguments.is_present("zeroth-order") {
        0
    } else {
        1
    };
    let exclusion_radius: ftr =
        cli_utils::get_value_from_required_parseable_argument(arguments, "exclusion-radius");
    let max_steps: u32 =
        cli_utils::get_value_from_required_parseable_argument(arguments, "max-steps");
    let mut step_length: ftr =
        cli_utils::get_value_from_required_parseable_argument(arguments, "step-size");
    if arguments.is_present("backward") {
        step_length = -step_length;
    }
    let limits = arguments.value_of("limits").map(|value_string| {
        let values: Vec<ftr> = cli_utils::parse_coordinate_list("limits", value_string, 6);
        (
            Point3::new(values[0], values[2], values[4]),
            Point3::new(values[1], values[3], values[5]),
        )
    });

    let reader = exit_on_error!(
        SnapshotReader3::open(&snapshot_path),
        "Error: Could not open snapshot file: {}"
    );

    let name_list = variables::expand_variable_token(variable_token);
    let positions = variables::find_catalogue_positions(reader.variable_names(), &name_list);
    exit_on_false!(
        !positions.is_empty(),
        "Error: Unrecognized variable {}",
        variable_token
    );
    exit_on_false!(
        positions.len() == 3,
        "Error: Variable {} resolved to {} catalogue entries, expected 3",
        variable_token,
        positions.len()
    );
    let component_names =
        In3D::with_each_component(|dim| reader.variable_names()[positions[dim.num()]].clone());
    let field = exit_on_error!(
        reader.read_vector_field(&component_names),
        "Error: Could not read field components: {}"
    );

    let bounding_volume = BoundingVolume::from_limits_and_grid(
        limits.as_ref().map(|(lower, upper)| (lower, upper)),
        reader.grid(),
        exclusion_radius,
    );
    let interpolator = interpolation::create_interpolator(interpolation_order)
        .unwrap_or_else(|| {
            exit_with_error!(
                "Error: Unsupported interpolation order {}",
                interpolation_order
            )
        });
    let config = TracerConfig {
        step_length,
        max_steps,
    };

    print_trace_header(
        &component_names,
        &start_position,
        &snapshot_path,
        &bounding_volume,
        interpolation_order,
        &config,
    );

    let mut emit_position = |position: &Point3<ftr>| {
        println!("{} {} {}", position[X], position[Y], position[Z]);
    };
    let _ = exit_on_error!(
        tracing::trace_field_line(
            &field,
            interpolator.as_ref(),
            &bounding_volume,
            &config,
            &start_position,
            &mut emit_position,
        ),
        "Error: Tracing failed: {}"
    );
}

fn print_trace_header(
    component_names: &In3D<String>,
    start_position: &Point3<ftr>,
    snapshot_path: &Path,
    bounding_volume: &BoundingVolume,
    interpolation_order: u32,
    config: &TracerConfig,
) {
    println!(
        "# Traced variables: {}, {}, {}",
        component_names[X], component_names[Y], component_names[Z]
    );
    println!(
        "# Start point: {} {} {}",
        start_position[X], start_position[Y], start_position[Z]
    );
    println!("# Snapshot file: {}", snapshot_path.display());
    let lower = bounding_volume.lower_corner();
    let upper = bounding_volume.upper_corner();
    println!(
        "# Region bounds: x: [{}, {}], y: [{}, {}], z: [{}, {}]",
        lower[X], upper[X], lower[Y], upper[Y], lower[Z], upper[Z]
    );
    println!("# Exclusion radius: {}", bounding_volume.exclusion_radius());
    println!("# Interpolation order: {}", interpolation_order);
    println!(
        "# Tracing at most {} steps of length {}",
        config.max_steps, config.step_length
    );
    println!("# x    y    z");
}
