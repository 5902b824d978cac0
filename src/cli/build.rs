//! Construction of the command line definition.

use clap::{self, Arg, Command};

/// Builds a representation of the `ft` command line interface.
pub fn create_ft_command() -> Command<'static> {
    Command::new("ft")
        .version(clap::crate_version!())
        .about("Traces a single field line of a vector field through a snapshot")
        .after_help(
            "The trace starts at the given point and repeatedly advances one step\n\
             along the local field direction, corrected with a midpoint sample,\n\
             until the step budget is exhausted or the trace leaves the permitted\n\
             region. Each visited point is written to standard output.",
        )
        .arg(
            Arg::new("VARIABLE")
                .help("Physical quantity whose field lines should be traced (e.g. B0, j, rho)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("START_POINT")
                .value_name("X,Y,Z")
                .help("Starting point for the trace, as three comma-separated coordinates")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("SNAPSHOT_FILE")
                .help("Path to the snapshot file holding the sampled fields")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("zeroth-order")
                .short('z')
                .long("zeroth-order")
                .help("Sample fields with nearest-cell lookup instead of linear interpolation"),
        )
        .arg(
            Arg::new("exclusion-radius")
                .short('r')
                .long("exclusion-radius")
                .value_name("RADIUS")
                .help("Minimum distance from the origin at which tracing is permitted")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::new("limits")
                .short('l')
                .long("limits")
                .value_name("X0,X1,Y0,Y1,Z0,Z1")
                .help(
                    "Limits of the region in which tracing is permitted\n\
                     (intersected with the native snapshot extent)",
                )
                .takes_value(true),
        )
        .arg(
            Arg::new("max-steps")
                .long("max-steps")
                .value_name("N")
                .help("Maximum number of steps to take before terminating")
                .takes_value(true)
                .default_value("400"),
        )
        .arg(
            Arg::new("step-size")
                .long("step-size")
                .value_name("LENGTH")
                .help("Length of each step, in the length unit of the snapshot grid")
                .takes_value(true)
                .default_value("40000"),
        )
        .arg(
            Arg::new("backward")
                .short('b')
                .long("backward")
                .help("Trace against the field direction"),
        )
}
