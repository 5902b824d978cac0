//! Utilities for interpreting command line arguments.

use crate::{exit_on_error, exit_on_false, num::BFloat};
use clap::ArgMatches;
use std::{fmt, str::FromStr};

/// Parses the given string as a value of the requested type, exiting
/// with an error message naming the argument on failure.
pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

/// Parses the value of the given required argument, exiting if the
/// value cannot be parsed as the requested type.
pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

/// Parses a comma-separated argument value into exactly the required
/// number of finite floating-point values, exiting on any parse
/// failure, non-finite entry or count mismatch.
pub fn parse_coordinate_list<F>(
    argument_name: &str,
    value_string: &str,
    required_count: usize,
) -> Vec<F>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: fmt::Display,
{
    let values: Vec<F> = value_string
        .split(',')
        .map(|entry| parse_value_string(argument_name, entry.trim()))
        .collect();
    for &value in &values {
        exit_on_false!(
            value.is_finite(),
            "Error: {} must contain only finite values",
            argument_name
        );
    }
    exit_on_false!(
        values.len() == required_count,
        "Error: {} must have {} comma-separated values, got {}",
        argument_name,
        required_count,
        values.len()
    );
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_lists_parse_with_surrounding_whitespace() {
        let values: Vec<f64> = parse_coordinate_list("limits", "-1.0, 2.5 ,3e6", 3);
        assert_eq!(values, vec![-1.0, 2.5, 3e6]);
    }

    #[cfg(feature = "for-testing")]
    #[test]
    #[should_panic(expected = "must have 3 comma-separated values")]
    fn wrong_coordinate_counts_are_fatal() {
        let _: Vec<f64> = parse_coordinate_list("START_POINT", "1,2", 3);
    }

    #[cfg(feature = "for-testing")]
    #[test]
    #[should_panic(expected = "Could not parse value")]
    fn bad_numeric_literals_are_fatal() {
        let _: Vec<f64> = parse_coordinate_list("START_POINT", "1,two,3", 3);
    }

    #[cfg(feature = "for-testing")]
    #[test]
    #[should_panic(expected = "must contain only finite values")]
    fn non_finite_values_are_fatal() {
        let _: Vec<f64> = parse_coordinate_list("limits", "1,inf,3", 3);
    }
}
