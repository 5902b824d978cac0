//! Resolution of variable tokens into field component names.

use crate::geometry::Dim3;

/// The two variable codes denoting the split magnetic field family,
/// whose per-axis components are stored under combined names.
pub const VECTOR_VARIANT_CODES: [&str; 2] = ["B0", "B1"];

/// Expands a variable token into a comma-separated list of the three
/// scalar component names making up the corresponding vector field.
///
/// A token equal to one of the variant codes expands to the combined
/// names `<code0><axis><code1>` for each axis in x-, y-, z-order; any
/// other token expands to `<token><axis>`. The expansion is purely
/// syntactic and performs no catalogue lookup.
pub fn expand_variable_token(token: &str) -> String {
    let component_names: Vec<String> = Dim3::slice()
        .iter()
        .map(|&axis| {
            if VECTOR_VARIANT_CODES.contains(&token) {
                format!(
                    "{}{}{}",
                    VECTOR_VARIANT_CODES[0], axis, VECTOR_VARIANT_CODES[1]
                )
            } else {
                format!("{}{}", token, axis)
            }
        })
        .collect();
    component_names.join(",")
}

/// Finds the position of each name in the given comma-separated list
/// within the ordered variable catalogue.
///
/// Matching is case-sensitive and exact. Positions are returned in the
/// order the names appear in the list; each occurrence of a duplicated
/// name resolves independently. Names missing from the catalogue are
/// reported with a warning on stderr and do not occupy a slot in the
/// result, so the returned list may be shorter than the name list.
pub fn find_catalogue_positions(catalogue: &[String], name_list: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    for name in name_list.split(',') {
        match catalogue.iter().position(|entry| entry == name) {
            Some(position) => positions.push(position),
            None => eprintln!(
                "Warning: Variable {} not found in the snapshot catalogue",
                name
            ),
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn variant_codes_expand_to_combined_component_names() {
        assert_eq!(expand_variable_token("B0"), "B0xB1,B0yB1,B0zB1");
        assert_eq!(expand_variable_token("B1"), "B0xB1,B0yB1,B0zB1");
    }

    #[test]
    fn plain_tokens_expand_with_axis_suffixes() {
        assert_eq!(expand_variable_token("j"), "jx,jy,jz");
        assert_eq!(expand_variable_token("rhov"), "rhovx,rhovy,rhovz");
    }

    #[test]
    fn positions_preserve_name_list_order() {
        let catalogue = catalogue(&["rho", "jx", "jy", "jz", "B0xB1"]);
        assert_eq!(
            find_catalogue_positions(&catalogue, "jz,rho,jx"),
            vec![3, 0, 1]
        );
    }

    #[test]
    fn unmatched_names_are_skipped_without_occupying_a_slot() {
        let catalogue = catalogue(&["rho", "jx"]);
        assert_eq!(
            find_catalogue_positions(&catalogue, "jx,missing,rho"),
            vec![1, 0]
        );
    }

    #[test]
    fn duplicate_names_resolve_independently() {
        let catalogue = catalogue(&["rho", "jx"]);
        assert_eq!(
            find_catalogue_positions(&catalogue, "jx,jx,jx"),
            vec![1, 1, 1]
        );
    }

    #[test]
    fn empty_name_lists_yield_no_positions() {
        let catalogue = catalogue(&["rho"]);
        assert!(find_catalogue_positions(&catalogue, "").is_empty());
    }

    #[test]
    fn empty_tokens_from_stray_commas_do_not_occupy_a_slot() {
        let catalogue = catalogue(&["rho", "jx"]);
        assert_eq!(find_catalogue_positions(&catalogue, "jx,"), vec![1]);
        assert_eq!(find_catalogue_positions(&catalogue, ",rho,,jx"), vec![0, 1]);
    }

    #[test]
    fn catalogue_matching_is_exact_and_case_sensitive() {
        let catalogue = catalogue(&["rho", "Rhox", "rhoxy"]);
        assert_eq!(find_catalogue_positions(&catalogue, "rhox"), Vec::<usize>::new());
    }

    #[test]
    fn expansion_resolves_against_a_matching_catalogue() {
        let catalogue = catalogue(&["rho", "B0xB1", "B0yB1", "B0zB1", "jx"]);
        let name_list = expand_variable_token("B0");
        assert_eq!(
            find_catalogue_positions(&catalogue, &name_list),
            vec![1, 2, 3]
        );
    }
}
