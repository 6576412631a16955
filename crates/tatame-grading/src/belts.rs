//! Belt labels recognized by the grading rules.
//!
//! Belts are an open set of lowercase string labels - records may carry
//! any label ("blue", "purple", "brown", "black", ...). Only the two
//! groups below get special treatment in the adult bracket; every other
//! label falls to the generic per-degree formula.

/// The white belt label.
pub const WHITE: &str = "white";

/// Juvenile colored belts. An adult still holding one of these makes a
/// single flat jump to blue instead of accumulating degrees.
pub const COLORED_BELTS: [&str; 5] = ["colored", "grey", "yellow", "orange", "green"];

/// Membership test for the colored group. Labels match exactly; no
/// normalization is applied.
pub fn is_colored_belt(belt: &str) -> bool {
    COLORED_BELTS.contains(&belt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_group_membership() {
        for belt in COLORED_BELTS {
            assert!(is_colored_belt(belt), "{belt} should be in the group");
        }
        assert!(!is_colored_belt(WHITE));
        assert!(!is_colored_belt("blue"));
        assert!(!is_colored_belt(""));
    }

    #[test]
    fn matching_is_exact() {
        assert!(!is_colored_belt("Grey"));
        assert!(!is_colored_belt("grey "));
    }
}
