//! Presence thresholds for the next degree or belt.
//!
//! Requirements are tiered by age bracket, and each bracket keeps its own
//! shape:
//! - kids (≤ 6) use a hand-tuned table with irregular spacing,
//! - youth (7-13) scale linearly at 25 presences per degree,
//! - adults (≥ 14) on white or a colored belt make one flat jump to blue,
//!   and every other adult belt scales at 50 presences per degree.
//!
//! Brackets are mutually exclusive; the first matching bracket governs.
//! Do not unify the table with the linear formulas - the irregular
//! numbers mirror the academy's curriculum for small children.

use crate::belts;

/// Upper age bound (inclusive) of the kids bracket.
pub const KIDS_MAX_AGE: i64 = 6;

/// Upper age bound (inclusive) of the youth bracket.
pub const YOUTH_MAX_AGE: i64 = 13;

/// Kids-bracket requirements, indexed by current degree count.
/// Past the end of the table the child is eligible for the next belt.
pub const KIDS_DEGREE_TABLE: [u64; 4] = [10, 15, 15, 20];

/// Presences per degree for white and colored belts up to age 13.
pub const YOUTH_PRESENCES_PER_DEGREE: u64 = 25;

/// Flat requirement for an adult white belt to reach blue.
pub const ADULT_WHITE_TO_BLUE: u64 = 50;

/// Flat requirement for an adult colored-group belt to reach blue.
/// Degrees on the current belt are ignored for this jump.
pub const ADULT_COLORED_TO_BLUE: u64 = 35;

/// Presences per degree on every other adult belt.
///
/// This applies the generic formula to blue and above. Real federations
/// usually time-gate high-belt degrees instead of counting presences;
/// the academy curriculum keeps the presence count as an approximation.
pub const ADULT_PRESENCES_PER_DEGREE: u64 = 50;

/// Age bracket a student is graded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    /// Up to and including age 6.
    Kids,
    /// Ages 7 through 13.
    Youth,
    /// Age 14 and up.
    Adult,
}

impl AgeBracket {
    /// Bracket for a given age. Ages below zero (malformed documents)
    /// land in the kids bracket like any other small number.
    pub const fn of(age: i64) -> Self {
        if age <= KIDS_MAX_AGE {
            Self::Kids
        } else if age <= YOUTH_MAX_AGE {
            Self::Youth
        } else {
            Self::Adult
        }
    }
}

/// Total presences required for the next degree, before subtracting what
/// the student already has.
///
/// Returns `None` only in the kids bracket once the degree table is
/// exhausted (degrees ≥ 4): there is no further degree to earn, the child
/// is eligible for the next belt tier. Negative `degrees` clamp to zero.
pub fn required_presences(age: i64, belt: &str, degrees: i64) -> Option<u64> {
    let degrees = degrees.max(0) as u64;
    match AgeBracket::of(age) {
        AgeBracket::Kids => KIDS_DEGREE_TABLE.get(degrees as usize).copied(),
        AgeBracket::Youth => Some((degrees + 1).saturating_mul(YOUTH_PRESENCES_PER_DEGREE)),
        AgeBracket::Adult => {
            if belt == belts::WHITE {
                Some(ADULT_WHITE_TO_BLUE)
            } else if belts::is_colored_belt(belt) {
                Some(ADULT_COLORED_TO_BLUE)
            } else {
                Some((degrees + 1).saturating_mul(ADULT_PRESENCES_PER_DEGREE))
            }
        }
    }
}

/// Presences still needed before the student qualifies for their next
/// degree or belt.
///
/// Pure and total: any combination of inputs yields a result, negative
/// counts clamp to zero, and the result never goes below zero. A result
/// of 0 means "eligible now" - for a kid past the degree table it is the
/// ready-for-next-belt sentinel, not a literal zero-presence requirement.
///
/// # Examples
///
/// ```
/// use tatame_grading::presences_needed;
///
/// assert_eq!(presences_needed(3, "white", 0, 0), 10);  // kids table
/// assert_eq!(presences_needed(10, "colored", 2, 0), 75); // (2+1) × 25
/// assert_eq!(presences_needed(20, "white", 0, 30), 20);  // 50 − 30
/// ```
pub fn presences_needed(age: i64, belt: &str, degrees: i64, total_presences: i64) -> u64 {
    let total = total_presences.max(0) as u64;
    match required_presences(age, belt, degrees) {
        Some(required) => required.saturating_sub(total),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn brackets_are_exclusive_with_strict_boundaries() {
        assert_eq!(AgeBracket::of(0), AgeBracket::Kids);
        assert_eq!(AgeBracket::of(6), AgeBracket::Kids);
        assert_eq!(AgeBracket::of(7), AgeBracket::Youth);
        assert_eq!(AgeBracket::of(13), AgeBracket::Youth);
        assert_eq!(AgeBracket::of(14), AgeBracket::Adult);
        assert_eq!(AgeBracket::of(99), AgeBracket::Adult);
        assert_eq!(AgeBracket::of(-3), AgeBracket::Kids);
    }

    #[test]
    fn kids_table_by_degree() {
        let test_cases = [
            (0, 10), // first stripe
            (1, 15),
            (2, 15), // same spacing twice, not a typo
            (3, 20),
        ];
        for (degrees, expected) in test_cases {
            assert_eq!(
                presences_needed(3, "white", degrees, 0),
                expected,
                "kids degrees={degrees}"
            );
        }
    }

    #[test]
    fn kids_past_table_is_ready_for_next_belt() {
        // Sentinel: no further degree in the bracket, regardless of count.
        assert_eq!(required_presences(5, "white", 4), None);
        assert_eq!(presences_needed(5, "white", 4, 0), 0);
        assert_eq!(presences_needed(5, "grey", 10, 0), 0);
        assert_eq!(presences_needed(6, "white", 4, 1000), 0);
    }

    #[test]
    fn kids_result_clamps_at_zero() {
        assert_eq!(presences_needed(3, "white", 0, 0), 10);
        assert_eq!(presences_needed(3, "white", 0, 12), 0);
    }

    #[test]
    fn youth_scales_linearly() {
        assert_eq!(presences_needed(10, "colored", 2, 0), 75);
        assert_eq!(presences_needed(7, "white", 0, 0), 25);
        assert_eq!(presences_needed(13, "yellow", 3, 40), 60); // 100 − 40
    }

    #[test]
    fn youth_ignores_belt_label() {
        // Same formula whatever the label says.
        assert_eq!(
            presences_needed(9, "white", 1, 0),
            presences_needed(9, "green", 1, 0)
        );
    }

    #[test]
    fn adult_white_is_a_flat_jump() {
        assert_eq!(presences_needed(20, "white", 0, 30), 20);
        // Degrees do not change the white-to-blue requirement.
        assert_eq!(presences_needed(20, "white", 3, 0), 50);
    }

    #[test]
    fn adult_colored_group_is_a_flat_jump() {
        assert_eq!(presences_needed(16, "grey", 3, 0), 35);
        for belt in crate::belts::COLORED_BELTS {
            assert_eq!(presences_needed(30, belt, 2, 0), 35, "belt={belt}");
        }
    }

    #[test]
    fn adult_other_belts_use_generic_formula() {
        assert_eq!(presences_needed(25, "blue", 1, 0), 100);
        assert_eq!(presences_needed(40, "purple", 0, 0), 50);
        assert_eq!(presences_needed(40, "black", 2, 60), 90); // 150 − 60
        // Unknown labels take the same path.
        assert_eq!(presences_needed(19, "camouflage", 0, 0), 50);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        // Negative degrees behave like zero degrees...
        assert_eq!(presences_needed(3, "white", -1, 0), 10);
        assert_eq!(presences_needed(10, "white", -5, 0), 25);
        assert_eq!(presences_needed(25, "blue", -2, 0), 50);
        // ...and negative totals like an empty history.
        assert_eq!(presences_needed(20, "white", 0, -100), 50);
    }

    #[test]
    fn absurd_degree_counts_do_not_overflow() {
        assert_eq!(presences_needed(5, "white", i64::MAX, 0), 0);
        assert_eq!(presences_needed(25, "blue", i64::MAX, 0), u64::MAX);
    }

    proptest! {
        #[test]
        fn needed_never_exceeds_requirement(
            age in -10i64..120,
            degrees in -10i64..100,
            total in -10i64..100_000,
        ) {
            let needed = presences_needed(age, "blue", degrees, total);
            if let Some(required) = required_presences(age, "blue", degrees) {
                prop_assert!(needed <= required);
            } else {
                prop_assert_eq!(needed, 0);
            }
        }

        #[test]
        fn needed_is_monotone_in_presences(
            age in -10i64..120,
            degrees in -10i64..100,
            total in 0i64..100_000,
        ) {
            // One more presence never increases what is still needed.
            let before = presences_needed(age, "white", degrees, total);
            let after = presences_needed(age, "white", degrees, total + 1);
            prop_assert!(after <= before);
        }

        #[test]
        fn enough_presences_always_reach_zero(
            age in -10i64..120,
            degrees in 0i64..100,
        ) {
            if let Some(required) = required_presences(age, "orange", degrees) {
                prop_assert_eq!(
                    presences_needed(age, "orange", degrees, required as i64),
                    0
                );
            }
        }

        #[test]
        fn kids_sentinel_holds_for_all_high_degrees(
            degrees in 4i64..500,
            total in -10i64..10_000,
        ) {
            prop_assert_eq!(presences_needed(4, "white", degrees, total), 0);
        }
    }
}
