//! Tatame Grading Rules
//!
//! Pure promotion arithmetic for a jiu-jitsu academy: given a student's
//! age, belt, degree count, and lifetime presence count, how many more
//! presences until the next degree or belt?
//!
//! # Rule System
//!
//! Three mutually exclusive age brackets, evaluated in order:
//!
//! 1. **Kids (≤ 6)** - irregular lookup table by degrees: 10, 15, 15, 20.
//!    Four degrees earned means the child is ready for the next belt
//!    (reported as 0 presences needed).
//! 2. **Youth (7-13)** - `(degrees + 1) × 25`, whatever the belt label.
//! 3. **Adults (≥ 14)** - keyed by belt: white needs a flat 50 to reach
//!    blue, the colored group (colored/grey/yellow/orange/green) a flat
//!    35, and every other belt `(degrees + 1) × 50`.
//!
//! # Guarantees
//!
//! [`presences_needed`] is total: no panics, no errors. Negative degree
//! or presence counts (possible in hand-edited documents) clamp to zero,
//! and results are clamped at zero rather than going negative.
//!
//! This crate does no I/O and holds no state; callers may evaluate on
//! any thread.

pub mod belts;
mod rules;

pub use rules::{
    presences_needed, required_presences, AgeBracket, ADULT_COLORED_TO_BLUE,
    ADULT_PRESENCES_PER_DEGREE, ADULT_WHITE_TO_BLUE, KIDS_DEGREE_TABLE, KIDS_MAX_AGE,
    YOUTH_MAX_AGE, YOUTH_PRESENCES_PER_DEGREE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_student_through_the_ranks() {
        // Same student, aging up through every bracket shape.
        assert_eq!(presences_needed(5, "white", 0, 3), 7); // kids table
        assert_eq!(presences_needed(9, "grey", 1, 20), 30); // (1+1)×25 − 20
        assert_eq!(presences_needed(15, "grey", 1, 20), 15); // flat 35 − 20
        assert_eq!(presences_needed(21, "blue", 0, 20), 30); // (0+1)×50 − 20
    }

    #[test]
    fn result_is_never_negative() {
        for total in [0, 10, 50, 500] {
            for (age, belt, degrees) in [(4, "white", 2), (11, "yellow", 0), (33, "brown", 1)] {
                let _needed: u64 = presences_needed(age, belt, degrees, total);
            }
        }
    }
}
