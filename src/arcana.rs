use crate::CivilDate;
use crate::consts::ARCANA_BOUND;
use crate::prelude::*;

/// A personal constant in `0..=22`, derived once from birthdate text and
/// reused across every day valuation of a session.
///
/// Derivation only ever reads the decimal digit characters of the input,
/// so the birthdate never has to be a parseable calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{_0}")]
pub struct PersonalConstant(u8);

impl PersonalConstant {
    /// Derives the constant: sum every digit character of the input in
    /// order, then subtract 22 while the sum still exceeds 22.
    ///
    /// The loop never fires for sums of 22 or less, so 0 only arises
    /// from input with no digits at all. Cannot fail; pure.
    pub fn from_text(text: &str) -> Self {
        let mut sum: u32 = text.chars().filter_map(|c| c.to_digit(10)).sum();
        while sum > u32::from(ARCANA_BOUND) {
            sum -= u32::from(ARCANA_BOUND);
        }
        // The loop leaves the sum at or below 22
        Self(sum as u8)
    }

    /// Returns the constant as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Computes the day value for a date: the eight digits of the
/// `DDMMYYYY` rendering plus the personal constant, with 22 subtracted
/// exactly once when the total exceeds 22.
///
/// A single subtraction, not a reduction loop: a total above 44 comes
/// out above 22 and is returned as-is. This deliberately mirrors the
/// reference behavior and must not be folded into the repeated
/// subtraction used by [`PersonalConstant::from_text`].
pub const fn day_value(date: CivilDate, constant: PersonalConstant) -> u8 {
    let total = date.digit_sum() + constant.get();
    if total > ARCANA_BOUND {
        total - ARCANA_BOUND
    } else {
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use proptest::prelude::*;

    #[test]
    fn constant_from_plain_birthdate() {
        // 0+1+0+1+2+0+0+0 = 4
        assert_eq!(PersonalConstant::from_text("01.01.2000").get(), 4);
    }

    #[test]
    fn constant_reduces_by_repeated_subtraction() {
        // 2+9+1+1+1+9+9+5 = 37 -> 37-22 = 15
        assert_eq!(PersonalConstant::from_text("29.11.1995").get(), 15);
    }

    #[test]
    fn constant_without_digits_is_zero() {
        assert_eq!(PersonalConstant::from_text("").get(), 0);
        assert_eq!(PersonalConstant::from_text("no digits here").get(), 0);
    }

    #[test]
    fn constant_ignores_non_digit_characters() {
        assert_eq!(
            PersonalConstant::from_text("29.11.1995"),
            PersonalConstant::from_text("born 29/11 in 1995")
        );
    }

    #[test]
    fn constant_of_exactly_twenty_two_is_kept() {
        // 9+9+4 = 22: the loop only fires above 22
        assert_eq!(PersonalConstant::from_text("994").get(), 22);
    }

    #[test]
    fn constant_reduces_large_sums_below_the_bound() {
        // Eight nines: 72 -> 50 -> 28 -> 6
        assert_eq!(PersonalConstant::from_text("99999999").get(), 6);
    }

    #[test]
    fn day_value_within_bound_is_unreduced() {
        // 01012021 sums to 7; 7+4 = 11
        let constant = PersonalConstant::from_text("01.01.2000");
        assert_eq!(day_value(date(2021, 1, 1), constant), 11);
    }

    #[test]
    fn day_value_subtracts_once_over_the_bound() {
        // 29111995 sums to 37; 37+4 = 41 -> 19
        let constant = PersonalConstant::from_text("01.01.2000");
        assert_eq!(day_value(date(1995, 11, 29), constant), 19);
    }

    #[test]
    fn day_value_single_subtraction_can_exceed_the_bound() {
        // 28082008 sums to 28; with constant 22 the total is 50, and a
        // single subtraction leaves 28 - returned unchanged
        let constant = PersonalConstant::from_text("994");
        assert_eq!(constant.get(), 22);
        assert_eq!(day_value(date(2008, 8, 28), constant), 28);
    }

    #[test]
    fn day_value_is_idempotent() {
        let constant = PersonalConstant::from_text("29.11.1995");
        let d = date(2021, 1, 1);
        let first = day_value(d, constant);
        for _ in 0..10 {
            assert_eq!(day_value(d, constant), first);
        }
    }

    #[test]
    fn display_shows_the_raw_value() {
        assert_eq!(PersonalConstant::from_text("29.11.1995").to_string(), "15");
    }

    proptest! {
        #[test]
        fn constant_is_deterministic(text in ".*") {
            prop_assert_eq!(
                PersonalConstant::from_text(&text),
                PersonalConstant::from_text(&text)
            );
        }

        #[test]
        fn constant_never_exceeds_the_bound(text in ".*") {
            prop_assert!(PersonalConstant::from_text(&text).get() <= ARCANA_BOUND);
        }

        #[test]
        fn constant_only_reads_digits(text in "[^0-9]*") {
            prop_assert_eq!(PersonalConstant::from_text(&text).get(), 0);
        }
    }
}
